use crate::error::SimError;

/// Double-precision 2D vector used for every position, velocity and acceleration.
///
/// Addition, subtraction and scalar multiplication are the `+`, `-` and `* f64`
/// operators; `mag()` is the length. All operations return new values.
pub type Vector2 = ultraviolet::DVec2;

/// Constructors and checked operations missing from `ultraviolet`.
pub trait Vector2Ext: Sized {
    /// Builds a vector from cartesian components.
    fn from_cartesian(x: f64, y: f64) -> Self;

    /// Builds a vector from polar form: `(r cos θ, r sin θ)`.
    fn from_polar(r: f64, theta: f64) -> Self;

    /// Returns the vector scaled to unit length.
    /// Fails with `DegenerateVector` when the length is zero.
    fn unit(&self) -> Result<Self, SimError>;

    /// Euclidean distance between two points.
    fn distance(&self, other: &Self) -> f64;
}

impl Vector2Ext for Vector2 {
    fn from_cartesian(x: f64, y: f64) -> Self {
        Vector2::new(x, y)
    }

    fn from_polar(r: f64, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Vector2::new(r * cos, r * sin)
    }

    fn unit(&self) -> Result<Self, SimError> {
        let length = self.mag();
        if length == 0.0 {
            return Err(SimError::DegenerateVector);
        }
        Ok(*self * (1.0 / length))
    }

    fn distance(&self, other: &Self) -> f64 {
        (*other - *self).mag()
    }
}
