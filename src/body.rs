use crate::vector::Vector2;
use serde::{Deserialize, Serialize};

/// Opaque render tag, packed as `0xRRGGBB`.
/// The engine never interprets it; it only travels with the body to the renderer.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);
    pub const ORANGE: Color = Color(0xFF9900);
}

/// A point mass taking part in the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Mass of the body. Zero makes it a test particle that feels gravity but exerts none.
    pub mass: f64,
    /// Collision and render radius. Never used by the force law.
    pub radius: f64,
    /// Position vector.
    pub pos: Vector2,
    /// Velocity vector.
    pub vel: Vector2,
    pub color: Color,
    /// Whether positions are being appended to `trail`.
    pub trail_enabled: bool,
    /// Past positions, oldest first.
    pub trail: Vec<Vector2>,
}

impl Default for Body {
    fn default() -> Self {
        Self::new(1.0, 1.0, Vector2::zero(), Vector2::zero())
    }
}

impl Body {
    /// Creates a white body with trails disabled.
    pub fn new(mass: f64, radius: f64, pos: Vector2, vel: Vector2) -> Self {
        Self {
            mass,
            radius,
            pos,
            vel,
            color: Color::WHITE,
            trail_enabled: false,
            trail: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_trail(mut self, enabled: bool) -> Self {
        self.trail_enabled = enabled;
        self
    }

    /// Whether this body pulls on others.
    pub fn is_attractor(&self) -> bool {
        self.mass > 0.0
    }

    /// Appends the current position to the trail if recording is on.
    /// When `max_points` is given, the oldest points are dropped to stay within it.
    pub fn record_trail(&mut self, max_points: Option<usize>) {
        if !self.trail_enabled {
            return;
        }
        self.trail.push(self.pos);

        if let Some(max) = max_points {
            if self.trail.len() > max {
                let excess = self.trail.len() - max;
                self.trail.drain(..excess);
            }
        }
    }

    /// Turns recording on or off and forgets every recorded point.
    pub fn reset_trail(&mut self, enabled: bool) {
        self.trail_enabled = enabled;
        self.trail.clear();
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.mag_sq()
    }
}
