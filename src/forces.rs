//! Pairwise inverse-square gravity with the gravitational constant normalized to 1.

use crate::body::Body;
use crate::error::SimError;
use crate::vector::{Vector2, Vector2Ext};

/// Acceleration imparted on `acted_on` by `source`.
///
/// Points from `acted_on` toward `source` with magnitude `source.mass / r²`.
/// Fails with `DegenerateVector` when the two positions coincide.
pub fn gravity_acceleration(source: &Body, acted_on: &Body) -> Result<Vector2, SimError> {
    let r = source.pos - acted_on.pos;
    let r_hat = r.unit()?;
    Ok(r_hat * (source.mass / r.mag_sq()))
}

/// Net acceleration on every body, all evaluated against the same positions.
///
/// Sources with `mass <= 0` are skipped. A coincident pair contributes nothing;
/// pruning removes such pairs on the following step.
pub fn net_accelerations(bodies: &[Body]) -> Vec<Vector2> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, acted_on)| {
            let mut acc = Vector2::zero();
            for (j, source) in bodies.iter().enumerate() {
                if i == j || !source.is_attractor() {
                    continue;
                }
                match gravity_acceleration(source, acted_on) {
                    Ok(a) => acc += a,
                    Err(err) => tracing::trace!(i, j, %err, "skipping coincident pair"),
                }
            }
            acc
        })
        .collect()
}

/// Total mechanical energy: kinetic plus pairwise potential `-m_i m_j / r`.
pub fn total_energy(bodies: &[Body]) -> f64 {
    let kinetic: f64 = bodies.iter().map(Body::kinetic_energy).sum();

    let mut potential = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let r = a.pos.distance(&b.pos);
            if r > 0.0 {
                potential -= a.mass * b.mass / r;
            }
        }
    }

    kinetic + potential
}
