//! Press-drag-release creation of new bodies.
//!
//! A press places a motionless body. The release gives it a velocity from the
//! drag displacement divided by `drag_divisor` times the elapsed *simulation*
//! time, then hands it over to the simulation.

use crate::body::{Body, Color};
use crate::error::SimError;
use crate::vector::Vector2;

/// Empirical drag-to-velocity scaling; tuned by feel, not derived.
pub const DRAG_VELOCITY_DIVISOR: f64 = 3.0;

/// Properties given to every spawned body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnTemplate {
    pub mass: f64,
    pub radius: f64,
    pub color: Color,
    pub drag_divisor: f64,
}

impl Default for SpawnTemplate {
    fn default() -> Self {
        Self {
            mass: 2000.0,
            radius: 2.0,
            color: Color::WHITE,
            drag_divisor: DRAG_VELOCITY_DIVISOR,
        }
    }
}

/// A body that has been placed but not yet released.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSpawn {
    pub body: Body,
    pub pressed_at: f64,
    drag_divisor: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SpawnGesture {
    #[default]
    Idle,
    Pending(PendingSpawn),
}

impl SpawnGesture {
    /// Starts a gesture at `position` and simulation time `t`.
    pub fn begin(
        &mut self,
        position: Vector2,
        t: f64,
        template: &SpawnTemplate,
    ) -> Result<(), SimError> {
        if self.is_pending() {
            return Err(SimError::SpawnInProgress);
        }

        let body = Body::new(template.mass, template.radius, position, Vector2::zero())
            .with_color(template.color);
        *self = SpawnGesture::Pending(PendingSpawn {
            body,
            pressed_at: t,
            drag_divisor: template.drag_divisor,
        });
        Ok(())
    }

    /// Finishes the gesture and returns the body ready for insertion.
    ///
    /// The gesture always returns to `Idle`; a zero-duration drag discards the
    /// body and reports `DegenerateGesture`.
    pub fn end(&mut self, position: Vector2, t: f64) -> Result<Body, SimError> {
        let SpawnGesture::Pending(pending) = std::mem::take(self) else {
            return Err(SimError::NoPendingSpawn);
        };

        let elapsed = t - pending.pressed_at;
        if elapsed <= 0.0 {
            return Err(SimError::DegenerateGesture);
        }

        let mut body = pending.body;
        let displacement = position - body.pos;
        body.vel = displacement * (1.0 / (pending.drag_divisor * elapsed));
        Ok(body)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SpawnGesture::Pending(_))
    }

    /// The body placed by an unfinished gesture, for display only.
    pub fn pending_body(&self) -> Option<&Body> {
        match self {
            SpawnGesture::Pending(pending) => Some(&pending.body),
            SpawnGesture::Idle => None,
        }
    }
}
