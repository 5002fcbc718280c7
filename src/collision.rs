//! Decides which bodies leave the simulation on a given step.
//!
//! Removal is a deletion, never a merge: the absorbing body keeps its own
//! mass and momentum. Bodies are resolved in index order against the positions
//! at the start of the step; a body already removed absorbs nothing further.

use crate::body::Body;
use crate::vector::Vector2Ext;

/// Separation at or below which two bodies are treated as coincident.
pub const COINCIDENCE_EPSILON: f64 = 1e-9;

/// Why a body was removed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RemovalReason {
    /// Came within the radius of a body at least as heavy.
    Absorbed { by: usize },
    /// Sits on top of a body at least as heavy.
    Coincident { with: usize },
    /// Left the tracked region.
    OutOfBounds,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionPolicy {
    /// Largest |x| a body may reach before it is dropped.
    pub max_x: f64,
    /// Largest |y| a body may reach before it is dropped.
    pub max_y: f64,
}

impl CollisionPolicy {
    /// Bounds set to `bound_factor` times the viewport extent in each axis.
    pub fn from_viewport(width: f64, height: f64, bound_factor: f64) -> Self {
        Self {
            max_x: bound_factor * width,
            max_y: bound_factor * height,
        }
    }

    pub fn is_out_of_bounds(&self, body: &Body) -> bool {
        body.pos.x.abs() > self.max_x || body.pos.y.abs() > self.max_y
    }

    /// Whether `a` is destroyed by its encounter with `b`.
    pub fn pair_removal(&self, a: &Body, b: &Body, b_index: usize) -> Option<RemovalReason> {
        if a.mass > b.mass {
            return None;
        }
        let distance = a.pos.distance(&b.pos);
        if distance <= COINCIDENCE_EPSILON {
            Some(RemovalReason::Coincident { with: b_index })
        } else if distance < b.radius {
            Some(RemovalReason::Absorbed { by: b_index })
        } else {
            None
        }
    }

    /// Removal verdict for every body, indexed like `bodies`.
    ///
    /// Of two equally heavy bodies in contact only the earlier one is removed.
    pub fn prune(&self, bodies: &[Body]) -> Vec<Option<RemovalReason>> {
        let mut verdicts: Vec<Option<RemovalReason>> = vec![None; bodies.len()];

        for (i, a) in bodies.iter().enumerate() {
            let verdict = if self.is_out_of_bounds(a) {
                Some(RemovalReason::OutOfBounds)
            } else {
                bodies
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i && verdicts[j].is_none())
                    .find_map(|(j, b)| self.pair_removal(a, b, j))
            };
            verdicts[i] = verdict;
        }

        verdicts
    }
}
