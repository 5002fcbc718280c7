//! Fixed-step integrators that advance a whole body collection at once.
//!
//! Integrators only move bodies. Pruning has already happened by the time
//! `advance` is called, so every body passed in is a survivor.

use crate::body::Body;
use crate::error::SimError;
use crate::forces::net_accelerations;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub trait Integrator: Send + Sync {
    /// Advance every body by one time step `dt`.
    fn advance(&self, bodies: &mut [Body], dt: f64);

    fn name(&self) -> &'static str;

    fn order(&self) -> usize;
}

/// Euler stepping with the velocity updated first and the position moved
/// with the new velocity (semi-implicit / symplectic Euler).
///
/// 1. v(t+dt) = v(t) + a(t)*dt
/// 2. x(t+dt) = x(t) + v(t+dt)*dt
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn advance(&self, bodies: &mut [Body], dt: f64) {
        let accelerations = net_accelerations(bodies);

        for (body, acc) in bodies.iter_mut().zip(accelerations) {
            body.vel += acc * dt;
            body.pos += body.vel * dt;
        }
    }

    fn name(&self) -> &'static str {
        "Explicit Euler"
    }

    fn order(&self) -> usize {
        1
    }
}

/// Velocity Verlet.
///
/// 1. x(t+dt) = x(t) + v(t)*dt + 0.5*a(t)*dt²
/// 2. a(t+dt) from the updated positions
/// 3. v(t+dt) = v(t) + 0.5*(a(t) + a(t+dt))*dt
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityVerlet;

impl Integrator for VelocityVerlet {
    fn advance(&self, bodies: &mut [Body], dt: f64) {
        let old_accelerations = net_accelerations(bodies);

        for (body, acc) in bodies.iter_mut().zip(&old_accelerations) {
            body.pos += body.vel * dt + *acc * (0.5 * dt * dt);
        }

        let new_accelerations = net_accelerations(bodies);

        for ((body, old), new) in bodies
            .iter_mut()
            .zip(old_accelerations)
            .zip(new_accelerations)
        {
            body.vel += (old + new) * (0.5 * dt);
        }
    }

    fn name(&self) -> &'static str {
        "Velocity Verlet"
    }

    fn order(&self) -> usize {
        2
    }
}

/// Selectable integration scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    #[serde(alias = "euler")]
    ExplicitEuler,
    #[default]
    #[serde(alias = "verlet")]
    VelocityVerlet,
}

impl IntegratorKind {
    pub const ALL: [IntegratorKind; 2] = [IntegratorKind::ExplicitEuler, IntegratorKind::VelocityVerlet];

    pub fn integrator(self) -> &'static dyn Integrator {
        match self {
            IntegratorKind::ExplicitEuler => &ExplicitEuler,
            IntegratorKind::VelocityVerlet => &VelocityVerlet,
        }
    }

    /// Canonical configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            IntegratorKind::ExplicitEuler => "explicit_euler",
            IntegratorKind::VelocityVerlet => "velocity_verlet",
        }
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegratorKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "euler" | "explicit_euler" => Ok(IntegratorKind::ExplicitEuler),
            "verlet" | "velocity_verlet" => Ok(IntegratorKind::VelocityVerlet),
            _ => Err(SimError::InvalidIntegrator(s.to_string())),
        }
    }
}
