pub mod body;
pub mod c_api;
pub mod collision;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod simulation;
pub mod spawn;
pub mod utils;
pub mod vector;

pub use body::{Body, Color};
pub use collision::{CollisionPolicy, RemovalReason};
pub use config::SimulationConfig;
pub use error::SimError;
pub use integrator::{ExplicitEuler, Integrator, IntegratorKind, VelocityVerlet};
pub use simulation::{ArchivedTrail, Simulation};
pub use spawn::{SpawnGesture, SpawnTemplate};
pub use vector::{Vector2, Vector2Ext};
