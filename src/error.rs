use std::fmt;

/// Errors raised by the engine.
///
/// The physics variants come from exact numeric coincidence or pathological
/// input. The engine degrades them to "body removed" or "spawn ignored" and
/// keeps running; they are still reported to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A zero-length vector was asked for its unit direction.
    DegenerateVector,
    /// A spawn drag was released at the same simulation time it was pressed.
    DegenerateGesture,
    /// A press arrived while a previous spawn was still pending.
    SpawnInProgress,
    /// A release arrived with no spawn pending.
    NoPendingSpawn,
    /// Configuration file could not be read or parsed.
    ConfigLoad(String),
    /// Unknown integrator name.
    InvalidIntegrator(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::DegenerateVector => write!(f, "cannot normalize a zero-length vector"),
            SimError::DegenerateGesture => {
                write!(f, "spawn gesture released with zero elapsed simulation time")
            }
            SimError::SpawnInProgress => write!(f, "a spawn gesture is already pending"),
            SimError::NoPendingSpawn => write!(f, "no spawn gesture is pending"),
            SimError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            SimError::InvalidIntegrator(msg) => write!(f, "Invalid integrator: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}
