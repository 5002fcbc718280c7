use crate::body::Color;
use crate::collision::CollisionPolicy;
use crate::error::SimError;
use crate::integrator::IntegratorKind;
use crate::spawn::{DRAG_VELOCITY_DIVISOR, SpawnTemplate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub viewport: ViewportConfig,
    pub spawn: SpawnConfig,
    pub trails: TrailConfig,
    pub scenario: ScenarioConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed integrator step.
    pub dt: f64,
    /// Integrator invocations per `step()` call.
    pub time_factor: u32,
    pub integrator: IntegratorKind,
    /// Bodies beyond this multiple of the viewport extent are dropped.
    pub bound_factor: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            dt: 0.05,
            time_factor: 1,
            integrator: IntegratorKind::VelocityVerlet,
            bound_factor: 2.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub mass: f64,
    pub radius: f64,
    pub drag_divisor: f64,
    pub color: Color,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            mass: 2000.0,
            radius: 2.0,
            drag_divisor: DRAG_VELOCITY_DIVISOR,
            color: Color::WHITE,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct TrailConfig {
    pub enabled: bool,
    /// Oldest points are dropped past this many. Unbounded when absent.
    pub max_points: Option<usize>,
}

/// Initial conditions.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioConfig {
    /// Two heavy bodies in a mutual orbit.
    #[default]
    BinaryPair,
    /// A heavy central body surrounded by a disc of light bodies.
    UniformDisc { count: usize, seed: u64 },
}

impl SpawnConfig {
    pub fn template(&self) -> SpawnTemplate {
        SpawnTemplate {
            mass: self.mass,
            radius: self.radius,
            color: self.color,
            drag_divisor: self.drag_divisor,
        }
    }
}

impl SimulationConfig {
    pub fn collision_policy(&self) -> CollisionPolicy {
        CollisionPolicy::from_viewport(
            self.viewport.width,
            self.viewport.height,
            self.physics.bound_factor,
        )
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SimError> {
        toml::from_str(content).map_err(|e| SimError::ConfigLoad(e.to_string()))
    }

    /// Load configuration from a file.
    pub fn load(path: &str) -> Result<Self, SimError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SimError::ConfigLoad(format!("{path}: {e}")))?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path);
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse config file {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path);
                Self::default()
            }
        }
    }

    pub fn to_toml_string(&self) -> Result<String, SimError> {
        toml::to_string_pretty(self).map_err(|e| SimError::ConfigLoad(e.to_string()))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
