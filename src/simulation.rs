use crate::{
    body::{Body, Color},
    collision::{CollisionPolicy, RemovalReason},
    config::{ScenarioConfig, SimulationConfig},
    error::SimError,
    forces,
    integrator::IntegratorKind,
    spawn::{SpawnGesture, SpawnTemplate},
    utils,
    vector::Vector2,
};

use tracing::{debug, info, warn};

/// Trail left behind by a body that has been removed, kept for drawing only.
#[derive(Clone, Debug, PartialEq)]
pub struct ArchivedTrail {
    pub points: Vec<Vector2>,
    pub color: Color,
}

/// Owns all mutable simulation state: bodies, clock, archived trails and the
/// in-progress spawn gesture. The renderer only reads from it between steps.
#[derive(Debug)]
pub struct Simulation {
    /// Time step per integrator invocation.
    pub dt: f64,
    /// Integrator invocations per frame.
    pub time_factor: u32,
    pub integrator: IntegratorKind,
    pub policy: CollisionPolicy,
    /// Current simulation time.
    t: f64,
    /// Number of completed `step()` calls.
    frame: usize,
    bodies: Vec<Body>,
    deleted_trails: Vec<ArchivedTrail>,
    trails_enabled: bool,
    max_trail_points: Option<usize>,
    spawn: SpawnGesture,
    spawn_template: SpawnTemplate,
    /// Initial conditions rebuilt by `restart`.
    scenario: ScenarioConfig,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Initializes the default binary-pair scene with default parameters.
    pub fn new() -> Self {
        Self::from_config(&SimulationConfig::default())
    }

    /// Initializes a simulation with the scenario and parameters of `config`.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let bodies = utils::build_scenario(&config.scenario);
        Self::with_bodies(bodies, config)
    }

    /// Initializes a simulation with the given bodies and the parameters of `config`.
    pub fn with_bodies(mut bodies: Vec<Body>, config: &SimulationConfig) -> Self {
        let trails_enabled = config.trails.enabled;
        for body in &mut bodies {
            body.reset_trail(trails_enabled);
        }

        info!(
            bodies = bodies.len(),
            integrator = %config.physics.integrator,
            dt = config.physics.dt,
            "simulation created"
        );

        Self {
            dt: config.physics.dt,
            time_factor: config.physics.time_factor,
            integrator: config.physics.integrator,
            policy: config.collision_policy(),
            t: 0.0,
            frame: 0,
            bodies,
            deleted_trails: Vec::new(),
            trails_enabled,
            max_trail_points: config.trails.max_points,
            spawn: SpawnGesture::Idle,
            spawn_template: config.spawn.template(),
            scenario: config.scenario.clone(),
        }
    }

    /// Replaces every body and restarts the clock, keeping the parameters.
    pub fn reset(&mut self, mut bodies: Vec<Body>) {
        for body in &mut bodies {
            body.reset_trail(self.trails_enabled);
        }
        self.bodies = bodies;
        self.deleted_trails.clear();
        self.spawn = SpawnGesture::Idle;
        self.t = 0.0;
        self.frame = 0;
        info!(bodies = self.bodies.len(), "simulation reset");
    }

    /// Rebuilds the configured scenario and restarts the clock.
    pub fn restart(&mut self) {
        let bodies = utils::build_scenario(&self.scenario);
        self.reset(bodies);
    }

    /// Advances the simulation by one frame: `time_factor` integrator steps of
    /// `dt` each, followed by trail recording.
    pub fn step(&mut self) {
        for _ in 0..self.time_factor.max(1) {
            self.integrate();
        }

        let max_points = self.max_trail_points;
        for body in &mut self.bodies {
            body.record_trail(max_points);
        }
        self.frame += 1;
    }

    /// One integrator invocation: prune, then move the survivors.
    fn integrate(&mut self) {
        self.prune();
        self.integrator.integrator().advance(&mut self.bodies, self.dt);
        self.t += self.dt;
    }

    /// Removes every body the collision policy flags, archiving its trail.
    fn prune(&mut self) {
        let verdicts = self.policy.prune(&self.bodies);
        if verdicts.iter().all(Option::is_none) {
            return;
        }

        for (index, (body, verdict)) in self.bodies.iter_mut().zip(&verdicts).enumerate() {
            let Some(reason) = verdict else { continue };
            log_removal(index, body, reason);

            if self.trails_enabled && !body.trail.is_empty() {
                self.deleted_trails.push(ArchivedTrail {
                    points: std::mem::take(&mut body.trail),
                    color: body.color,
                });
            }
        }

        let mut verdicts = verdicts.into_iter();
        self.bodies
            .retain(|_| verdicts.next().is_some_and(|verdict| verdict.is_none()));
    }

    /// Presses at `position`: places a motionless pending body.
    pub fn spawn_begin(&mut self, position: Vector2) -> Result<(), SimError> {
        self.spawn
            .begin(position, self.t, &self.spawn_template)
            .inspect_err(|err| warn!(%err, "spawn press ignored"))
    }

    /// Releases at `position`: gives the pending body its drag velocity and
    /// inserts it into the simulation.
    pub fn spawn_end(&mut self, position: Vector2) -> Result<(), SimError> {
        let body = self
            .spawn
            .end(position, self.t)
            .inspect_err(|err| warn!(%err, "spawn release ignored"))?;

        debug!(pos = ?body.pos, vel = ?body.vel, mass = body.mass, "spawned body");
        self.add_body(body);
        Ok(())
    }

    /// Inserts a body; its trail follows the simulation-wide trail setting.
    pub fn add_body(&mut self, mut body: Body) {
        body.reset_trail(self.trails_enabled);
        self.bodies.push(body);
    }

    /// Flips trail recording for every body and forgets all recorded trails,
    /// including those of removed bodies.
    pub fn toggle_trails(&mut self) {
        self.trails_enabled = !self.trails_enabled;
        self.deleted_trails.clear();
        for body in &mut self.bodies {
            body.reset_trail(self.trails_enabled);
        }
        debug!(enabled = self.trails_enabled, "trails toggled");
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Body placed by an unfinished spawn gesture. Drawn, but not simulated.
    pub fn pending_body(&self) -> Option<&Body> {
        self.spawn.pending_body()
    }

    pub fn deleted_trails(&self) -> &[ArchivedTrail] {
        &self.deleted_trails
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn trails_enabled(&self) -> bool {
        self.trails_enabled
    }

    /// Total mechanical energy of the live bodies.
    pub fn total_energy(&self) -> f64 {
        forces::total_energy(&self.bodies)
    }
}

fn log_removal(index: usize, body: &Body, reason: &RemovalReason) {
    match reason {
        RemovalReason::Absorbed { by } => {
            debug!(index, by, mass = body.mass, "body absorbed")
        }
        RemovalReason::Coincident { with } => {
            debug!(index, with, mass = body.mass, "body removed at coincident position")
        }
        RemovalReason::OutOfBounds => {
            debug!(index, pos = ?body.pos, "body left the tracked region")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim_with(bodies: Vec<Body>) -> Simulation {
        Simulation::with_bodies(bodies, &SimulationConfig::default())
    }

    #[test]
    fn test_clock_advances_by_dt_per_invocation() {
        let mut config = SimulationConfig::default();
        config.physics.dt = 0.25;
        config.physics.time_factor = 4;
        let mut sim = Simulation::with_bodies(Vec::new(), &config);

        sim.step();
        assert_eq!(sim.time(), 1.0);
        assert_eq!(sim.frame(), 1);
    }

    #[test]
    fn test_prune_keeps_survivor_order() {
        let bodies = vec![
            Body::new(1.0, 1.0, Vector2::new(0.0, 0.0), Vector2::zero()),
            Body::new(1.0, 1.0, Vector2::new(5000.0, 0.0), Vector2::zero()),
            Body::new(2.0, 1.0, Vector2::new(100.0, 0.0), Vector2::zero()),
            Body::new(3.0, 1.0, Vector2::new(-100.0, 0.0), Vector2::zero()),
        ];
        let mut sim = sim_with(bodies);
        sim.prune();

        let masses: Vec<f64> = sim.bodies().iter().map(|b| b.mass).collect();
        assert_eq!(masses, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_removed_trail_is_archived() {
        let mut config = SimulationConfig::default();
        config.trails.enabled = true;
        let bodies = vec![
            Body::new(1.0, 1.0, Vector2::new(1000.0, 0.0), Vector2::new(1000.0, 0.0))
                .with_color(Color::ORANGE),
        ];
        let mut sim = Simulation::with_bodies(bodies, &config);

        // moves from 1000 to 1050: still inside, trail gets a point
        sim.step();
        assert_eq!(sim.bodies()[0].trail.len(), 1);

        for _ in 0..20 {
            sim.step();
        }
        assert!(sim.bodies().is_empty());
        assert_eq!(sim.deleted_trails().len(), 1);
        assert_eq!(sim.deleted_trails()[0].color, Color::ORANGE);
        assert!(!sim.deleted_trails()[0].points.is_empty());
    }

    #[test]
    fn test_pending_body_is_not_simulated() {
        let mut sim = sim_with(Vec::new());
        sim.spawn_begin(Vector2::new(10.0, 10.0)).unwrap();
        sim.step();

        assert!(sim.bodies().is_empty());
        assert_eq!(sim.pending_body().unwrap().pos, Vector2::new(10.0, 10.0));

        sim.spawn_end(Vector2::new(10.0, 10.0)).unwrap();
        assert!(sim.pending_body().is_none());
        assert_eq!(sim.bodies().len(), 1);
        assert_eq!(sim.bodies()[0].vel, Vector2::zero());
    }

    #[test]
    fn test_immediate_release_is_ignored() {
        let mut sim = sim_with(Vec::new());
        sim.spawn_begin(Vector2::zero()).unwrap();
        assert_eq!(
            sim.spawn_end(Vector2::new(5.0, 0.0)),
            Err(SimError::DegenerateGesture)
        );
        assert!(sim.bodies().is_empty());
        assert!(sim.pending_body().is_none());
    }

    #[test]
    fn test_restart_rebuilds_configured_scenario() {
        let mut config = SimulationConfig::default();
        config.scenario = ScenarioConfig::UniformDisc { count: 6, seed: 9 };
        let mut sim = Simulation::from_config(&config);
        let initial = sim.bodies().to_vec();

        sim.add_body(Body::default());
        sim.step();
        sim.restart();

        assert_eq!(sim.time(), 0.0);
        assert_eq!(sim.bodies(), initial.as_slice());
    }

    #[test]
    fn test_reset() {
        let mut sim = Simulation::new();
        sim.step();
        sim.reset(utils::uniform_disc(5, 3));
        assert_eq!(sim.time(), 0.0);
        assert_eq!(sim.frame(), 0);
        assert_eq!(sim.bodies().len(), 5);
    }
}
