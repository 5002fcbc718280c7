//! Behavioural tests for the engine through its public API.

use gravity_sandbox::forces::{gravity_acceleration, total_energy};
use gravity_sandbox::{
    Body, IntegratorKind, Simulation, SimulationConfig, Vector2, Vector2Ext,
};

fn config_with(kind: IntegratorKind, dt: f64) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.physics.integrator = kind;
    config.physics.dt = dt;
    config
}

/// Two equal masses mirrored about the origin, launched at `fraction` of the
/// circular-orbit speed.
fn mirrored_pair(fraction: f64) -> Vec<Body> {
    let mass: f64 = 1000.0;
    let half_separation: f64 = 50.0;
    // a = m / (2r)², v² = a r
    let accel = mass / (2.0 * half_separation).powi(2);
    let speed = fraction * (accel * half_separation).sqrt();

    vec![
        Body::new(mass, 1.0, Vector2::new(half_separation, 0.0), Vector2::new(0.0, speed)),
        Body::new(mass, 1.0, Vector2::new(-half_separation, 0.0), Vector2::new(0.0, -speed)),
    ]
}

fn circular_pair() -> Vec<Body> {
    mirrored_pair(1.0)
}

fn max_relative_energy_error(kind: IntegratorKind, dt: f64, frames: usize) -> f64 {
    // eccentric, so the radial motion exposes first-order energy error
    let mut sim = Simulation::with_bodies(mirrored_pair(0.8), &config_with(kind, dt));
    let initial = sim.total_energy();

    let mut worst = 0.0f64;
    for _ in 0..frames {
        sim.step();
        assert_eq!(sim.bodies().len(), 2, "{kind} lost a body");
        worst = worst.max(((sim.total_energy() - initial) / initial).abs());
    }
    worst
}

#[test]
fn test_force_law_magnitude_and_direction() {
    let cases = [
        (7.0, Vector2::new(1.0, -2.0), Vector2::new(4.0, 2.0)),
        (0.5, Vector2::new(-10.0, 3.0), Vector2::new(2.0, -6.0)),
        (1e5, Vector2::new(0.0, 0.0), Vector2::new(0.0, 175.0)),
    ];

    for (mass, target, source_pos) in cases {
        let source = Body::new(mass, 1.0, source_pos, Vector2::zero());
        let acted_on = Body::new(3.0, 1.0, target, Vector2::zero());

        let a = gravity_acceleration(&source, &acted_on).unwrap();
        let r = source_pos - target;
        let expected_magnitude = mass / r.mag_sq();

        assert!((a.mag() - expected_magnitude).abs() <= 1e-12 * expected_magnitude.max(1.0));
        let direction = a.unit().unwrap();
        let toward_source = r.unit().unwrap();
        assert!((direction - toward_source).mag() < 1e-12);
    }
}

#[test]
fn test_symmetric_pair_stays_symmetric() {
    for kind in IntegratorKind::ALL {
        let mut sim = Simulation::with_bodies(circular_pair(), &config_with(kind, 0.5));
        for _ in 0..2000 {
            sim.step();
            let bodies = sim.bodies();
            assert_eq!(bodies.len(), 2);
            assert!((bodies[0].pos + bodies[1].pos).mag() < 1e-9, "{kind} position asymmetry");
            assert!((bodies[0].vel + bodies[1].vel).mag() < 1e-9, "{kind} velocity asymmetry");
        }
    }
}

#[test]
fn test_verlet_conserves_energy_better_than_euler() {
    let euler = max_relative_energy_error(IntegratorKind::ExplicitEuler, 0.25, 4000);
    let verlet = max_relative_energy_error(IntegratorKind::VelocityVerlet, 0.25, 4000);

    assert!(verlet < 1e-2, "Verlet energy error too large: {verlet}");
    assert!(
        verlet * 5.0 < euler,
        "Verlet ({verlet}) should drift markedly less than Euler ({euler})"
    );
}

#[test]
fn test_massless_body_exerts_no_force() {
    for kind in IntegratorKind::ALL {
        let heavy = Body::new(500.0, 1.0, Vector2::new(0.0, 0.0), Vector2::zero());
        let particle = Body::new(0.0, 1.0, Vector2::new(20.0, 0.0), Vector2::zero());
        let mut sim = Simulation::with_bodies(vec![heavy, particle], &config_with(kind, 0.1));

        for _ in 0..10 {
            sim.step();
        }

        let bodies = sim.bodies();
        assert_eq!(bodies[0].pos, Vector2::zero(), "{kind} moved the heavy body");
        assert_eq!(bodies[0].vel, Vector2::zero());
        assert!(bodies[1].vel.x < 0.0, "{kind} did not pull the test particle");
        assert!(bodies[1].pos.x < 20.0);
    }
}

#[test]
fn test_lighter_body_within_radius_is_removed_without_merge() {
    let a = Body::new(1.0, 2.0, Vector2::new(1.0, 0.0), Vector2::new(0.0, 9.0));
    let b = Body::new(5.0, 3.0, Vector2::new(0.0, 0.0), Vector2::new(0.5, 0.0));
    let mut sim = Simulation::with_bodies(vec![a, b], &SimulationConfig::default());

    sim.step();

    let bodies = sim.bodies();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0].mass, 5.0);
    assert_eq!(bodies[0].radius, 3.0);
    // no momentum from the absorbed body and no pull from it either
    assert_eq!(bodies[0].vel, Vector2::new(0.5, 0.0));
}

#[test]
fn test_equal_mass_contact_leaves_one_survivor() {
    let bodies = vec![
        Body::new(1e5, 12.0, Vector2::new(5.0, 0.0), Vector2::zero()),
        Body::new(1e5, 12.0, Vector2::new(-5.0, 0.0), Vector2::zero()),
    ];
    let mut sim = Simulation::with_bodies(bodies, &SimulationConfig::default());

    sim.step();

    assert_eq!(sim.bodies().len(), 1);
    assert_eq!(sim.bodies()[0].mass, 1e5);
    assert!((sim.bodies()[0].pos.x + 5.0).abs() < 1e-12);
}

#[test]
fn test_absorbed_body_cannot_absorb_others() {
    let bodies = vec![
        Body::new(5.0, 3.0, Vector2::new(0.0, 0.0), Vector2::zero()),
        Body::new(1.0, 1.0, Vector2::new(-2.0, 0.0), Vector2::zero()),
        Body::new(10.0, 1.5, Vector2::new(1.0, 0.0), Vector2::zero()),
    ];
    let mut sim = Simulation::with_bodies(bodies, &SimulationConfig::default());

    sim.step();

    let masses: Vec<f64> = sim.bodies().iter().map(|b| b.mass).collect();
    assert_eq!(masses, vec![1.0, 10.0]);
}

#[test]
fn test_far_body_is_removed_regardless_of_others() {
    let config = SimulationConfig::default();
    let far = Body::new(1e12, 50.0, Vector2::new(3.0 * config.viewport.width, 0.0), Vector2::zero());
    let near = Body::new(1.0, 1.0, Vector2::new(10.0, 0.0), Vector2::zero());
    let mut sim = Simulation::with_bodies(vec![far, near], &config);

    sim.step();

    assert_eq!(sim.bodies().len(), 1);
    assert_eq!(sim.bodies()[0].mass, 1.0);
    // the removed body did not attract the survivor
    assert_eq!(sim.bodies()[0].vel, Vector2::zero());
}

#[test]
fn test_spawn_velocity_from_drag() {
    let mut config = SimulationConfig::default();
    config.physics.dt = 0.5;
    let mut sim = Simulation::with_bodies(Vec::new(), &config);

    sim.spawn_begin(Vector2::new(0.0, 0.0)).unwrap();
    for _ in 0..6 {
        sim.step();
    }
    assert_eq!(sim.time(), 3.0);
    sim.spawn_end(Vector2::new(30.0, 0.0)).unwrap();

    let body = &sim.bodies()[0];
    assert!((body.vel.x - 10.0 / 3.0).abs() < 1e-12);
    assert_eq!(body.vel.y, 0.0);
    assert_eq!(body.pos, Vector2::zero());
    assert_eq!(body.mass, config.spawn.mass);
}

#[test]
fn test_trail_toggle_clears_and_flips() {
    let mut sim = Simulation::new();
    assert!(!sim.trails_enabled());

    sim.toggle_trails();
    for _ in 0..5 {
        sim.step();
    }
    assert!(sim.bodies().iter().all(|b| b.trail.len() == 5));

    // bodies added later follow the global setting
    sim.add_body(Body::new(1.0, 1.0, Vector2::new(0.0, 300.0), Vector2::zero()));
    assert!(sim.bodies()[2].trail_enabled);

    sim.toggle_trails();
    assert!(!sim.trails_enabled());
    assert!(sim.bodies().iter().all(|b| b.trail.is_empty() && !b.trail_enabled));
    assert!(sim.deleted_trails().is_empty());

    sim.spawn_begin(Vector2::new(0.0, -300.0)).unwrap();
    sim.step();
    sim.spawn_end(Vector2::new(1.0, -300.0)).unwrap();
    sim.step();
    assert!(sim.bodies().iter().all(|b| b.trail.is_empty()));
}

#[test]
fn test_time_factor_matches_repeated_steps() {
    let mut fast_config = config_with(IntegratorKind::VelocityVerlet, 0.1);
    fast_config.physics.time_factor = 5;
    let mut fast = Simulation::with_bodies(circular_pair(), &fast_config);
    let mut slow = Simulation::with_bodies(
        circular_pair(),
        &config_with(IntegratorKind::VelocityVerlet, 0.1),
    );

    fast.step();
    for _ in 0..5 {
        slow.step();
    }

    assert_eq!(fast.frame(), 1);
    assert_eq!(slow.frame(), 5);
    assert!((fast.time() - slow.time()).abs() < 1e-12);
    assert_eq!(fast.bodies(), slow.bodies());
}

#[test]
fn test_default_scene_runs_without_losing_energy_wildly() {
    let mut sim = Simulation::new();
    let initial = total_energy(sim.bodies());
    for _ in 0..500 {
        sim.step();
    }
    assert_eq!(sim.bodies().len(), 2);
    let drift = ((sim.total_energy() - initial) / initial).abs();
    assert!(drift < 1e-2, "drift {drift}");
}
