use crate::body::{Body, Color};
use crate::config::ScenarioConfig;
use crate::vector::{Vector2, Vector2Ext};

/// Builds the bodies described by a scenario.
pub fn build_scenario(scenario: &ScenarioConfig) -> Vec<Body> {
    match *scenario {
        ScenarioConfig::BinaryPair => binary_pair(),
        ScenarioConfig::UniformDisc { count, seed } => uniform_disc(count, seed),
    }
}

/// Two equal heavy bodies on opposite sides of the origin, moving in opposite
/// directions so that they fall into a mutual orbit.
pub fn binary_pair() -> Vec<Body> {
    let mass = 100_000.0;
    let radius = 12.0;

    vec![
        Body::new(
            mass,
            radius,
            Vector2::from_cartesian(175.0, 0.0),
            Vector2::from_polar(10.0, 90f64.to_radians()),
        )
        .with_color(Color::ORANGE),
        Body::new(
            mass,
            radius,
            Vector2::from_cartesian(-175.0, 0.0),
            Vector2::from_polar(10.0, 270f64.to_radians()),
        )
        .with_color(Color::BLACK),
    ]
}

/// Generates `n` bodies: a heavy central star and `n - 1` light bodies spread
/// uniformly over an annulus, each on a circular orbit around the mass inside it.
/// The same `seed` always yields the same bodies.
pub fn uniform_disc(n: usize, seed: u64) -> Vec<Body> {
    if n == 0 {
        return Vec::new();
    }

    let mut rng = fastrand::Rng::with_seed(seed);
    let inner_radius = 40.0;
    let outer_radius = 80.0 + (n as f64).sqrt() * 25.0;

    let mut bodies: Vec<Body> = Vec::with_capacity(n);
    bodies.push(Body::new(50_000.0, 15.0, Vector2::zero(), Vector2::zero()).with_color(Color::ORANGE));

    while bodies.len() < n {
        let angle = rng.f64() * std::f64::consts::TAU;

        // Uniform in area between the inner and outer radius
        let t = inner_radius / outer_radius;
        let r = outer_radius * (rng.f64() * (1.0 - t * t) + t * t).sqrt();

        let mass = 1.0 + rng.f64() * 9.0;
        let body = Body::new(
            mass,
            mass.cbrt(),
            Vector2::from_polar(r, angle),
            // unit tangent, scaled once the enclosed mass is known
            Vector2::from_polar(1.0, angle + std::f64::consts::FRAC_PI_2),
        );
        bodies.push(body);
    }

    bodies.sort_by(|a, b| a.pos.mag_sq().total_cmp(&b.pos.mag_sq()));

    let mut enclosed = 0.0;
    for body in &mut bodies {
        enclosed += body.mass;
        let r = body.pos.mag();
        if r == 0.0 {
            continue;
        }
        // v = sqrt(M / r) with G = 1
        body.vel *= (enclosed / r).sqrt();
    }

    bodies
}
