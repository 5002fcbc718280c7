use clap::Parser;
use gravity_sandbox::{IntegratorKind, SimError, Simulation, SimulationConfig, config::ScenarioConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless gravity sandbox: runs the simulation without a renderer and logs its progress
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 1000)]
    frames: usize,

    /// Log a summary every N frames
    #[arg(long, value_name = "N", default_value_t = 100)]
    report_every: usize,

    /// Integrator (euler, velocity_verlet)
    #[arg(short, long, value_name = "TYPE")]
    integrator: Option<String>,

    /// Start from a uniform disc of this many bodies instead of the configured scenario
    #[arg(short = 'n', long, value_name = "COUNT")]
    bodies: Option<usize>,

    /// Seed for the uniform disc
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Record trails
    #[arg(long)]
    trails: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<SimulationConfig, SimError> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(name) = &args.integrator {
        config.physics.integrator = name.parse::<IntegratorKind>()?;
    }
    if let Some(count) = args.bodies {
        config.scenario = ScenarioConfig::UniformDisc {
            count,
            seed: args.seed,
        };
    }
    if args.trails {
        config.trails.enabled = true;
    }

    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let mut sim = Simulation::from_config(&config);
    let initial_energy = sim.total_energy();
    let report_every = args.report_every.max(1);

    for _ in 0..args.frames {
        sim.step();

        if sim.frame() % report_every == 0 {
            let drift = (sim.total_energy() - initial_energy) / initial_energy.abs().max(f64::EPSILON);
            info!(
                frame = sim.frame(),
                t = sim.time(),
                bodies = sim.bodies().len(),
                removed_trails = sim.deleted_trails().len(),
                energy_drift = drift,
                "progress"
            );
        }
    }

    info!(
        frames = sim.frame(),
        t = sim.time(),
        bodies = sim.bodies().len(),
        "done"
    );
    Ok(())
}
