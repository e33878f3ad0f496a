//! PadaServer - indoor positioning daemon
//!
//! ## Usage
//!
//! ```text
//! pada-server [--config pada.toml] [--bind 0.0.0.0:5000] [--output output]
//! ```
//!
//! Without `--config`, `pada.toml` in the working directory is used when it
//! exists, otherwise built-in defaults. Logging follows `RUST_LOG`
//! (default `info`).

use clap::Parser;
use pada::{FloorPlan, Localizer};
use pada_server::{Result, Server, ServerConfig, ServerError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

const DEFAULT_CONFIG: &str = "pada.toml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// UDP bind address, overrides the configuration
    #[arg(short, long)]
    bind: Option<String>,

    /// Trajectory output directory, overrides the configuration
    #[arg(short, long)]
    output: Option<String>,
}

fn load_config(args: &Args) -> Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            ServerConfig::load(path)?
        }
        None if Path::new(DEFAULT_CONFIG).exists() => {
            log::info!("Loading configuration from {}", DEFAULT_CONFIG);
            ServerConfig::load(Path::new(DEFAULT_CONFIG))?
        }
        None => {
            log::info!("Using default configuration");
            ServerConfig::default()
        }
    };

    if let Some(bind) = &args.bind {
        config.network.bind_address = bind.clone();
    }
    if let Some(output) = &args.output {
        config.output.trajectory_dir = output.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("PadaServer v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;
    let engine = &config.engine;
    log::info!(
        "Filter: {} Hz cutoff at {} Hz, threshold {}, heading {:?}",
        engine.signal.cutoff_step_frequency,
        engine.signal.sampling_frequency,
        engine.steps.acceleration_threshold,
        engine.heading.strategy
    );

    let floor_plan = Arc::new(FloorPlan::load(&engine.floor_plan)?);
    log::info!(
        "Floor plan {}x{} ({:?} units), {} landmarks",
        floor_plan.grid().width(),
        floor_plan.grid().height(),
        floor_plan.units(),
        floor_plan.landmarks().len()
    );

    let localizer = Localizer::new(engine, floor_plan)?;
    let mut server = Server::bind(&config, localizer)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| ServerError::Config(format!("Error setting Ctrl-C handler: {}", e)))?;

    log::info!("PadaServer running. Press Ctrl-C to stop.");
    server.run(running)
}
