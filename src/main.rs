//! Heart Catch headless runner
//!
//! Plays one seeded session at 60 fps with the autopilot and reports the
//! result. Useful for tuning: point it at a config file and watch the log.
//!
//! Usage: heart-catch [config.json] [--seed N] [--json]

use std::path::PathBuf;

use clap::Parser;
use heart_catch::render::Snapshot;
use heart_catch::{Autopilot, GameConfig, GameLoop, LogRenderer};

const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play one headless Heart Catch session with the autopilot")]
struct Args {
    /// JSON config file (missing fields use defaults)
    config: Option<PathBuf>,
    /// Override the RNG seed from the config
    #[arg(long)]
    seed: Option<u64>,
    /// Print the final snapshot as JSON instead of the score line
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path),
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    log::info!("Heart Catch (headless) starting with seed {}", config.seed);

    let mut game = GameLoop::new(&config, LogRenderer::new());
    let mut pilot = Autopilot::new();
    let score = game.run_session(0.0, FRAME_MS, Some(&mut pilot));

    log::info!("Played {} frames, final score {}", game.frames(), score);

    if args.json {
        match serde_json::to_string_pretty(&Snapshot::capture(game.session())) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize snapshot: {}", e),
        }
    } else {
        println!("Final score: {}", score);
    }
}
