//! Headless Delve Runner
//!
//! Generates a world, runs the simulation for a number of fixed-rate ticks
//! and prints a summary (text or JSON). Useful for profiling, seed hunting
//! and checking config files without a renderer.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use delve::core::config::SimulationConfig;
use delve::core::error::Result;
use delve::simulation::{Intent, Simulation, SimulationEvent};

/// One tick at 60 Hz
const TICK_MS: u64 = 16;

/// Headless Delve Runner - run a world without a window
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "Generate a tile world and run the simulation headless")]
struct Args {
    /// World seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// World width in tiles
    #[arg(long, default_value_t = 150)]
    width: u32,

    /// World height in tiles
    #[arg(long, default_value_t = 80)]
    height: u32,

    /// Number of 16ms ticks to run
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// TOML config overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Walk the player right, jumping every half second
    #[arg(long)]
    walk: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Dump the final world as ASCII
    #[arg(long)]
    ascii: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("delve=info".parse().map_err(|e| {
                    delve::core::error::DelveError::Config(format!("bad log directive: {e}"))
                })?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    let mut sim = Simulation::new(args.seed, args.width, args.height, config)?;

    let mut respawns = 0;
    let mut kills = 0;
    let mut hits_taken = 0;
    for tick in 0..args.ticks {
        let intents: Vec<Intent> = if args.walk {
            if tick % 30 == 0 {
                vec![Intent::MoveRight, Intent::Jump]
            } else {
                vec![Intent::MoveRight]
            }
        } else {
            Vec::new()
        };

        for event in sim.tick(TICK_MS, &intents) {
            match event {
                SimulationEvent::PlayerDamaged { .. } => hits_taken += 1,
                SimulationEvent::PlayerRespawned { .. } => respawns += 1,
                SimulationEvent::EnemyKilled { .. } => kills += 1,
                _ => {}
            }
        }
    }

    info!(ticks = args.ticks, hits_taken, respawns, kills, "Run complete");

    let summary = sim.summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Delve Run");
        println!("=========");
        println!("Seed: {} ({}x{})", args.seed, args.width, args.height);
        println!("Ticks: {} ({} ms simulated)", summary.ticks, summary.elapsed_ms);
        println!("Clock: {} ({:?}, ambient {:.2})", summary.clock, summary.day_phase, summary.ambient_light);
        println!(
            "Player: {} hp at ({:.1}, {:.1})",
            summary.player_health, summary.player_position.x, summary.player_position.y
        );
        println!("Hits taken: {}  Respawns: {}", hits_taken, respawns);
        println!("Enemies alive: {}  Killed: {}", summary.enemies, kills);
        println!("Lava: {}  Torches: {}  Lamps: {}", summary.lava_tiles, summary.torches, summary.lamps);
    }

    if args.ascii {
        print!("{}", sim.grid().to_ascii());
    }

    Ok(())
}
