//! Oracle Walk
//!
//! A demo session driver: cast readings, walk the resulting plans over
//! the spiral grid, and report the Qi/Jing economy as it reacts.

use clap::Parser;
use std::path::PathBuf;

use walk_core::config::EngineConfig;
use walk_core::hexagrams;
use walk_core::logger::EventLogger;
use walk_core::map_data::SpiralMap;
use walk_core::store::{CastOutcome, Engine};

/// Command line arguments for the session driver
#[derive(Parser, Debug)]
#[command(name = "oracle_walk")]
#[command(about = "A divination-driven hex-grid walking engine")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of readings to cast
    #[arg(long, default_value_t = 6)]
    readings: u64,

    /// Path to a TOML engine configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to persisted spiral map data (JSON)
    #[arg(long)]
    map_data: Option<PathBuf>,

    /// Write engine events as JSONL to this path
    #[arg(long)]
    events_out: Option<PathBuf>,

    /// Reset casting state automatically at end of reading
    #[arg(long)]
    auto: bool,
}

fn hexagram_name(binary: &str) -> &'static str {
    hexagrams::by_binary(binary).map(|h| h.name).unwrap_or("?")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Could not load config: {}", e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    if args.auto {
        config.behavior.auto_mode = true;
    }

    println!("Oracle Walk");
    println!("===========");
    println!("Seed: {}", args.seed);
    println!("Readings: {}", args.readings);
    println!("Grid radius: {}", config.grid.radius);
    println!();

    let mut engine = Engine::new(config, args.seed);

    if let Some(path) = &args.map_data {
        engine.set_map(SpiralMap::load(path));
        println!(
            "Loaded map data: {} tagged cells, {} aspect gates",
            engine.map().len(),
            engine.known_gates().len()
        );
        println!();
    }

    let mut logger = match &args.events_out {
        Some(path) => match EventLogger::new(path) {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("Warning: could not open event log: {}", e);
                EventLogger::null()
            }
        },
        None => EventLogger::null(),
    };

    for reading_no in 1..=args.readings {
        match engine.cast_reading() {
            CastOutcome::PlanReady(reading) => {
                println!(
                    "[Reading {:>2}] {} -> {} (changing lines: {:?})",
                    reading_no,
                    hexagram_name(&reading.earthly),
                    hexagram_name(&reading.heavenly),
                    reading.changing_lines
                );
                engine.advance_all().await;
            }
            CastOutcome::Degenerate(reading) => {
                println!(
                    "[Reading {:>2}] {} holds still; no movement",
                    reading_no,
                    hexagram_name(&reading.earthly)
                );
            }
            CastOutcome::Held(_) | CastOutcome::Busy => {}
        }

        let events = engine.drain_events();
        if let Err(e) = logger.log_batch(&events) {
            eprintln!("Warning: could not log events: {}", e);
        }

        let counters = engine.counters();
        let actor = engine.actor();
        println!(
            "             actor ({}, {})  qi {}  jing {}  interval {}",
            actor.q, actor.r, counters.qi, counters.jing, counters.consulting_interval
        );
    }

    if let Err(e) = logger.flush() {
        eprintln!("Warning: could not flush event log: {}", e);
    }

    println!();
    println!(
        "Session complete. {} readings, {} events.",
        args.readings,
        logger.event_count()
    );
}
