//! # Shopspawn Simulator
//!
//! Runs one simulated level through the spawner: catalog initialization,
//! population passes, a random haul into the extraction point and settlement.

use clap::Parser;
use log::info;
use shopspawn::simulation::{simulate_level, SimulationOptions};
use shopspawn::{
    ParticipantRole, PopulationReport, SettlementReport, SpawnCategory, SpawnConfig, SpawnResult,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Command line arguments for the simulator.
#[derive(Parser, Debug)]
#[command(name = "shopspawn")]
#[command(about = "Simulates bonus shop item spawning and extraction for one level")]
#[command(version)]
struct Args {
    /// Random seed for the level and the spawn rolls
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of valuable volumes in the generated level
    #[arg(long, default_value_t = 400)]
    volumes: usize,

    /// How many times the host signals level setup
    #[arg(long, default_value_t = 2)]
    setup_passes: u32,

    /// Share of spawned items hauled to the extraction point (0.0 to 1.0)
    #[arg(long, default_value_t = 0.5)]
    extraction_share: f64,

    /// Run as the host of a multiplayer session
    #[arg(long)]
    multiplayer: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> SpawnResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;
    info!("Starting shopspawn simulator v{}", shopspawn::VERSION);

    run(&args)
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> SpawnResult<()> {
    env_logger::Builder::new()
        .parse_filters(log_level)
        .format_target(false)
        .try_init()?;
    Ok(())
}

fn run(args: &Args) -> SpawnResult<()> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            SpawnConfig::load(path)?
        }
        None => SpawnConfig::default(),
    };

    let options = SimulationOptions {
        seed: args.seed.unwrap_or_else(rand::random),
        volumes: args.volumes,
        setup_passes: args.setup_passes,
        extraction_share: args.extraction_share,
        role: if args.multiplayer {
            ParticipantRole::MultiplayerHost
        } else {
            ParticipantRole::Singleplayer
        },
    };

    info!(
        "Generating level with {} volumes, seed {}",
        options.volumes, options.seed
    );
    let outcome = simulate_level(config, &options)?;

    for (pass, report) in outcome.populations.iter().enumerate() {
        print_population(pass + 1, report);
    }
    print_settlement(&outcome.settlement, &outcome.purchases);

    info!("Simulation finished");
    Ok(())
}

fn print_population(pass: usize, report: &PopulationReport) {
    println!("Population pass {}", pass);
    if let Some(reason) = report.skipped {
        println!("  skipped: {:?}", reason);
        return;
    }
    println!(
        "  locations: {} enumerated, {} already processed, {} under switches, {} ineligible",
        report.candidates, report.already_seen, report.switch_attached, report.ineligible
    );
    for category in SpawnCategory::all() {
        let tally = report.tally(category);
        println!(
            "  {:<8} {} volumes, {} attempted, {} spawned",
            category.label(),
            tally.volumes,
            tally.attempted,
            tally.spawned
        );
    }
    println!(
        "  spawned {} items ({} without item, {} failed)",
        report.spawned_count(),
        report.no_item,
        report.spawn_failed
    );
}

fn print_settlement(report: &SettlementReport, purchases: &[String]) {
    println!("Extraction");
    if let Some(reason) = report.skipped {
        println!("  skipped: {:?}", reason);
        return;
    }
    println!(
        "  {} tracked, {} settled, {} left in the level, {} gone",
        report.tracked,
        report.settled_count(),
        report.untouched,
        report.vanished
    );

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for name in purchases {
        *counts.entry(name.as_str()).or_insert(0) += 1;
    }
    for (name, count) in counts {
        println!("  purchased {} x{}", name, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_can_only_be_installed_once() {
        let first = initialize_logging("warn");
        assert!(first.is_ok());
        assert!(initialize_logging("warn").is_err());
    }
}
