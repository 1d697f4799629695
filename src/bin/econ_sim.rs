//! Headless Economy Runner
//!
//! Generates a seeded county world, runs production and consumption for a
//! number of days, and writes a JSON report.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use county_economy::core::error::Result;
use county_economy::core::EconomyConfig;
use county_economy::economy::{EconomyDefs, FacilityRegistry, GoodsCatalog};
use county_economy::log::{EventLog, LogDomain, LogFilter, LogLevel, TracingSink};
use county_economy::report::{DaySnapshot, EconomyReport};
use county_economy::systems::{ConsumptionSystem, ProductionSystem, Scheduler};
use county_economy::worldgen::{generate_world, WorldGenConfig};

/// Headless Economy Runner - daily production and consumption over a generated world
#[derive(Parser, Debug)]
#[command(name = "econ_sim")]
#[command(about = "Run the county economy for a number of days and report the outcome")]
struct Args {
    /// Days to simulate
    #[arg(long, default_value_t = 360)]
    days: u64,

    /// Number of counties to generate
    #[arg(long, default_value_t = 12)]
    counties: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Goods and facility definitions (built-in defaults when omitted)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Economy tuning file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Include per-county debug events
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Directives used when `RUST_LOG` is unset
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "county_economy=debug,econ_sim=debug"
    } else {
        "county_economy=info,econ_sim=info"
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives(args.verbose))),
        )
        .init();
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = match &args.config {
        Some(path) => EconomyConfig::load_from_toml(path)?,
        None => EconomyConfig::default(),
    };
    let defs = match &args.data {
        Some(path) => EconomyDefs::load_from_toml(path)?,
        None => EconomyDefs {
            goods: GoodsCatalog::with_defaults(),
            facility_types: FacilityRegistry::with_defaults(),
        },
    };
    tracing::info!(
        goods = defs.goods.len(),
        facility_types = defs.facility_types.len(),
        seed,
        "economy definitions loaded"
    );

    let world_config = WorldGenConfig {
        counties: args.counties,
        ..WorldGenConfig::default()
    };
    let (state, map) = generate_world(&world_config, defs, &config, ChaCha8Rng::seed_from_u64(seed));

    let mut log = EventLog::with_filter(LogFilter {
        domains: LogDomain::ALL,
        min_level: if args.verbose { LogLevel::Debug } else { LogLevel::Info },
    });
    log.subscribe(Arc::new(TracingSink));

    let mut scheduler = Scheduler::with_state(state, Box::new(map), log.clone());
    scheduler.add_system(Box::new(ProductionSystem::new(log.clone(), &config)));
    scheduler.add_system(Box::new(ConsumptionSystem::new(log, &config)));
    scheduler.initialize();

    let start = std::time::Instant::now();
    let mut timeline = Vec::new();
    for _ in 0..args.days {
        scheduler.run_day();
        let day = scheduler.current_day();
        if day % config.summary_interval_days == 0 {
            if let Some(state) = scheduler.state() {
                timeline.push(DaySnapshot::capture(state, day));
            }
        }
    }
    tracing::info!(days = args.days, elapsed_ms = start.elapsed().as_millis() as u64, "run complete");

    let Some(state) = scheduler.state() else {
        tracing::warn!("no economy state after run; nothing to report");
        return Ok(());
    };
    let report = EconomyReport::new(state, scheduler.calendar(), timeline);

    let rendered = match args.format.as_str() {
        "text" => report.summary(),
        _ => report.to_json()?,
    };
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn test_verbose_flag_enables_debug_events() {
        let args = Args::try_parse_from(["econ_sim", "--verbose"]).unwrap();
        assert!(args.verbose);

        let filter = EnvFilter::new(default_directives(args.verbose));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_default_run_logs_at_info() {
        let args = Args::try_parse_from(["econ_sim"]).unwrap();
        assert!(!args.verbose);

        let filter = EnvFilter::new(default_directives(args.verbose));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
