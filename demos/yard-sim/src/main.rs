//! yard-sim — run a marshalling-yard dispatch from two CSV tables.
//!
//! ```bash
//! # the classic run: narration on stdout
//! yard-sim --fleet data/theFleetFile.csv --yard data/theYardFile.csv
//!
//! # faster pacing, a departures log, and debug traces
//! RUST_LOG=yard_agent=debug yard-sim --backoff-delay 250 --departures departures.csv
//!
//! # 30 synthetic trains over the yard's tracks
//! yard-sim --random-fleet 30 --seed 7 --quiet
//! ```

mod settings;
mod synth;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use yard_agent::{NoopObserver, YardObserver, YardObserverExt};
use yard_dispatch::{DispatchReport, DispatcherBuilder};
use yard_layout::{FleetEntry, RouteRecord, load_fleet_csv, load_yard_csv};
use yard_output::{DepartureLog, NarrationObserver, TracingObserver};

use settings::ConfigFile;

/// Marshalling-yard dispatch simulator
///
/// Every train must lock the three switches of its route, in order, before it
/// may cross the yard.  Trains that cannot get all three back off and retry.
#[derive(Parser, Debug)]
#[command(name = "yard-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Fleet table: `train,inbound,outbound` per line
    #[arg(long, default_value = "theFleetFile.csv")]
    fleet: PathBuf,

    /// Yard table: `inbound,switch_1,switch_2,switch_3,outbound` per line
    #[arg(long, default_value = "theYardFile.csv")]
    yard: PathBuf,

    /// JSON configuration file (camelCase keys, durations in milliseconds)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wait for the first switch, in milliseconds
    #[arg(long)]
    first_switch_timeout: Option<u64>,

    /// Wait for the second switch, in milliseconds
    #[arg(long)]
    second_switch_timeout: Option<u64>,

    /// Wait for the third switch, in milliseconds
    #[arg(long)]
    third_switch_timeout: Option<u64>,

    /// Pause after a failed attempt, in milliseconds
    #[arg(long)]
    backoff_delay: Option<u64>,

    /// Time spent crossing the yard, in milliseconds
    #[arg(long)]
    transit_delay: Option<u64>,

    /// Fleet entries beyond this many are not simulated
    #[arg(long)]
    max_trains: Option<usize>,

    /// Trains allowed to run at the same time
    #[arg(long)]
    worker_slots: Option<usize>,

    /// Highest switch number in the yard
    #[arg(long)]
    switch_count: Option<u32>,

    /// Write one CSV row per dispatched train to this file
    #[arg(long)]
    departures: Option<PathBuf>,

    /// Suppress the console narration
    #[arg(short, long)]
    quiet: bool,

    /// Ignore --fleet and generate this many trains over the yard's tracks
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..i64::from(u32::MAX)))]
    random_fleet: Option<u32>,

    /// Seed for --random-fleet. When omitted, a random seed is used.
    #[arg(long, requires = "random_fleet")]
    seed: Option<u64>,
}

impl Args {
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            first_switch_timeout:  self.first_switch_timeout,
            second_switch_timeout: self.second_switch_timeout,
            third_switch_timeout:  self.third_switch_timeout,
            backoff_delay:         self.backoff_delay,
            transit_delay:         self.transit_delay,
            max_trains:            self.max_trains,
            worker_slots:          self.worker_slots,
            switch_count:          self.switch_count,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // ── Configuration ─────────────────────────────────────────────────────────

    let file = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let config = file.merge(args.overrides()).to_config()?;

    // ── Tables ────────────────────────────────────────────────────────────────

    let (fleet, yard) = load_tables(&args)?;

    info!(
        trains = fleet.len(),
        routes = yard.len(),
        switches = config.switch_count,
        worker_slots = config.worker_slots,
        "starting dispatch"
    );

    // ── Observers ─────────────────────────────────────────────────────────────

    let log = match &args.departures {
        Some(path) => Some(Arc::new(DepartureLog::create(path)?)),
        None => None,
    };

    let narration: Arc<dyn YardObserver> = if args.quiet {
        Arc::new(NoopObserver)
    } else {
        Arc::new(NarrationObserver::stdout())
    };
    let sink: Arc<dyn YardObserver> = match &log {
        Some(log) => Arc::new(TracingObserver.and(log.clone())),
        None => Arc::new(TracingObserver),
    };

    // ── Run ───────────────────────────────────────────────────────────────────

    let report = DispatcherBuilder::new(config, fleet, yard)
        .observer(narration.and(sink))
        .build()?
        .run()
        .await;

    if let Some(e) = log.as_ref().and_then(|l| l.take_error()) {
        return Err(e).context("writing departures");
    }

    print_summary(&report);
    Ok(())
}

/// Load the yard table, then the fleet table or a synthetic fleet.
///
/// An empty yard is not an error: every train ends on permanent hold.
fn load_tables(args: &Args) -> Result<(Vec<FleetEntry>, Vec<RouteRecord>)> {
    let yard = load_yard_csv(&args.yard)
        .with_context(|| format!("loading yard table {}", args.yard.display()))?;
    if yard.is_empty() {
        warn!(yard = %args.yard.display(), "yard table has no routes; every train will be held");
    }

    let fleet = match args.random_fleet {
        Some(count) => {
            let seed = args.seed.unwrap_or_else(rand::random);
            info!(count, seed, "generating fleet");
            synth::random_fleet(count, &yard, seed)
        }
        None => load_fleet_csv(&args.fleet)
            .with_context(|| format!("loading fleet table {}", args.fleet.display()))?,
    };
    Ok((fleet, yard))
}

fn print_summary(report: &DispatchReport) {
    let s = report.summary();
    eprintln!(
        "{} trains: {} dispatched, {} on permanent hold, {} failed, {} skipped ({:.2?})",
        s.trains, s.dispatched, s.halted, s.failed, s.skipped, report.elapsed
    );
    for f in &report.failures {
        eprintln!("  {}: {}", f.train, f.kind);
    }
}
