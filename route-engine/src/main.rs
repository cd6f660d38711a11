use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use route_engine::batch::{BatchConfig, BatchError, run_batch};
use route_engine::domain::{StopId, StopIdRange};
use route_engine::graph::ScheduleGraph;
use route_engine::planner::{InvalidSearchConfig, Planner, SearchConfig};
use route_engine::schedule::{ScheduleSource, SourceError, load_feed};

/// Precompute travel options between transit stops.
#[derive(Debug, Parser)]
#[command(name = "route-engine", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a route document for every ordered pair of stops
    Generate {
        /// GTFS directory (stops.txt, routes.txt, trips.txt, stop_times.txt)
        #[arg(long)]
        feed: PathBuf,
        /// Directory route documents are written to
        #[arg(long, default_value = "routes")]
        out: PathBuf,
        #[arg(long, default_value_t = 4)]
        workers: usize,
        /// Destinations queried together per origin
        #[arg(long, default_value_t = 100)]
        chunk_size: usize,
        #[arg(long, default_value_t = 1)]
        pair_delay_ms: u64,
        #[arg(long, default_value_t = 50)]
        chunk_delay_ms: u64,
        /// Lowest stop id included in the run
        #[arg(long)]
        min_stop_id: Option<u32>,
        /// Highest stop id included in the run
        #[arg(long)]
        max_stop_id: Option<u32>,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Plan a single pair and print its document
    Pair {
        #[arg(long)]
        feed: PathBuf,
        #[arg(long)]
        from: u32,
        #[arg(long)]
        to: u32,
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Longest transfer path considered, in hops
    #[arg(long, default_value_t = 3)]
    max_hops: usize,
    /// Options kept per pair
    #[arg(long, default_value_t = 5)]
    max_options: usize,
}

impl From<SearchArgs> for SearchConfig {
    fn from(args: SearchArgs) -> Self {
        SearchConfig::new(args.max_hops, args.max_options)
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error(transparent)]
    Search(#[from] InvalidSearchConfig),

    #[error("stop {0} is not in the feed")]
    UnknownStop(StopId),

    #[error("failed to encode document: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate {
            feed,
            out,
            workers,
            chunk_size,
            pair_delay_ms,
            chunk_delay_ms,
            min_stop_id,
            max_stop_id,
            search,
        } => {
            let range = StopIdRange::new(
                min_stop_id.map_or(StopIdRange::all().first(), StopId::new),
                max_stop_id.map_or(StopIdRange::all().last(), StopId::new),
            );
            let config = BatchConfig::new(out)
                .with_max_workers(workers)
                .with_chunk_size(chunk_size)
                .with_delays(pair_delay_ms, chunk_delay_ms)
                .with_stop_range(range)
                .with_search(search.into());
            generate(feed, config).await
        }
        Command::Pair {
            feed,
            from,
            to,
            search,
        } => pair(feed, StopId::new(from), StopId::new(to), search.into()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn generate(feed: PathBuf, config: BatchConfig) -> Result<(), CliError> {
    let timetable = load_feed(&feed)?;
    let output = config.output_dir.clone();
    let summary = run_batch(Arc::new(timetable), config).await?;

    println!(
        "{} stops, {} workers: {} written ({} without options), {} already present, {} pairs skipped after query failures",
        summary.stops,
        summary.workers(),
        summary.written(),
        summary.unreachable(),
        summary.existing(),
        summary.failed_pairs(),
    );
    info!(output = %output.display(), "done");
    Ok(())
}

async fn pair(
    feed: PathBuf,
    from: StopId,
    to: StopId,
    search: SearchConfig,
) -> Result<(), CliError> {
    search.validate()?;
    let timetable = load_feed(&feed)?;
    let stops = timetable.stops(&StopIdRange::all()).await?;

    let find = |id: StopId| {
        stops
            .iter()
            .find(|s| s.stop_id == id)
            .cloned()
            .ok_or(CliError::UnknownStop(id))
    };
    let (from_stop, to_stop) = (find(from)?, find(to)?);

    let graph = ScheduleGraph::load(&timetable, &stops).await?;
    let document = Planner::new(&graph, &search)
        .plan_pair(&timetable, &from_stop, &to_stop)
        .await?;

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
