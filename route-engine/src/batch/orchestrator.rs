//! All-pairs batch orchestration.
//!
//! Loads the stop universe and schedule graph once, splits the stops into
//! contiguous slices and runs one worker task per slice. The run succeeds
//! only if every worker does.

use std::ops::Range;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info};

use crate::domain::Stop;
use crate::graph::ScheduleGraph;
use crate::output::OutputStore;
use crate::schedule::ScheduleSource;

use super::config::BatchConfig;
use super::error::BatchError;
use super::worker::{Worker, WorkerReport};

/// Outcome of a successful batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Stops in the run's universe.
    pub stops: usize,
    /// Per-worker reports, in worker order.
    pub reports: Vec<WorkerReport>,
}

impl BatchSummary {
    pub fn workers(&self) -> usize {
        self.reports.len()
    }

    pub fn written(&self) -> usize {
        self.reports.iter().map(|r| r.written).sum()
    }

    pub fn unreachable(&self) -> usize {
        self.reports.iter().map(|r| r.unreachable).sum()
    }

    pub fn existing(&self) -> usize {
        self.reports.iter().map(|r| r.existing).sum()
    }

    pub fn failed_chunks(&self) -> usize {
        self.reports.iter().map(|r| r.failed_chunks).sum()
    }

    pub fn failed_pairs(&self) -> usize {
        self.reports.iter().map(|r| r.failed_pairs).sum()
    }
}

/// Split `len` items into `parts` contiguous ranges whose sizes differ by
/// at most one. Earlier ranges take the remainder.
pub fn partition(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1);
    let base = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Plan and write a route document for every ordered pair of stops.
///
/// Pairs whose document already exists are skipped, so an interrupted
/// run can simply be started again.
pub async fn run_batch<S>(source: Arc<S>, config: BatchConfig) -> Result<BatchSummary, BatchError>
where
    S: ScheduleSource + 'static,
{
    config.validate()?;

    let stops = source.stops(&config.stop_range).await?;
    if stops.is_empty() {
        info!("no stops in range; nothing to do");
        return Ok(BatchSummary::default());
    }

    let graph = ScheduleGraph::load(&*source, &stops).await?;
    info!(
        stops = stops.len(),
        edges = graph.edge_count(),
        "schedule graph built"
    );

    let store = OutputStore::new(&config.output_dir);
    store.ensure_dir()?;

    let worker_count = config.worker_count(stops.len());
    let stop_count = stops.len();
    let stops: Arc<[Stop]> = Arc::from(stops);
    let graph = Arc::new(graph);
    let config = Arc::new(config);

    info!(
        workers = worker_count,
        pairs = stop_count * (stop_count - 1),
        output = %store.dir().display(),
        "starting batch"
    );

    let handles: Vec<_> = partition(stop_count, worker_count)
        .into_iter()
        .enumerate()
        .map(|(id, origins)| {
            let worker = Worker {
                id,
                source: Arc::clone(&source),
                graph: Arc::clone(&graph),
                stops: Arc::clone(&stops),
                origins,
                store: store.clone(),
                config: Arc::clone(&config),
            };
            tokio::spawn(worker.run())
        })
        .collect();

    let mut reports = Vec::with_capacity(worker_count);
    let mut failure = None;
    for (id, joined) in join_all(handles).await.into_iter().enumerate() {
        let err = match joined {
            Ok(Ok(report)) => {
                reports.push(report);
                continue;
            }
            Ok(Err(e)) => BatchError::WorkerFailed {
                worker: id,
                source: Box::new(e),
            },
            Err(e) => BatchError::WorkerAborted {
                worker: id,
                message: e.to_string(),
            },
        };
        error!("{err}");
        failure.get_or_insert(err);
    }

    if let Some(err) = failure {
        return Err(err);
    }

    let summary = BatchSummary {
        stops: stop_count,
        reports,
    };
    info!(
        written = summary.written(),
        unreachable = summary.unreachable(),
        existing = summary.existing(),
        failed_pairs = summary.failed_pairs(),
        "batch finished"
    );
    Ok(summary)
}
