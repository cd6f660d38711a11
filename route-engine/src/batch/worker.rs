//! A single batch worker.
//!
//! Each worker owns a contiguous slice of origin stops and plans every
//! destination for each of them. Workers share only read-only state (the
//! stop list, the graph and the schedule source); the output directory is
//! the one thing they all touch, and a pair's file name is unique to it.

use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::Stop;
use crate::graph::ScheduleGraph;
use crate::output::OutputStore;
use crate::planner::{DirectRoutes, Planner};
use crate::schedule::ScheduleSource;

use super::config::BatchConfig;
use super::error::BatchError;

/// What a worker did, reported when it finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: usize,
    /// Origin stops handled.
    pub origins: usize,
    /// Documents written, with or without options.
    pub written: usize,
    /// Documents written with an empty option list.
    pub unreachable: usize,
    /// Pairs skipped because their document already existed.
    pub existing: usize,
    /// Chunks whose query failed.
    pub failed_chunks: usize,
    /// Pairs left unplanned because their chunk failed.
    pub failed_pairs: usize,
}

pub(crate) struct Worker<S> {
    pub id: usize,
    pub source: Arc<S>,
    pub graph: Arc<ScheduleGraph>,
    pub stops: Arc<[Stop]>,
    pub origins: Range<usize>,
    pub store: OutputStore,
    pub config: Arc<BatchConfig>,
}

impl<S: ScheduleSource> Worker<S> {
    /// Plan every pair whose origin is in this worker's slice.
    ///
    /// A failed chunk query is logged and skipped. Failing to write a
    /// document ends the worker.
    pub async fn run(self) -> Result<WorkerReport, BatchError> {
        let mut report = WorkerReport {
            worker: self.id,
            ..Default::default()
        };
        let planner = Planner::new(&self.graph, &self.config.search);

        info!(
            worker = self.id,
            first = self.origins.start,
            count = self.origins.len(),
            "worker started"
        );

        for from in &self.stops[self.origins.clone()] {
            for chunk in self.stops.chunks(self.config.chunk_size) {
                self.process_chunk(&planner, from, chunk, &mut report)
                    .await?;
            }
            report.origins += 1;
            debug!(worker = self.id, from = %from.stop_id, "origin done");
        }

        info!(
            worker = self.id,
            written = report.written,
            existing = report.existing,
            failed_chunks = report.failed_chunks,
            "worker finished"
        );
        Ok(report)
    }

    async fn process_chunk(
        &self,
        planner: &Planner<'_>,
        from: &Stop,
        chunk: &[Stop],
        report: &mut WorkerReport,
    ) -> Result<(), BatchError> {
        let mut pending = Vec::with_capacity(chunk.len());
        for to in chunk {
            if to.stop_id == from.stop_id {
                continue;
            }
            if self.store.exists(from.stop_id, to.stop_id) {
                report.existing += 1;
                continue;
            }
            pending.push(to);
        }
        if pending.is_empty() {
            return Ok(());
        }

        let candidates: Vec<_> = pending.iter().map(|s| s.stop_id).collect();
        let query = DirectRoutes::find(&*self.source, from.stop_id, &candidates);
        let direct = match query.await {
            Ok(direct) => direct,
            Err(e) => {
                warn!(
                    worker = self.id,
                    from = %from.stop_id,
                    count = pending.len(),
                    "skipping chunk: {e}"
                );
                report.failed_chunks += 1;
                report.failed_pairs += pending.len();
                pause(self.config.chunk_delay()).await;
                return Ok(());
            }
        };

        for to in pending {
            let document = planner.plan(from, to, direct.to(to.stop_id));
            if !document.has_options() {
                report.unreachable += 1;
            }
            self.store.write(&document)?;
            report.written += 1;
            pause(self.config.pair_delay()).await;
        }

        pause(self.config.chunk_delay()).await;
        Ok(())
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
