//! Batch run configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::StopIdRange;
use crate::planner::SearchConfig;

use super::error::BatchError;

/// Configuration parameters for an all-pairs batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Upper bound on parallel workers. The run uses fewer if the machine
    /// has fewer cores or there are fewer stops.
    pub max_workers: usize,

    /// Destinations queried together per origin.
    pub chunk_size: usize,

    /// Pause after each planned pair (milliseconds).
    pub pair_delay_ms: u64,

    /// Pause after each queried chunk (milliseconds).
    pub chunk_delay_ms: u64,

    /// Stops outside this range are not part of the run.
    pub stop_range: StopIdRange,

    /// Directory route documents are written to.
    pub output_dir: PathBuf,

    /// Per-pair search parameters.
    pub search: SearchConfig,
}

impl BatchConfig {
    /// Create a configuration writing to `output_dir` with default tunables.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_max_workers(mut self, n: usize) -> Self {
        self.max_workers = n;
        self
    }

    pub fn with_chunk_size(mut self, n: usize) -> Self {
        self.chunk_size = n;
        self
    }

    /// Set both pacing delays in milliseconds.
    pub fn with_delays(mut self, pair_ms: u64, chunk_ms: u64) -> Self {
        self.pair_delay_ms = pair_ms;
        self.chunk_delay_ms = chunk_ms;
        self
    }

    pub fn with_stop_range(mut self, range: StopIdRange) -> Self {
        self.stop_range = range;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Returns the per-pair delay as a Duration.
    pub fn pair_delay(&self) -> Duration {
        Duration::from_millis(self.pair_delay_ms)
    }

    /// Returns the per-chunk delay as a Duration.
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }

    /// Number of workers for `stop_count` stops: the configured maximum,
    /// capped by available parallelism and by the stop count, at least one.
    pub fn worker_count(&self, stop_count: usize) -> usize {
        let cores = std::thread::available_parallelism().map_or(1, |n| n.get());
        self.max_workers.min(cores).min(stop_count).max(1)
    }

    /// Reject settings a run cannot proceed with.
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.max_workers == 0 {
            return Err(BatchError::InvalidConfig(
                "max_workers must be at least 1".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(BatchError::InvalidConfig(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        self.search
            .validate()
            .map_err(|e| BatchError::InvalidConfig(e.to_string()))
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_workers: 4,
            chunk_size: 100,
            pair_delay_ms: 1,
            chunk_delay_ms: 50,
            stop_range: StopIdRange::all(),
            output_dir: PathBuf::from("routes"),
            search: SearchConfig::default(),
        }
    }
}
