//! Batch run error types.

use crate::output::OutputError;
use crate::schedule::SourceError;

/// Errors that end a batch run.
///
/// Per-chunk query failures are not among them: a worker logs those and
/// moves on, leaving the affected pairs for the next run.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Configuration can't be used
    #[error("invalid batch configuration: {0}")]
    InvalidConfig(String),

    /// Stops or trips couldn't be loaded
    #[error("failed to load schedule: {0}")]
    Source(#[from] SourceError),

    /// A route document couldn't be written
    #[error(transparent)]
    Output(#[from] OutputError),

    /// A worker stopped with an error
    #[error("worker {worker} failed: {source}")]
    WorkerFailed {
        worker: usize,
        #[source]
        source: Box<BatchError>,
    },

    /// A worker task panicked or was cancelled
    #[error("worker {worker} did not finish: {message}")]
    WorkerAborted { worker: usize, message: String },
}
