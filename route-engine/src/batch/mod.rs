//! All-pairs route generation.
//!
//! Splits the stop universe across a pool of workers. Each worker walks its
//! origins against every destination in fixed-size chunks, querying direct
//! routes once per chunk and writing one document per pair. Pairs that
//! already have a document are skipped, which makes a run resumable.

mod config;
mod error;
mod orchestrator;
mod worker;

pub use config::BatchConfig;
pub use error::BatchError;
pub use orchestrator::{BatchSummary, partition, run_batch};
pub use worker::WorkerReport;
