//! Route planning for a single stop pair.
//!
//! This module implements the core of the engine: for a (from, to) pair,
//! find direct services, fall back to a bounded depth-first search of the
//! schedule graph for transfer paths, then rank and truncate the
//! candidates into a route document.

mod config;
mod direct;
mod rank;
mod search;
mod transfer;

pub use config::{InvalidSearchConfig, SearchConfig};
pub use direct::{DirectRoutes, direct_option};
pub use rank::{direct_estimate, rank_options, transfer_estimate, transfer_option};
pub use search::Planner;
pub use transfer::TransferSearch;
