//! Transit transfer-route generation.
//!
//! Precomputes, for every ordered pair of stops in a schedule, the ways to
//! travel between them: direct services first, and otherwise bounded
//! multi-hop paths through a graph of consecutive stops. Each pair's
//! result is written as one JSON document.

pub mod batch;
pub mod domain;
pub mod graph;
pub mod output;
pub mod planner;
pub mod schedule;
