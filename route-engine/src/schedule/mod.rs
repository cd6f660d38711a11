//! Schedule data access.
//!
//! The engine reads stops and scheduled trips through [`ScheduleSource`].
//! [`Timetable`] answers those queries from memory; [`load_feed`] fills a
//! timetable from a GTFS directory.

mod error;
mod gtfs;
mod timetable;

use std::future::Future;

use crate::domain::{RouteLabel, Stop, StopId, StopIdRange};

pub use error::SourceError;
pub use gtfs::load_feed;
pub use timetable::Timetable;

/// One row of a trip: the stop visited and its position in the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTime {
    pub stop_id: StopId,
    pub sequence: u32,
}

impl StopTime {
    pub fn new(stop_id: StopId, sequence: u32) -> Self {
        Self { stop_id, sequence }
    }
}

/// A scheduled trip and the stops it calls at, ordered by sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTrip {
    pub route: RouteLabel,
    pub stop_times: Vec<StopTime>,
}

impl ScheduledTrip {
    /// Create a trip, sorting its rows by sequence number.
    pub fn new(route: RouteLabel, mut stop_times: Vec<StopTime>) -> Self {
        stop_times.sort_by_key(|st| st.sequence);
        Self { route, stop_times }
    }
}

/// A route that visits `from` and later `to` on the same trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectRoute {
    pub route: RouteLabel,
    pub from: StopId,
    pub to: StopId,
    /// Difference between the two stops' sequence numbers.
    pub stops_between: u32,
}

/// Read access to schedule data.
///
/// Implementations must be safe to share between batch workers; all
/// operations are read-only.
pub trait ScheduleSource: Send + Sync {
    /// Stops whose id falls in `range`, ordered by id.
    fn stops(
        &self,
        range: &StopIdRange,
    ) -> impl Future<Output = Result<Vec<Stop>, SourceError>> + Send;

    /// Every scheduled trip with its stop sequence.
    fn trips(&self) -> impl Future<Output = Result<Vec<ScheduledTrip>, SourceError>> + Send;

    /// Routes serving `from` and then any of `candidates` on the same trip.
    ///
    /// Rows are unique per (route, to, stops_between) and returned in a
    /// deterministic order.
    fn direct_routes(
        &self,
        from: StopId,
        candidates: &[StopId],
    ) -> impl Future<Output = Result<Vec<DirectRoute>, SourceError>> + Send;
}
