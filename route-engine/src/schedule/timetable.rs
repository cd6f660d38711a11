//! In-memory schedule source.

use std::collections::{HashMap, HashSet};

use crate::domain::{Stop, StopId, StopIdRange};

use super::{DirectRoute, ScheduleSource, ScheduledTrip, SourceError};

/// A complete schedule held in memory.
///
/// Stops are kept ordered by id. Each stop also indexes the (trip, row)
/// positions it appears at, so the direct-route join only walks trips that
/// actually call at the origin.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    stops: Vec<Stop>,
    trips: Vec<ScheduledTrip>,
    visits: HashMap<StopId, Vec<(usize, usize)>>,
}

impl Timetable {
    /// Build a timetable. Duplicate stop ids keep their first entry.
    pub fn new(mut stops: Vec<Stop>, trips: Vec<ScheduledTrip>) -> Self {
        stops.sort_by_key(|s| s.stop_id);
        stops.dedup_by_key(|s| s.stop_id);

        let mut visits: HashMap<StopId, Vec<(usize, usize)>> = HashMap::new();
        for (trip_idx, trip) in trips.iter().enumerate() {
            for (row_idx, stop_time) in trip.stop_times.iter().enumerate() {
                visits
                    .entry(stop_time.stop_id)
                    .or_default()
                    .push((trip_idx, row_idx));
            }
        }

        Self {
            stops,
            trips,
            visits,
        }
    }

    fn stops_in(&self, range: &StopIdRange) -> Vec<Stop> {
        self.stops
            .iter()
            .filter(|s| range.contains(s.stop_id))
            .cloned()
            .collect()
    }

    fn join_direct(&self, from: StopId, candidates: &[StopId]) -> Vec<DirectRoute> {
        let Some(visits) = self.visits.get(&from) else {
            return Vec::new();
        };
        let wanted: HashSet<StopId> = candidates.iter().copied().collect();

        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for &(trip_idx, row_idx) in visits {
            let trip = &self.trips[trip_idx];
            let origin = trip.stop_times[row_idx];

            for later in &trip.stop_times[row_idx + 1..] {
                if later.sequence <= origin.sequence || !wanted.contains(&later.stop_id) {
                    continue;
                }
                let row = DirectRoute {
                    route: trip.route.clone(),
                    from,
                    to: later.stop_id,
                    stops_between: later.sequence - origin.sequence,
                };
                if seen.insert(row.clone()) {
                    rows.push(row);
                }
            }
        }

        rows
    }
}

impl ScheduleSource for Timetable {
    async fn stops(&self, range: &StopIdRange) -> Result<Vec<Stop>, SourceError> {
        Ok(self.stops_in(range))
    }

    async fn trips(&self) -> Result<Vec<ScheduledTrip>, SourceError> {
        Ok(self.trips.clone())
    }

    async fn direct_routes(
        &self,
        from: StopId,
        candidates: &[StopId],
    ) -> Result<Vec<DirectRoute>, SourceError> {
        Ok(self.join_direct(from, candidates))
    }
}
