//! Direct-route lookup for a batch of destinations.
//!
//! One schedule query per (origin, chunk of destinations); the rows are then
//! grouped by destination so each pair can be planned on its own.

use std::collections::HashMap;

use crate::domain::{Hop, Path, Stop, StopId};
use crate::output::{OptionKind, RouteOption};
use crate::schedule::{DirectRoute, ScheduleSource, SourceError};

use super::rank::direct_estimate;

/// Direct routes from one origin, grouped by destination.
#[derive(Debug, Clone, Default)]
pub struct DirectRoutes {
    by_destination: HashMap<StopId, Vec<DirectRoute>>,
}

impl DirectRoutes {
    /// Query `source` for routes from `from` to any of `candidates`.
    pub async fn find<S: ScheduleSource>(
        source: &S,
        from: StopId,
        candidates: &[StopId],
    ) -> Result<Self, SourceError> {
        if candidates.is_empty() {
            return Ok(Self::default());
        }
        let rows = source.direct_routes(from, candidates).await?;
        Ok(Self::from_rows(rows))
    }

    /// Group rows by destination, keeping their order.
    pub fn from_rows(rows: Vec<DirectRoute>) -> Self {
        let mut by_destination: HashMap<StopId, Vec<DirectRoute>> = HashMap::new();
        for row in rows {
            by_destination.entry(row.to).or_default().push(row);
        }
        Self { by_destination }
    }

    /// Rows reaching `to`, in discovery order.
    pub fn to(&self, to: StopId) -> &[DirectRoute] {
        self.by_destination
            .get(&to)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// A single-hop option for a direct row.
pub fn direct_option(row: &DirectRoute, from: &Stop, to: &Stop) -> Option<RouteOption> {
    let hops = Path::new(vec![Hop::new(row.route.clone(), from.clone(), to.clone())]).ok()?;
    Some(RouteOption {
        kind: OptionKind::Direct,
        total_stops: hops.len(),
        hops,
        estimated_time: direct_estimate(row.stops_between),
        stops_between: Some(row.stops_between),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteLabel;
    use crate::schedule::{ScheduledTrip, StopTime, Timetable};

    fn stop(id: u32) -> Stop {
        Stop::new(StopId::new(id), format!("Stop {id}"), 0.0, 0.0)
    }

    fn row(route: &str, from: u32, to: u32, between: u32) -> DirectRoute {
        DirectRoute {
            route: RouteLabel::new(route),
            from: StopId::new(from),
            to: StopId::new(to),
            stops_between: between,
        }
    }

    #[test]
    fn groups_by_destination() {
        let routes = DirectRoutes::from_rows(vec![
            row("R1", 1, 2, 1),
            row("R2", 1, 3, 2),
            row("R3", 1, 2, 5),
        ]);

        assert_eq!(routes.to(StopId::new(3)).len(), 1);
        let to_two: Vec<&str> = routes
            .to(StopId::new(2))
            .iter()
            .map(|r| r.route.as_str())
            .collect();
        assert_eq!(to_two, vec!["R1", "R3"]);
        assert!(routes.to(StopId::new(9)).is_empty());
    }

    #[test]
    fn direct_option_estimate() {
        let option = direct_option(&row("R1", 100, 400, 4), &stop(100), &stop(400)).unwrap();

        assert_eq!(option.kind, OptionKind::Direct);
        assert_eq!(option.total_stops, 1);
        assert_eq!(option.estimated_time, 13);
        assert_eq!(option.stops_between, Some(4));
        assert_eq!(option.hops.origin().stop_id, StopId::new(100));
        assert_eq!(option.hops.destination().stop_id, StopId::new(400));
    }

    #[tokio::test]
    async fn find_queries_source() {
        let timetable = Timetable::new(
            vec![],
            vec![ScheduledTrip::new(
                RouteLabel::new("R1"),
                vec![
                    StopTime::new(StopId::new(1), 1),
                    StopTime::new(StopId::new(2), 2),
                ],
            )],
        );

        let routes = DirectRoutes::find(&timetable, StopId::new(1), &[StopId::new(2)])
            .await
            .unwrap();
        assert_eq!(routes.to(StopId::new(2)).len(), 1);

        let none = DirectRoutes::find(&timetable, StopId::new(1), &[])
            .await
            .unwrap();
        assert!(none.to(StopId::new(2)).is_empty());
    }
}
