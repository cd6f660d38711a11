//! Per-pair route planning.
//!
//! Direct services are preferred; only when none exists is the schedule
//! graph searched for transfer paths. Either way the candidates are ranked
//! and truncated before becoming a route document.

use crate::domain::Stop;
use crate::graph::ScheduleGraph;
use crate::output::{RouteDocument, RouteOption};
use crate::schedule::{DirectRoute, ScheduleSource, SourceError};

use super::config::SearchConfig;
use super::direct::{DirectRoutes, direct_option};
use super::rank::{rank_options, transfer_option};
use super::transfer::TransferSearch;

/// Route planner over one schedule graph.
pub struct Planner<'a> {
    graph: &'a ScheduleGraph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a ScheduleGraph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Build the document for `from` → `to` given the direct rows already
    /// fetched for the pair.
    pub fn plan(&self, from: &Stop, to: &Stop, direct: &[DirectRoute]) -> RouteDocument {
        let mut options: Vec<RouteOption> = direct
            .iter()
            .filter_map(|row| direct_option(row, from, to))
            .collect();

        if options.is_empty() {
            options = TransferSearch::new(self.graph, self.config.max_transfer_hops)
                .find_paths(from.stop_id, to.stop_id)
                .into_iter()
                .map(transfer_option)
                .collect();
        }

        let options = rank_options(options, self.config.max_options);
        if options.is_empty() {
            return RouteDocument::not_found(from.clone(), to.clone(), self.no_route_reason());
        }
        RouteDocument::with_options(from.clone(), to.clone(), options)
    }

    /// Query `source` for direct routes and plan a single pair.
    pub async fn plan_pair<S: ScheduleSource>(
        &self,
        source: &S,
        from: &Stop,
        to: &Stop,
    ) -> Result<RouteDocument, SourceError> {
        let direct = DirectRoutes::find(source, from.stop_id, &[to.stop_id]).await?;
        Ok(self.plan(from, to, direct.to(to.stop_id)))
    }

    fn no_route_reason(&self) -> String {
        format!(
            "no direct route and no transfer path within {} hops",
            self.config.max_transfer_hops
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteLabel, StopId};
    use crate::output::OptionKind;
    use crate::schedule::{ScheduledTrip, StopTime, Timetable};

    fn stop(id: u32) -> Stop {
        Stop::new(StopId::new(id), format!("Stop {id}"), 0.0, 0.0)
    }

    fn trip(route: &str, ids: &[u32]) -> ScheduledTrip {
        ScheduledTrip::new(
            RouteLabel::new(route),
            ids.iter()
                .enumerate()
                .map(|(seq, &id)| StopTime::new(StopId::new(id), seq as u32 + 1))
                .collect(),
        )
    }

    fn timetable(stop_ids: &[u32], trips: Vec<ScheduledTrip>) -> Timetable {
        Timetable::new(stop_ids.iter().map(|&id| stop(id)).collect(), trips)
    }

    async fn plan(
        timetable: &Timetable,
        config: &SearchConfig,
        from: u32,
        to: u32,
    ) -> RouteDocument {
        let stops = timetable.stops(&Default::default()).await.unwrap();
        let graph = ScheduleGraph::load(timetable, &stops).await.unwrap();
        let planner = Planner::new(&graph, config);
        planner
            .plan_pair(timetable, &stop(from), &stop(to))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn direct_route_is_preferred() {
        // R1 runs 100 -> 150 -> 160 -> 170 -> 400; R2/R3 offer a transfer.
        let tt = timetable(
            &[100, 150, 160, 170, 200, 400],
            vec![
                trip("R1", &[100, 150, 160, 170, 400]),
                trip("R2", &[100, 200]),
                trip("R3", &[200, 400]),
            ],
        );

        let doc = plan(&tt, &SearchConfig::default(), 100, 400).await;
        assert_eq!(doc.options.len(), 1);
        let option = &doc.options[0];
        assert_eq!(option.kind, OptionKind::Direct);
        assert_eq!(option.stops_between, Some(4));
        assert_eq!(option.estimated_time, 13);
        assert!(doc.reason.is_none());
    }

    #[tokio::test]
    async fn every_direct_route_becomes_an_option() {
        let tt = timetable(
            &[1, 2, 3],
            vec![trip("R1", &[1, 2]), trip("R2", &[1, 3, 2])],
        );

        let doc = plan(&tt, &SearchConfig::default(), 1, 2).await;
        let routes: Vec<&str> = doc
            .options
            .iter()
            .map(|o| o.hops.hops()[0].route.as_str())
            .collect();
        assert_eq!(routes, vec!["R1", "R2"]);
        assert!(doc.options.iter().all(|o| o.kind == OptionKind::Direct));
        assert_eq!(doc.options[1].estimated_time, 9);
    }

    #[tokio::test]
    async fn falls_back_to_transfer_search() {
        let tt = timetable(
            &[100, 200, 300, 400],
            vec![
                trip("R1", &[100, 200]),
                trip("R2", &[200, 300]),
                trip("R3", &[300, 400]),
            ],
        );

        let doc = plan(&tt, &SearchConfig::default(), 100, 400).await;
        assert_eq!(doc.options.len(), 1);
        let option = &doc.options[0];
        assert_eq!(option.kind, OptionKind::Transfer);
        assert_eq!(option.total_stops, 3);
        assert_eq!(option.estimated_time, 65);
        assert_eq!(option.hops.origin().stop_id, StopId::new(100));
        assert_eq!(option.hops.destination().stop_id, StopId::new(400));
    }

    #[tokio::test]
    async fn nothing_within_bound_records_reason() {
        let tt = timetable(
            &[1, 2, 3, 4, 5],
            vec![
                trip("R1", &[1, 2]),
                trip("R2", &[2, 3]),
                trip("R3", &[3, 4]),
                trip("R4", &[4, 5]),
            ],
        );

        let doc = plan(&tt, &SearchConfig::default(), 1, 5).await;
        assert!(doc.options.is_empty());
        let reason = doc.reason.unwrap();
        assert!(!reason.is_empty());
        assert!(reason.contains("3 hops"));
    }

    #[tokio::test]
    async fn options_are_truncated() {
        // Six distinct direct routes between the same pair.
        let trips = (0..6).map(|i| trip(&format!("R{i}"), &[1, 2])).collect();
        let tt = timetable(&[1, 2], trips);

        let config = SearchConfig::default().with_max_options(5);
        let doc = plan(&tt, &config, 1, 2).await;
        assert_eq!(doc.options.len(), 5);
    }
}
