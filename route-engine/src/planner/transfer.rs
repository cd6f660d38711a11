//! Transfer-path search over the schedule graph.
//!
//! A bounded depth-first enumeration of every simple path (no stop visited
//! twice) from one stop to another. It is not a shortest-path search:
//! quality is left to ranking, which prefers fewer hops.

use crate::domain::{Hop, Path, RouteLabel, StopId};
use crate::graph::{NodeIndex, ScheduleGraph};

/// One step of the path being explored.
#[derive(Clone, Copy)]
struct Step<'g> {
    route: &'g RouteLabel,
    from: NodeIndex,
    to: NodeIndex,
}

/// Enumerates transfer paths between stops of one graph.
pub struct TransferSearch<'g> {
    graph: &'g ScheduleGraph,
    max_hops: usize,
}

impl<'g> TransferSearch<'g> {
    pub fn new(graph: &'g ScheduleGraph, max_hops: usize) -> Self {
        Self { graph, max_hops }
    }

    /// Every simple path from `from` to `to` with at most `max_hops` hops.
    ///
    /// Paths are listed in discovery order: routes at each stop are tried
    /// in label order and next stops in id order. A stop with no node in
    /// the graph is a dead end, and a stop never has a path to itself.
    pub fn find_paths(&self, from: StopId, to: StopId) -> Vec<Path> {
        if from == to {
            return Vec::new();
        }
        let (Some(start), Some(target)) = (self.graph.index_of(from), self.graph.index_of(to))
        else {
            return Vec::new();
        };

        let mut found = Vec::new();
        let mut trail = Vec::with_capacity(self.max_hops);
        let mut visited = vec![start];
        self.explore(start, target, &mut trail, &mut visited, &mut found);
        found
    }

    /// Extend the current branch from `current`.
    ///
    /// `visited` holds exactly the stops on this branch; each recursive
    /// call pushes one stop and pops it on return, so sibling branches
    /// never see each other's stops.
    fn explore(
        &self,
        current: NodeIndex,
        target: NodeIndex,
        trail: &mut Vec<Step<'g>>,
        visited: &mut Vec<NodeIndex>,
        found: &mut Vec<Path>,
    ) {
        if current == target {
            if let Some(path) = self.to_path(trail) {
                found.push(path);
            }
            return;
        }

        if trail.len() >= self.max_hops {
            return;
        }

        for (route, next_stops) in self.graph.node(current).connections() {
            for &next in next_stops {
                if visited.contains(&next) {
                    continue;
                }

                visited.push(next);
                trail.push(Step {
                    route,
                    from: current,
                    to: next,
                });
                self.explore(next, target, trail, visited, found);
                trail.pop();
                visited.pop();
            }
        }
    }

    fn to_path(&self, trail: &[Step<'g>]) -> Option<Path> {
        let hops = trail
            .iter()
            .map(|step| {
                Hop::new(
                    step.route.clone(),
                    self.graph.node(step.from).stop().clone(),
                    self.graph.node(step.to).stop().clone(),
                )
            })
            .collect();
        Path::new(hops).ok()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Stop;
    use crate::schedule::{ScheduledTrip, StopTime};
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Random trips over a small set of stops, so paths and cycles are common.
    fn network_strategy() -> impl Strategy<Value = ScheduleGraph> {
        prop::collection::vec((0u8..4, prop::collection::vec(0u32..8, 2..6)), 1..8)
            .prop_map(|trips| {
                let stops: Vec<Stop> = (0..8)
                    .map(|id| Stop::new(StopId::new(id), format!("S{id}"), 0.0, 0.0))
                    .collect();
                let trips: Vec<ScheduledTrip> = trips
                    .into_iter()
                    .map(|(route, ids)| {
                        ScheduledTrip::new(
                            RouteLabel::new(format!("R{route}")),
                            ids.into_iter()
                                .enumerate()
                                .map(|(seq, id)| StopTime::new(StopId::new(id), seq as u32))
                                .collect(),
                        )
                    })
                    .collect();
                ScheduleGraph::build(&stops, &trips)
            })
    }

    proptest! {
        #[test]
        fn paths_are_simple_bounded_chains(
            graph in network_strategy(),
            from in 0u32..8,
            to in 0u32..8,
            max_hops in 0usize..5,
        ) {
            let (from, to) = (StopId::new(from), StopId::new(to));
            let paths = TransferSearch::new(&graph, max_hops).find_paths(from, to);

            for path in &paths {
                prop_assert!(path.len() <= max_hops);
                prop_assert_eq!(path.origin().stop_id, from);
                prop_assert_eq!(path.destination().stop_id, to);

                for pair in path.hops().windows(2) {
                    prop_assert_eq!(pair[0].to_stop.stop_id, pair[1].from_stop.stop_id);
                }

                let ids: Vec<StopId> = path.stop_ids().collect();
                let unique: HashSet<StopId> = ids.iter().copied().collect();
                prop_assert_eq!(unique.len(), ids.len());
            }
        }

        /// Raising the bound never loses paths
        #[test]
        fn bound_is_monotonic(
            graph in network_strategy(),
            from in 0u32..8,
            to in 0u32..8,
            max_hops in 0usize..4,
        ) {
            let (from, to) = (StopId::new(from), StopId::new(to));
            let narrow = TransferSearch::new(&graph, max_hops).find_paths(from, to);
            let wide = TransferSearch::new(&graph, max_hops + 1).find_paths(from, to);
            prop_assert!(wide.len() >= narrow.len());
            for path in &narrow {
                prop_assert!(wide.contains(path));
            }
        }
    }
}
