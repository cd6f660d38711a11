//! Stop reachability graph built from scheduled trips.
//!
//! Each node is a stop; each edge says "on route R, this stop is
//! immediately followed by that one on some trip". The graph is built once
//! per run and never mutated afterwards, so it can be shared between
//! workers behind an `Arc` without locking.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::domain::{RouteLabel, Stop, StopId};
use crate::schedule::{ScheduleSource, ScheduledTrip, SourceError};

/// Position of a node in the graph's arena.
///
/// Nodes are stored in ascending stop id order, so comparing indices
/// compares stop ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(usize);

/// A stop and the stops reachable from it in one hop, per route.
#[derive(Debug, Clone)]
pub struct GraphNode {
    stop: Stop,
    connections: BTreeMap<RouteLabel, BTreeSet<NodeIndex>>,
}

impl GraphNode {
    pub fn stop(&self) -> &Stop {
        &self.stop
    }

    /// Routes leaving this stop, in label order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteLabel> {
        self.connections.keys()
    }

    /// `(route, next stops)` pairs, in label order.
    pub fn connections(&self) -> impl Iterator<Item = (&RouteLabel, &BTreeSet<NodeIndex>)> {
        self.connections.iter()
    }

    /// Stops reachable in one hop on `route`.
    pub fn next_stops(&self, route: &RouteLabel) -> Option<&BTreeSet<NodeIndex>> {
        self.connections.get(route)
    }
}

/// Read-only directed graph of stop-to-stop reachability.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<StopId, NodeIndex>,
    edge_count: usize,
}

impl ScheduleGraph {
    /// Build the graph in a single pass over every trip.
    ///
    /// Only rows with consecutive sequence numbers form an edge; a gap in
    /// the sequence (a skipped or cancelled call) is not bridged. Rows
    /// naming a stop absent from `stops` contribute nothing.
    pub fn build(stops: &[Stop], trips: &[ScheduledTrip]) -> Self {
        let mut ordered: Vec<&Stop> = stops.iter().collect();
        ordered.sort_by_key(|s| s.stop_id);
        ordered.dedup_by_key(|s| s.stop_id);

        let mut nodes = Vec::with_capacity(ordered.len());
        let mut index = HashMap::with_capacity(ordered.len());
        for stop in ordered {
            index.insert(stop.stop_id, NodeIndex(nodes.len()));
            nodes.push(GraphNode {
                stop: stop.clone(),
                connections: BTreeMap::new(),
            });
        }

        let mut edge_count = 0;
        let mut dangling = 0;
        for trip in trips {
            for pair in trip.stop_times.windows(2) {
                let (here, next) = (pair[0], pair[1]);
                if here.sequence.checked_add(1) != Some(next.sequence) {
                    continue;
                }
                let (Some(&from), Some(&to)) = (index.get(&here.stop_id), index.get(&next.stop_id))
                else {
                    dangling += 1;
                    continue;
                };
                let added = nodes[from.0]
                    .connections
                    .entry(trip.route.clone())
                    .or_default()
                    .insert(to);
                if added {
                    edge_count += 1;
                }
            }
        }

        if dangling > 0 {
            debug!(
                count = dangling,
                "ignored stop pairs referencing unknown stops"
            );
        }

        Self {
            nodes,
            index,
            edge_count,
        }
    }

    /// Fetch every trip from `source` and build the graph over `stops`.
    pub async fn load<S: ScheduleSource>(source: &S, stops: &[Stop]) -> Result<Self, SourceError> {
        let trips = source.trips().await?;
        Ok(Self::build(stops, &trips))
    }

    pub fn index_of(&self, stop_id: StopId) -> Option<NodeIndex> {
        self.index.get(&stop_id).copied()
    }

    /// The node at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` came from a different graph.
    pub fn node(&self, idx: NodeIndex) -> &GraphNode {
        &self.nodes[idx.0]
    }

    pub fn node_for(&self, stop_id: StopId) -> Option<&GraphNode> {
        self.index_of(stop_id).map(|idx| self.node(idx))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct (from, route, to) edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
