//! Hops and paths through the network.

use serde::Serialize;

use super::{DomainError, RouteLabel, Stop, StopId};

/// One traversal between two stops along a single route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hop {
    pub route: RouteLabel,
    pub from_stop: Stop,
    pub to_stop: Stop,
}

impl Hop {
    pub fn new(route: RouteLabel, from_stop: Stop, to_stop: Stop) -> Self {
        Self {
            route,
            from_stop,
            to_stop,
        }
    }
}

/// A contiguous, non-empty chain of hops.
///
/// Every hop's `to_stop` is the next hop's `from_stop`. This is checked at
/// construction, so a `Path` can be written to a route document without
/// further validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Path {
    hops: Vec<Hop>,
}

impl Path {
    /// Build a path from hops, checking that they form a chain.
    pub fn new(hops: Vec<Hop>) -> Result<Self, DomainError> {
        if hops.is_empty() {
            return Err(DomainError::EmptyPath);
        }

        for (position, pair) in hops.windows(2).enumerate() {
            let expected = pair[0].to_stop.stop_id;
            let found = pair[1].from_stop.stop_id;
            if expected != found {
                return Err(DomainError::BrokenChain {
                    position: position + 1,
                    expected,
                    found,
                });
            }
        }

        Ok(Self { hops })
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// Whether the path has no hops. A path built by `Path::new` always has one.
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn origin(&self) -> &Stop {
        &self.hops[0].from_stop
    }

    pub fn destination(&self) -> &Stop {
        &self.hops[self.hops.len() - 1].to_stop
    }

    /// Every stop on the path in travel order, origin included.
    pub fn stop_ids(&self) -> impl Iterator<Item = StopId> + '_ {
        std::iter::once(self.origin().stop_id)
            .chain(self.hops.iter().map(|h| h.to_stop.stop_id))
    }
}
