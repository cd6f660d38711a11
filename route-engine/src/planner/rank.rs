//! Option ranking and travel-time estimates.
//!
//! Estimates are fixed linear heuristics, not timetable lookups:
//! - direct: 2 minutes per stop travelled plus 5 minutes of waiting;
//! - transfer: 15 minutes per hop plus 10 minutes per change of vehicle.

use crate::domain::Path;
use crate::output::{OptionKind, RouteOption};

const DIRECT_MINUTES_PER_STOP: u32 = 2;
const DIRECT_BASE_MINUTES: u32 = 5;
const TRANSFER_MINUTES_PER_HOP: u32 = 15;
const TRANSFER_PENALTY_MINUTES: u32 = 10;

/// Estimated minutes for a direct ride covering `stops_between` stops.
pub fn direct_estimate(stops_between: u32) -> u32 {
    stops_between
        .saturating_mul(DIRECT_MINUTES_PER_STOP)
        .saturating_add(DIRECT_BASE_MINUTES)
}

/// Estimated minutes for a transfer path of `hop_count` hops.
pub fn transfer_estimate(hop_count: usize) -> u32 {
    let hops = u32::try_from(hop_count).unwrap_or(u32::MAX);
    let riding = hops.saturating_mul(TRANSFER_MINUTES_PER_HOP);
    let changes = hops.saturating_sub(1);
    riding.saturating_add(changes.saturating_mul(TRANSFER_PENALTY_MINUTES))
}

/// Wrap a transfer path as an option.
pub fn transfer_option(hops: Path) -> RouteOption {
    RouteOption {
        kind: OptionKind::Transfer,
        total_stops: hops.len(),
        estimated_time: transfer_estimate(hops.len()),
        hops,
        stops_between: None,
    }
}

/// Rank options by stop count and keep the best `max_options`.
///
/// The sort is stable: options with equal stop counts keep the order they
/// were found in, so direct options listed first stay ahead of transfers.
pub fn rank_options(mut options: Vec<RouteOption>, max_options: usize) -> Vec<RouteOption> {
    options.sort_by_key(|o| o.total_stops);
    options.truncate(max_options);
    options
}


#[cfg(test)]
mod tests {
    use super::test_support::chain;
    use super::*;

    fn lengths(options: &[RouteOption]) -> Vec<usize> {
        options.iter().map(|o| o.total_stops).collect()
    }

    #[test]
    fn direct_estimates() {
        assert_eq!(direct_estimate(1), 7);
        assert_eq!(direct_estimate(4), 13);
        assert_eq!(direct_estimate(u32::MAX), u32::MAX);
    }

    #[test]
    fn transfer_estimates() {
        assert_eq!(transfer_estimate(1), 15);
        assert_eq!(transfer_estimate(2), 40);
        assert_eq!(transfer_estimate(3), 65);
    }

    #[test]
    fn transfer_option_fields() {
        let option = transfer_option(chain("R1", 100, 3));
        assert_eq!(option.kind, OptionKind::Transfer);
        assert_eq!(option.total_stops, 3);
        assert_eq!(option.estimated_time, 65);
        assert_eq!(option.stops_between, None);
    }

    #[test]
    fn sorts_by_stop_count() {
        let options = vec![
            transfer_option(chain("A", 0, 3)),
            transfer_option(chain("B", 0, 1)),
            transfer_option(chain("C", 0, 2)),
        ];
        let ranked = rank_options(options, 5);
        assert_eq!(lengths(&ranked), vec![1, 2, 3]);
    }

    #[test]
    fn truncates_to_limit() {
        let options: Vec<RouteOption> = (1..=8)
            .rev()
            .map(|n| transfer_option(chain("R", 0, n)))
            .collect();
        let ranked = rank_options(options, 5);
        assert_eq!(lengths(&ranked), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn ties_keep_discovery_order() {
        let options = vec![
            transfer_option(chain("first", 0, 2)),
            transfer_option(chain("second", 0, 2)),
            transfer_option(chain("third", 0, 1)),
        ];
        let ranked = rank_options(options, 5);
        let routes: Vec<&str> = ranked
            .iter()
            .map(|o| o.hops.hops()[0].route.as_str())
            .collect();
        assert_eq!(routes, vec!["third", "first", "second"]);
    }

    #[test]
    fn empty_input() {
        assert!(rank_options(vec![], 5).is_empty());
    }
}
