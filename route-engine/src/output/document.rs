//! Route documents: the per-pair output of a batch run.

use serde::Serialize;

use crate::domain::{Path, Stop};

/// How an option was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// A single route serving both stops in order.
    Direct,
    /// A path through the schedule graph.
    Transfer,
}

/// One ranked way of travelling between a pair of stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOption {
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub hops: Path,
    pub total_stops: usize,
    /// Estimated travel time in minutes.
    pub estimated_time: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops_between: Option<u32>,
}

/// Ranked travel options between two stops.
///
/// A document with no options always carries a `reason`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDocument {
    pub from_stop: Stop,
    pub to_stop: Stop,
    pub options: Vec<RouteOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RouteDocument {
    /// A document listing `options`, best first.
    pub fn with_options(from_stop: Stop, to_stop: Stop, options: Vec<RouteOption>) -> Self {
        Self {
            from_stop,
            to_stop,
            options,
            reason: None,
        }
    }

    /// A document recording that nothing was found.
    pub fn not_found(from_stop: Stop, to_stop: Stop, reason: impl Into<String>) -> Self {
        Self {
            from_stop,
            to_stop,
            options: Vec::new(),
            reason: Some(reason.into()),
        }
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Hop, RouteLabel, StopId};

    fn stop(id: u32) -> Stop {
        Stop::new(StopId::new(id), format!("Stop {id}"), 1.5, -2.25)
    }

    #[test]
    fn direct_option_layout() {
        let path = Path::new(vec![Hop::new(RouteLabel::new("R1"), stop(1), stop(2))]).unwrap();
        let doc = RouteDocument::with_options(
            stop(1),
            stop(2),
            vec![RouteOption {
                kind: OptionKind::Direct,
                hops: path,
                total_stops: 1,
                estimated_time: 13,
                stops_between: Some(4),
            }],
        );

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["from_stop"]["stop_id"], 1);
        assert_eq!(value["to_stop"]["name"], "Stop 2");
        assert_eq!(value["options"][0]["type"], "direct");
        assert_eq!(value["options"][0]["total_stops"], 1);
        assert_eq!(value["options"][0]["estimated_time"], 13);
        assert_eq!(value["options"][0]["stops_between"], 4);
        assert_eq!(value["options"][0]["hops"][0]["route"], "R1");
        assert!(value.get("reason").is_none());
    }

    #[test]
    fn transfer_option_omits_stops_between() {
        let option = RouteOption {
            kind: OptionKind::Transfer,
            hops: Path::new(vec![Hop::new(RouteLabel::new("R1"), stop(1), stop(2))]).unwrap(),
            total_stops: 1,
            estimated_time: 15,
            stops_between: None,
        };
        let value = serde_json::to_value(&option).unwrap();
        assert_eq!(value["type"], "transfer");
        assert!(value.get("stops_between").is_none());
    }

    #[test]
    fn not_found_layout() {
        let doc = RouteDocument::not_found(stop(1), stop(2), "no routes");
        assert!(!doc.has_options());

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["options"], serde_json::json!([]));
        assert_eq!(value["reason"], "no routes");
    }
}
