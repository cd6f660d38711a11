//! Stop identity and metadata.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id {input:?}: {reason}")]
pub struct InvalidStopId {
    input: String,
    reason: &'static str,
}

/// A numeric stop identifier, assigned by the schedule publisher.
///
/// Ordering follows the numeric value, which is the order stops are
/// processed in by a batch run.
///
/// # Examples
///
/// ```
/// use route_engine::domain::StopId;
///
/// let id = StopId::parse("1042").unwrap();
/// assert_eq!(id.get(), 1042);
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("A12").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(u32);

impl StopId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Parse a stop id from its textual form.
    ///
    /// Surrounding whitespace is ignored; anything other than an unsigned
    /// decimal integer is rejected.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStopId {
                input: s.to_string(),
                reason: "must not be empty",
            });
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStopId {
                input: s.to_string(),
                reason: "must be an unsigned decimal integer",
            });
        }
        trimmed.parse::<u32>().map(Self).map_err(|_| InvalidStopId {
            input: s.to_string(),
            reason: "out of range",
        })
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The band of stop ids considered part of the network.
///
/// Publishers reuse parts of the id space for depots, test stops and
/// similar non-passenger locations; only ids inside the range take part in
/// a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopIdRange(RangeInclusive<StopId>);

impl StopIdRange {
    pub fn new(first: StopId, last: StopId) -> Self {
        Self(first..=last)
    }

    /// A range admitting every id.
    pub fn all() -> Self {
        Self::new(StopId(0), StopId(u32::MAX))
    }

    pub fn contains(&self, id: StopId) -> bool {
        self.0.contains(&id)
    }

    pub fn first(&self) -> StopId {
        *self.0.start()
    }

    pub fn last(&self) -> StopId {
        *self.0.end()
    }
}

impl Default for StopIdRange {
    fn default() -> Self {
        Self::all()
    }
}

/// A stop and its display metadata, as snapshotted into route documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub stop_id: StopId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Stop {
    pub fn new(stop_id: StopId, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            stop_id,
            name: name.into(),
            lat,
            lon,
        }
    }
}
