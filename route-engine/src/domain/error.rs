//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from data source and IO errors.

use super::StopId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Path has no hops
    #[error("path must have at least one hop")]
    EmptyPath,

    /// Consecutive hops don't meet at the same stop
    #[error("hop {position} starts at stop {found} but the previous hop ended at {expected}")]
    BrokenChain {
        position: usize,
        expected: StopId,
        found: StopId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyPath;
        assert_eq!(err.to_string(), "path must have at least one hop");

        let err = DomainError::BrokenChain {
            position: 2,
            expected: StopId::new(300),
            found: StopId::new(301),
        };
        assert_eq!(
            err.to_string(),
            "hop 2 starts at stop 301 but the previous hop ended at 300"
        );
    }
}
