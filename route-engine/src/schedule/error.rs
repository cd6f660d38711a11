//! Schedule source error types.

use std::path::PathBuf;

/// Errors that can occur when reading schedule data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A required feed file is absent
    #[error("missing feed file: {}", .0.display())]
    MissingFile(PathBuf),

    /// A feed file could not be read or parsed
    #[error("failed to read {file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    /// The feed parsed but holds nothing usable
    #[error("feed contains no {0}")]
    Empty(&'static str),

    /// The backing store could not answer a query
    #[error("schedule query failed: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SourceError::MissingFile(PathBuf::from("/feed/stops.txt"));
        assert_eq!(err.to_string(), "missing feed file: /feed/stops.txt");

        let err = SourceError::Empty("stops");
        assert_eq!(err.to_string(), "feed contains no stops");

        let err = SourceError::Unavailable("connection reset".into());
        assert_eq!(err.to_string(), "schedule query failed: connection reset");
    }
}
