//! Search configuration for the route planner.

/// Error returned for search settings the planner can't work with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid search configuration: {reason}")]
pub struct InvalidSearchConfig {
    reason: &'static str,
}

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of hops in a transfer path.
    pub max_transfer_hops: usize,

    /// Maximum number of options kept per stop pair.
    pub max_options: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_transfer_hops: usize, max_options: usize) -> Self {
        Self {
            max_transfer_hops,
            max_options,
        }
    }

    /// Set the hop bound for transfer search.
    pub fn with_max_transfer_hops(mut self, hops: usize) -> Self {
        self.max_transfer_hops = hops;
        self
    }

    /// Set how many options are retained per pair.
    pub fn with_max_options(mut self, n: usize) -> Self {
        self.max_options = n;
        self
    }

    /// Reject settings that would discard every option found.
    pub fn validate(&self) -> Result<(), InvalidSearchConfig> {
        if self.max_options == 0 {
            return Err(InvalidSearchConfig {
                reason: "max_options must be at least 1",
            });
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_transfer_hops: 3,
            max_options: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.max_transfer_hops, 3);
        assert_eq!(config.max_options, 5);
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(2, 8);

        assert_eq!(config.max_transfer_hops, 2);
        assert_eq!(config.max_options, 8);
    }

    #[test]
    fn builder_methods() {
        let config = SearchConfig::default()
            .with_max_transfer_hops(4)
            .with_max_options(1);

        assert_eq!(config, SearchConfig::new(4, 1));
    }

    #[test]
    fn validate_rejects_zero_options() {
        assert!(SearchConfig::default().validate().is_ok());
        assert!(SearchConfig::new(0, 1).validate().is_ok());

        let err = SearchConfig::new(3, 0).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid search configuration: max_options must be at least 1"
        );
    }
}
