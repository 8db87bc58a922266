//! Pipeline configuration

use crate::error::{PersistenceError, Result};

/// Parameters of one persistence computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistenceConfig {
    /// k for the k-NN core distance of mutual reachability
    pub k: usize,
    /// Highest simplex dimension in the filtration
    pub max_dimension: usize,
    /// Ceiling on the number of simplices, `None` for unbounded
    pub max_simplices: Option<usize>,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            k: 5,
            max_dimension: 3,
            max_simplices: Some(1_000_000),
        }
    }
}

impl PersistenceConfig {
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: usize) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    pub fn with_max_simplices(mut self, max_simplices: Option<usize>) -> Self {
        self.max_simplices = max_simplices;
        self
    }

    /// Reject settings that cannot produce a meaningful filtration.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(PersistenceError::InvalidConfig(
                "k nearest neighbours must be at least 1".into(),
            ));
        }
        if self.max_simplices == Some(0) {
            return Err(PersistenceError::InvalidConfig(
                "max_simplices must allow at least one simplex".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PersistenceConfig::default();
        assert_eq!(config.k, 5);
        assert_eq!(config.max_dimension, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(PersistenceConfig::default().with_k(0).validate().is_err());
        assert!(PersistenceConfig::default()
            .with_max_simplices(Some(0))
            .validate()
            .is_err());
        assert!(PersistenceConfig::default()
            .with_max_dimension(0)
            .with_max_simplices(None)
            .validate()
            .is_ok());
    }
}
