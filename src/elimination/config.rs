//! Elimination run configuration

use crate::error::{Result, StepdownError};
use crate::value::TargetKind;
use serde::{Deserialize, Serialize};

/// Configuration for one backward elimination run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EliminationConfig {
    /// Target column the trainer predicts
    pub target_column: String,

    /// Kind of the target column, fixed at configuration time
    pub target_kind: TargetKind,

    /// Candidate feature columns, in enumeration order
    pub feature_columns: Vec<String>,

    /// Smallest feature-set size the loop may reach
    pub min_features: usize,
}

impl EliminationConfig {
    /// Create a configuration running down to a single feature
    pub fn new(
        target_column: impl Into<String>,
        target_kind: TargetKind,
        feature_columns: Vec<String>,
    ) -> Self {
        Self {
            target_column: target_column.into(),
            target_kind,
            feature_columns,
            min_features: 1,
        }
    }

    /// Stop the loop early once this many features remain
    pub fn with_min_features(mut self, min_features: usize) -> Self {
        self.min_features = min_features;
        self
    }

    /// Check the configuration before the loop starts
    pub fn validate(&self) -> Result<()> {
        if self.feature_columns.is_empty() {
            return Err(StepdownError::InvalidConfiguration(
                "feature column list is empty".to_string(),
            ));
        }
        if self.min_features == 0 {
            return Err(StepdownError::InvalidConfiguration(
                "min_features must be at least 1".to_string(),
            ));
        }
        if self.min_features > self.feature_columns.len() {
            return Err(StepdownError::InvalidConfiguration(format!(
                "min_features ({}) exceeds available feature columns ({})",
                self.min_features,
                self.feature_columns.len()
            )));
        }
        if self.feature_columns.iter().any(|c| c == &self.target_column) {
            return Err(StepdownError::InvalidConfiguration(format!(
                "target column '{}' listed among feature columns",
                self.target_column
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_floor_is_one() {
        let config = EliminationConfig::new("y", TargetKind::Continuous, columns(&["a", "b"]));
        assert_eq!(config.min_features, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_feature_list_rejected() {
        let config = EliminationConfig::new("y", TargetKind::Continuous, Vec::new());
        assert!(matches!(
            config.validate(),
            Err(StepdownError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_oversized_floor_rejected() {
        let config = EliminationConfig::new("y", TargetKind::Continuous, columns(&["a", "b"]))
            .with_min_features(3);
        assert!(matches!(
            config.validate(),
            Err(StepdownError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_floor_rejected() {
        let config = EliminationConfig::new("y", TargetKind::Continuous, columns(&["a"]))
            .with_min_features(0);
        assert!(matches!(
            config.validate(),
            Err(StepdownError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_target_among_features_rejected() {
        let config = EliminationConfig::new("y", TargetKind::Continuous, columns(&["a", "y"]));
        assert!(matches!(
            config.validate(),
            Err(StepdownError::InvalidConfiguration(_))
        ));
    }
}
