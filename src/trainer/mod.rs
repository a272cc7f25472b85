//! Train/predict collaborators
//!
//! The elimination loop never fits a model itself; every trial delegates
//! one train+predict cycle to a [`Trainer`] and evaluates the returned
//! pairs. How the evaluation rows are produced (resubstitution, holdout,
//! cross-validation) is the collaborator's decision.

pub mod least_squares;

pub use least_squares::LeastSquaresTrainer;

use crate::error::Result;
use crate::value::Value;

/// Paired prediction/target observation from one train+predict trial
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionPair {
    /// Model output for the row
    pub predicted: Value,
    /// Observed target for the row
    pub actual: Value,
}

impl PredictionPair {
    /// Create a pair
    pub fn new(predicted: impl Into<Value>, actual: impl Into<Value>) -> Self {
        Self {
            predicted: predicted.into(),
            actual: actual.into(),
        }
    }
}

/// A retrain/predict collaborator.
///
/// Given a feature subset, retrains its model on those columns and returns
/// paired (prediction, target) observations for the evaluation rows.
pub trait Trainer {
    /// Run one train+predict cycle restricted to the given feature columns
    fn train_predict(&mut self, features: &[String]) -> Result<Vec<PredictionPair>>;
}
