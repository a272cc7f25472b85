//! Prediction error computation

use crate::error::{Result, StepdownError};
use crate::value::{TargetKind, Value};
use serde::{Deserialize, Serialize};

/// Computes a scalar error from paired (prediction, target) observations.
///
/// Pure function over one pass of paired rows; a missing value on either
/// side is fatal, since comparing levels on partially-missing data would
/// bias the elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvaluator {
    kind: TargetKind,
}

impl ErrorEvaluator {
    /// Create an evaluator for the given target kind
    pub fn new(kind: TargetKind) -> Self {
        Self { kind }
    }

    /// Evaluator for numeric targets
    pub fn continuous() -> Self {
        Self::new(TargetKind::Continuous)
    }

    /// Evaluator for class-label targets
    pub fn categorical() -> Self {
        Self::new(TargetKind::Categorical)
    }

    /// The configured target kind
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Evaluate paired rows.
    ///
    /// Continuous targets yield the square root of the summed squared
    /// differences (not normalized by row count); categorical targets yield
    /// the fraction of mismatched rows in 0.0..=1.0.
    pub fn evaluate(&self, predictions: &[Value], targets: &[Value]) -> Result<f64> {
        if predictions.len() != targets.len() {
            return Err(StepdownError::DataError(format!(
                "paired sequences differ in length: {} predictions vs {} targets",
                predictions.len(),
                targets.len()
            )));
        }

        match self.kind {
            TargetKind::Continuous => {
                let mut sum = 0.0;
                for (row, (p, t)) in predictions.iter().zip(targets.iter()).enumerate() {
                    let p = Self::require_number(p, row)?;
                    let t = Self::require_number(t, row)?;
                    let diff = p - t;
                    sum += diff * diff;
                }
                Ok(sum.sqrt())
            }
            TargetKind::Categorical => {
                let mut wrong = 0usize;
                for (row, (p, t)) in predictions.iter().zip(targets.iter()).enumerate() {
                    if p.is_missing() || t.is_missing() {
                        return Err(StepdownError::MissingValue { row });
                    }
                    if p != t {
                        wrong += 1;
                    }
                }
                // An empty row set divides 0 by 0 and yields NaN.
                Ok(wrong as f64 / predictions.len() as f64)
            }
        }
    }

    fn require_number(value: &Value, row: usize) -> Result<f64> {
        match value {
            Value::Number(v) => Ok(*v),
            Value::Missing => Err(StepdownError::MissingValue { row }),
            Value::Token(t) => Err(StepdownError::DataError(format!(
                "non-numeric value '{t}' at row {row} in a continuous evaluation"
            ))),
        }
    }
}
