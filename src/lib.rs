//! Stepdown - Backward feature elimination engine
//!
//! This crate provides a sequential feature-selection loop that starts
//! from the full feature set and, level by level, drops the feature whose
//! exclusion hurts the prediction error least:
//! - Per-level error tracking in an append-only trace artifact
//! - Minimal-set selection against an error threshold
//! - A downstream column filter consuming the trace
//!
//! # Modules
//!
//! ## Core
//! - [`elimination`] - The loop controller, its configuration and round bookkeeping
//! - [`evaluator`] - Scalar error from paired (prediction, target) observations
//! - [`features`] - The surviving feature set
//! - [`trace`] - Per-level (error, feature set) history and its interop format
//! - [`selection`] - Minimal-set selection and the column filter
//!
//! ## Collaborators
//! - [`trainer`] - The retrain/predict seam plus a least-squares reference trainer
//! - [`cancel`] - Cooperative run cancellation
//!
//! The loop itself never fits a model: every trial hands the candidate
//! subset to a [`trainer::Trainer`] and evaluates the pairs it returns.

// Core error handling
pub mod error;

// Core loop
pub mod elimination;
pub mod evaluator;
pub mod features;
pub mod selection;
pub mod trace;

// Collaborators
pub mod cancel;
pub mod trainer;

// Values and target typing
pub mod value;

pub use error::{Result, StepdownError};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{Result, StepdownError};

    // Loop
    pub use crate::elimination::{
        EliminationConfig, EliminationLoopController, EliminationRound, LoopState,
    };

    // Evaluation
    pub use crate::evaluator::ErrorEvaluator;
    pub use crate::value::{TargetKind, Value};

    // Artifacts
    pub use crate::features::FeatureSet;
    pub use crate::trace::{FeatureLevelEntry, FeatureLevelTrace};

    // Selection
    pub use crate::selection::{included_columns, select_minimal, SelectionRule};

    // Collaborators
    pub use crate::cancel::CancelToken;
    pub use crate::trainer::{LeastSquaresTrainer, PredictionPair, Trainer};
}
