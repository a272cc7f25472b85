//! Backward elimination loop
//!
//! One [`EliminationLoopController`] drives one run: starting from the
//! full feature set it measures a reference error, then per level tries
//! each remaining feature as the exclusion candidate, permanently drops
//! the one whose exclusion hurt least, and records an entry in the
//! [`FeatureLevelTrace`](crate::trace::FeatureLevelTrace). The loop stops
//! when the set reaches the configured floor (one feature by default).

mod config;
mod controller;
mod round;

pub use config::EliminationConfig;
pub use controller::{EliminationLoopController, LoopState};
pub use round::{EliminationRound, ExclusionCandidate};
