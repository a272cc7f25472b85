//! The elimination loop state machine

use super::config::EliminationConfig;
use super::round::EliminationRound;
use crate::cancel::CancelToken;
use crate::error::{Result, StepdownError};
use crate::evaluator::ErrorEvaluator;
use crate::features::FeatureSet;
use crate::trace::{FeatureLevelEntry, FeatureLevelTrace};
use crate::trainer::Trainer;
use tracing::{debug, info};

/// Phase of the elimination loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Not yet started
    Initial,
    /// Measuring the full feature set with zero exclusions
    Reference,
    /// Trying the feature at this enumeration index as the exclusion candidate
    Excluding(usize),
    /// All candidates of the level tried; committing the removal
    LevelComplete,
    /// Run finished; the trace is the final artifact
    Terminated,
}

/// Drives one backward elimination run.
///
/// Owns the surviving [`FeatureSet`], runs one [`EliminationRound`] per
/// level, and accumulates the [`FeatureLevelTrace`]. Strictly sequential:
/// one blocking train+predict call at a time, no internal threads. One
/// controller instance drives one run; call [`reset`](Self::reset) before
/// reusing it.
#[derive(Debug)]
pub struct EliminationLoopController {
    config: EliminationConfig,
    evaluator: ErrorEvaluator,
    features: FeatureSet,
    round: EliminationRound,
    state: LoopState,
    trace: FeatureLevelTrace,
    cancel: CancelToken,
}

impl EliminationLoopController {
    /// Validate the configuration and set up a run
    pub fn new(config: EliminationConfig) -> Result<Self> {
        config.validate()?;
        let features = FeatureSet::new(config.feature_columns.clone())?;
        let evaluator = ErrorEvaluator::new(config.target_kind);
        let trace = FeatureLevelTrace::new(config.target_column.clone());
        Ok(Self {
            config,
            evaluator,
            features,
            round: EliminationRound::new(),
            state: LoopState::Initial,
            trace,
            cancel: CancelToken::new(),
        })
    }

    /// Attach a cancellation token checked before every retrain request
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Current phase of the loop
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Levels recorded so far.
    ///
    /// After cancellation or failure this holds the last fully completed
    /// levels; such partial results are discardable, not usable.
    pub fn trace(&self) -> &FeatureLevelTrace {
        &self.trace
    }

    /// Features still included in the search
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// Drop run state back to `Initial` for a fresh run
    pub fn reset(&mut self) -> Result<()> {
        self.features = FeatureSet::new(self.config.feature_columns.clone())?;
        self.round.reset();
        self.trace = FeatureLevelTrace::new(self.config.target_column.clone());
        self.state = LoopState::Initial;
        Ok(())
    }

    /// Run the loop to completion and hand off the trace
    pub fn run<T: Trainer>(&mut self, trainer: &mut T) -> Result<FeatureLevelTrace> {
        if self.state != LoopState::Initial {
            return Err(StepdownError::InvalidConfiguration(
                "controller already ran; call reset() first".to_string(),
            ));
        }

        info!(
            features = self.features.len(),
            target = %self.config.target_column,
            "starting backward elimination"
        );
        while self.state != LoopState::Terminated {
            self.advance(trainer)?;
        }
        info!(levels = self.trace.len(), "elimination finished");
        Ok(self.trace.clone())
    }

    /// Perform one state transition, issuing at most one retrain request
    fn advance<T: Trainer>(&mut self, trainer: &mut T) -> Result<()> {
        match self.state {
            LoopState::Initial => {
                self.state = LoopState::Reference;
            }
            LoopState::Reference => {
                let error = self.trial(trainer, None)?;
                debug!(error = error, size = self.features.len(), "reference level");
                self.trace
                    .push(FeatureLevelEntry::new(error, self.features.names().to_vec()))?;
                self.state = if self.features.len() <= self.config.min_features {
                    LoopState::Terminated
                } else {
                    LoopState::Excluding(0)
                };
            }
            LoopState::Excluding(index) => {
                let feature = match self.features.get(index) {
                    Some(name) => name.to_string(),
                    None => {
                        return Err(StepdownError::TrainingError(format!(
                            "exclusion index {index} out of range for {} features",
                            self.features.len()
                        )))
                    }
                };
                let error = self.trial(trainer, Some(&feature))?;
                debug!(candidate = %feature, error = error, "exclusion trial");
                self.round.record(index, &feature, error);

                self.state = if index + 1 >= self.features.len() {
                    LoopState::LevelComplete
                } else {
                    LoopState::Excluding(index + 1)
                };
            }
            LoopState::LevelComplete => {
                let best = self.round.best().cloned().ok_or_else(|| {
                    StepdownError::TrainingError(
                        "no usable exclusion candidate: every trial error was incomparable"
                            .to_string(),
                    )
                })?;
                self.features.remove(&best.feature)?;
                self.trace.push(FeatureLevelEntry::new(
                    best.error,
                    self.features.names().to_vec(),
                ))?;
                info!(
                    dropped = %best.feature,
                    error = best.error,
                    remaining = self.features.len(),
                    "level complete"
                );
                self.round.reset();

                self.state = if self.features.len() <= self.config.min_features {
                    LoopState::Terminated
                } else {
                    LoopState::Excluding(0)
                };
            }
            LoopState::Terminated => {}
        }
        Ok(())
    }

    /// One train+predict cycle with `excluded` left out of the current set
    fn trial<T: Trainer>(&self, trainer: &mut T, excluded: Option<&str>) -> Result<f64> {
        self.cancel.check()?;

        let subset = match excluded {
            Some(name) => self.features.without(name),
            None => self.features.names().to_vec(),
        };
        let pairs = trainer.train_predict(&subset)?;

        let (predictions, targets): (Vec<_>, Vec<_>) = pairs
            .into_iter()
            .map(|pair| (pair.predicted, pair.actual))
            .unzip();
        self.evaluator.evaluate(&predictions, &targets)
    }
}
