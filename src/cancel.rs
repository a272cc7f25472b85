//! Cooperative run cancellation

use crate::error::{Result, StepdownError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancellation flag.
///
/// The loop controller checks it before every retrain request; a set flag
/// aborts the entire run, not just the current round.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create an unset token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the running loop aborts before its next retrain
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_canceled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Map a set flag to [`StepdownError::Canceled`]
    pub fn check(&self) -> Result<()> {
        if self.is_canceled() {
            Err(StepdownError::Canceled)
        } else {
            Ok(())
        }
    }
}
