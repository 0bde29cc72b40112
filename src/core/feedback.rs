//! Progress feedback and cooperative cancellation
//!
//! The pipeline reports free-text progress messages and an integer
//! percentage through a [`Feedback`] sink, and polls the same sink for
//! cancellation. Cancellation is cooperative and coarse-grained: the
//! stager polls it only at layer boundaries, never mid-write and never
//! during the conversion step.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

/// Feedback sink for pipeline progress
pub trait Feedback: Send + Sync {
    /// Record a free-text progress message
    fn push_info(&self, message: &str);

    /// Record overall progress as a percentage (0-100, non-decreasing)
    fn set_progress(&self, percent: u8);

    /// Whether cancellation has been requested
    fn is_canceled(&self) -> bool;
}

/// Feedback sink for CLI runs
///
/// Messages go to the structured log and to stdout; the cancellation flag
/// is shared with the signal handler in `main`.
pub struct ConsoleFeedback {
    cancel: Arc<AtomicBool>,
    last_percent: AtomicU8,
}

impl ConsoleFeedback {
    pub fn new() -> Self {
        Self::with_cancel_flag(Arc::new(AtomicBool::new(false)))
    }

    /// Create a sink polling an externally owned cancellation flag
    pub fn with_cancel_flag(cancel: Arc<AtomicBool>) -> Self {
        Self {
            cancel,
            last_percent: AtomicU8::new(0),
        }
    }

    /// Shared flag the signal handler raises to request cancellation
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }
}

impl Default for ConsoleFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl Feedback for ConsoleFeedback {
    fn push_info(&self, message: &str) {
        tracing::info!("{message}");
        println!("  {message}");
    }

    fn set_progress(&self, percent: u8) {
        // The contract is non-decreasing; drop late-arriving lower values.
        let previous = self.last_percent.load(Ordering::Relaxed);
        if percent < previous {
            return;
        }
        self.last_percent.store(percent, Ordering::Relaxed);
        tracing::debug!(percent, "Progress");
        println!("  [{percent:>3}%]");
    }

    fn is_canceled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

/// No-op feedback sink for library callers that don't track progress
pub struct NullFeedback;

impl Feedback for NullFeedback {
    fn push_info(&self, _message: &str) {}
    fn set_progress(&self, _percent: u8) {}
    fn is_canceled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_feedback_cancel_flag() {
        let feedback = ConsoleFeedback::new();
        assert!(!feedback.is_canceled());

        feedback.cancel_flag().store(true, Ordering::Relaxed);
        assert!(feedback.is_canceled());
    }

    #[test]
    fn test_null_feedback_never_cancels() {
        let feedback = NullFeedback;
        assert!(!feedback.is_canceled());
        feedback.push_info("ignored");
        feedback.set_progress(50);
    }
}
