//! Cooperative cancellation for the backtracking searches
//!
//! Worst-case backtracking is unbounded, so every recursive call checks a
//! [`SearchControl`] on entry. A search stops when it is cancelled from
//! outside or when its node-visit budget runs out. Whatever was found up to
//! that point is still returned.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Shared stop signal plus an optional node-visit budget
///
/// Cloning is cheap and every clone observes the same state, so one control
/// can be handed to each concurrent branch.
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    cancelled: Arc<AtomicBool>,
    visits: Arc<AtomicUsize>,
    budget: Option<usize>,
}

impl SearchControl {
    /// A control with no budget that only stops on [`SearchControl::cancel`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A control that stops after `budget` node visits
    #[must_use]
    pub fn with_budget(budget: usize) -> Self {
        Self {
            budget: Some(budget),
            ..Self::default()
        }
    }

    /// Ask every search sharing this control to stop
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Record one node visit; returns false once the search should stop
    #[must_use]
    pub fn visit(&self) -> bool {
        if self.is_cancelled() {
            return false;
        }
        let Some(budget) = self.budget else {
            return true;
        };

        if self.visits.fetch_add(1, Ordering::Relaxed) < budget {
            true
        } else {
            self.cancel();
            false
        }
    }

    /// Nodes visited so far (only tracked when a budget is set)
    #[must_use]
    pub fn visits(&self) -> usize {
        self.visits.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_control_keeps_going() {
        let control = SearchControl::new();
        assert!((0..1000).all(|_| control.visit()));
        assert!(!control.is_cancelled());
    }

    #[test]
    fn budget_exhaustion_cancels() {
        let control = SearchControl::with_budget(3);
        assert!(control.visit());
        assert!(control.visit());
        assert!(control.visit());
        assert!(!control.visit());
        assert!(control.is_cancelled());
    }

    #[test]
    fn clones_share_cancellation() {
        let control = SearchControl::new();
        let branch = control.clone();
        control.cancel();
        assert!(!branch.visit());
    }
}
