//! In-flight tracking for user-triggered vault operations.
//!
//! Each action the user can trigger is an [`Operation`]. While one is in flight
//! its key binding is inert and the status bar shows a busy message. The worker
//! echoes the operation in every response, success or failure, so the guard is
//! always released.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A guarded user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operation {
    Refresh,
    Add,
    Edit,
    Toggle,
    Delete,
    Copy,
}

impl Operation {
    /// Status text shown while the operation is in flight.
    #[must_use]
    pub const fn busy_text(self) -> &'static str {
        match self {
            Self::Refresh => "Refreshing…",
            Self::Add => "Adding…",
            Self::Edit => "Updating…",
            Self::Toggle => "Changing state…",
            Self::Delete => "Deleting…",
            Self::Copy => "Copying…",
        }
    }
}

/// Set of operations currently in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationGuard {
    in_flight: BTreeSet<Operation>,
}

impl OperationGuard {
    /// Marks `op` as in flight.
    ///
    /// Returns `false`, changing nothing, if it already is.
    ///
    /// ```
    /// use vault_explorer::app::guard::{Operation, OperationGuard};
    ///
    /// let mut guard = OperationGuard::default();
    /// assert!(guard.begin(Operation::Delete));
    /// assert!(!guard.begin(Operation::Delete));
    /// assert!(guard.begin(Operation::Copy));
    /// ```
    pub fn begin(&mut self, op: Operation) -> bool {
        let started = self.in_flight.insert(op);
        if started {
            tracing::debug!(operation = ?op, "operation started");
        } else {
            tracing::debug!(operation = ?op, "operation already in flight, ignoring");
        }
        started
    }

    /// Releases `op`. Releasing an idle operation is a no-op.
    pub fn finish(&mut self, op: Operation) {
        if self.in_flight.remove(&op) {
            tracing::debug!(operation = ?op, "operation finished");
        }
    }

    #[must_use]
    pub fn is_busy(&self, op: Operation) -> bool {
        self.in_flight.contains(&op)
    }

    /// Busy text of an in-flight operation, or `None` when idle.
    #[must_use]
    pub fn busy_status(&self) -> Option<&'static str> {
        self.in_flight.iter().next().map(|op| op.busy_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_releases_and_clears_status() {
        let mut guard = OperationGuard::default();
        guard.begin(Operation::Refresh);
        assert_eq!(guard.busy_status(), Some("Refreshing…"));

        guard.finish(Operation::Refresh);
        assert!(!guard.is_busy(Operation::Refresh));
        assert_eq!(guard.busy_status(), None);
        assert!(guard.begin(Operation::Refresh));
    }

    #[test]
    fn operations_are_independent() {
        let mut guard = OperationGuard::default();
        guard.begin(Operation::Delete);
        guard.begin(Operation::Edit);
        guard.finish(Operation::Delete);

        assert!(guard.is_busy(Operation::Edit));
        assert_eq!(guard.busy_status(), Some("Updating…"));
    }

    #[test]
    fn finishing_idle_operation_is_harmless() {
        let mut guard = OperationGuard::default();
        guard.finish(Operation::Copy);
        assert_eq!(guard, OperationGuard::default());
    }
}
