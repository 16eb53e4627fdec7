//! Debounced substring search.
//!
//! Matching is a case-insensitive substring test over a row's searchable text.
//! Typing does not filter immediately: every keystroke arms a timer and only the
//! last timer to fire applies the query.

/// Delay after the last keystroke before the filter is applied.
pub const SEARCH_DEBOUNCE_SECONDS: f64 = 0.4;

/// Case-insensitive substring match. An empty query matches everything.
///
/// ```
/// use vault_explorer::app::search::matches;
///
/// assert!(matches("db-password owner payments", "PAY"));
/// assert!(matches("anything", ""));
/// assert!(!matches("db-password", "api"));
/// ```
#[must_use]
pub fn matches(text: &str, query: &str) -> bool {
    query.is_empty() || text.to_lowercase().contains(&query.to_lowercase())
}

/// Counts armed timers so only the last one applies the filter.
///
/// Zellij timers cannot be cancelled, so a reset is modelled by ignoring every
/// timer but the most recent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debounce {
    pending: usize,
}

impl Debounce {
    /// Records a keystroke; the caller must arm one timer per call.
    pub fn arm(&mut self) {
        self.pending += 1;
    }

    /// Consumes one fired timer. Returns `true` when it was the last armed one.
    pub fn fire(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        self.pending == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_last_timer_applies() {
        let mut debounce = Debounce::default();
        debounce.arm();
        debounce.arm();
        debounce.arm();

        assert!(!debounce.fire());
        assert!(!debounce.fire());
        assert!(debounce.fire());
        assert_eq!(debounce, Debounce::default());
    }

    #[test]
    fn stray_timer_is_ignored() {
        let mut debounce = Debounce::default();
        assert!(!debounce.fire());
    }

    #[test]
    fn matching_ignores_case_on_both_sides() {
        assert!(matches("Owner TEAM-A", "team-a"));
        assert!(matches("owner team-a", "TEAM"));
    }
}
