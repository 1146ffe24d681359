//! Visual State Groups
//!
//! A control's appearance is described by several independent groups of
//! mutually exclusive states (for example the scroll indicator mode and the
//! scroll bar separator). Each group is a flat state machine:
//! - exactly one state is current once the group has been entered
//! - requesting the current state again is not a transition
//! - the most recent transitions are recorded for diagnostics

use std::fmt::Debug;
use std::hash::Hash;

/// A state that can be entered by a [`StateGroup`]
pub trait VisualState: Copy + Eq + Hash + Debug {
    /// Name of the state as reported to observers and logs
    fn name(self) -> &'static str;
}

/// Number of transitions a group remembers by default
pub const DEFAULT_HISTORY_LIMIT: usize = 32;

/// A flat group of mutually exclusive visual states
pub struct StateGroup<S: VisualState> {
    name: &'static str,
    current: Option<S>,
    /// Most recent state transitions, oldest first (for debugging)
    history: Vec<(Option<S>, S)>,
    history_limit: usize,
}

impl<S: VisualState> StateGroup<S> {
    /// Create a group that has not entered any state yet
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            current: None,
            history: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Create a group already in `initial`
    pub fn with_initial(name: &'static str, initial: S) -> Self {
        Self {
            name,
            current: Some(initial),
            history: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Keep at most `limit` transitions (0 disables the history)
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Name of the group
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get the current state
    pub fn current(&self) -> Option<S> {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == Some(state)
    }

    /// Get transition history
    pub fn history(&self) -> &[(Option<S>, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Move the group to `state`.
    ///
    /// Returns `true` when the current state changed, `false` when the group
    /// was already in `state`.
    pub fn go_to(&mut self, state: S) -> bool {
        let previous = self.current;
        if previous == Some(state) {
            return false;
        }

        self.current = Some(state);
        if self.history_limit > 0 {
            self.history.push((previous, state));
            self.trim_history();
        }
        true
    }

    fn trim_history(&mut self) {
        if self.history.len() > self.history_limit {
            let excess = self.history.len() - self.history_limit;
            self.history.drain(..excess);
        }
    }

    /// Forget the current state so the next request is always a transition
    pub fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Pointer {
        Idle,
        Hovered,
        Pressed,
    }

    impl VisualState for Pointer {
        fn name(self) -> &'static str {
            match self {
                Pointer::Idle => "Idle",
                Pointer::Hovered => "Hovered",
                Pointer::Pressed => "Pressed",
            }
        }
    }

    #[test]
    fn test_simple_transitions() {
        let mut group = StateGroup::new("PointerStates");
        assert_eq!(group.current(), None);

        assert!(group.go_to(Pointer::Hovered));
        assert!(group.is_in(Pointer::Hovered));

        assert!(group.go_to(Pointer::Pressed));
        assert_eq!(group.current(), Some(Pointer::Pressed));

        assert!(group.go_to(Pointer::Idle));
        assert_eq!(group.current(), Some(Pointer::Idle));
    }

    #[test]
    fn test_repeated_state_is_not_a_transition() {
        let mut group = StateGroup::with_initial("PointerStates", Pointer::Idle);

        assert!(!group.go_to(Pointer::Idle));
        assert!(group.history().is_empty());

        assert!(group.go_to(Pointer::Hovered));
        assert!(!group.go_to(Pointer::Hovered));
        assert_eq!(group.history().len(), 1);
    }

    #[test]
    fn test_history() {
        let mut group = StateGroup::new("PointerStates");

        group.go_to(Pointer::Hovered);
        group.go_to(Pointer::Pressed);

        let history = group.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], (None, Pointer::Hovered));
        assert_eq!(history[1], (Some(Pointer::Hovered), Pointer::Pressed));

        group.clear_history();
        assert!(group.history().is_empty());
    }

    #[test]
    fn test_reset_allows_reentering() {
        let mut group = StateGroup::with_initial("PointerStates", Pointer::Idle);
        group.reset();
        assert!(group.go_to(Pointer::Idle));
        assert_eq!(group.history(), &[(None, Pointer::Idle)]);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut group = StateGroup::new("PointerStates").with_history_limit(4);

        for _ in 0..1000 {
            group.go_to(Pointer::Hovered);
            group.go_to(Pointer::Idle);
        }

        assert_eq!(group.history().len(), 4);
        assert_eq!(
            group.history().last(),
            Some(&(Some(Pointer::Hovered), Pointer::Idle))
        );
    }

    #[test]
    fn test_default_history_limit() {
        let mut group = StateGroup::new("PointerStates");
        for _ in 0..DEFAULT_HISTORY_LIMIT {
            group.go_to(Pointer::Hovered);
            group.go_to(Pointer::Pressed);
        }
        assert_eq!(group.history().len(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(group.history_limit(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn test_disabled_history() {
        let mut group = StateGroup::new("PointerStates").with_history_limit(0);
        assert!(group.go_to(Pointer::Hovered));
        assert!(group.history().is_empty());
        assert!(group.is_in(Pointer::Hovered));
    }

    #[test]
    fn test_state_names() {
        let group: StateGroup<Pointer> = StateGroup::new("PointerStates");
        assert_eq!(group.name(), "PointerStates");
        assert_eq!(Pointer::Pressed.name(), "Pressed");
    }
}
