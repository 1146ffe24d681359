//! Scroll controller visual states
//!
//! Two orthogonal state groups describe how the scroll bars of a scroll view
//! are drawn:
//!
//! - **Indicators**: `NoIndicator`, `MouseIndicator` or `TouchIndicator`
//! - **Separator**: the corner piece joining both scroll bars
//!
//! The state machine is driven in *passes*. Each pass resolves both groups
//! and requests them; a request for the state a group is already in is still
//! reported on the request channel (diagnostics count these), but only real
//! changes reach the change channel.
//!
//! Pass triggers, in the order they run:
//! - template application
//! - a scroll controller changing visibility or scrollability (horizontal
//!   before vertical)
//! - enablement changes, after both controllers were updated
//! - indicators shown by input activity or hidden by the dismiss timer
//! - the auto-hide policy flipping
//!
//! A pass while neither scroll bar is visible does nothing.

use std::sync::{Arc, Mutex};

use glide_core::{
    DismissTimer, InputDeviceKind, Observers, StateGroup, SubscriptionId, VisualState,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::geometry::Axis;

/// Scroll indicator mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorState {
    NoIndicator,
    MouseIndicator,
    TouchIndicator,
}

impl VisualState for IndicatorState {
    fn name(self) -> &'static str {
        match self {
            IndicatorState::NoIndicator => "NoIndicator",
            IndicatorState::MouseIndicator => "MouseIndicator",
            IndicatorState::TouchIndicator => "TouchIndicator",
        }
    }
}

/// State of the separator between the two scroll bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeparatorState {
    Collapsed,
    CollapsedDisabled,
    Expanded,
    CollapsedWithoutAnimation,
    ExpandedWithoutAnimation,
    DisplayedWithoutAnimation,
}

impl VisualState for SeparatorState {
    fn name(self) -> &'static str {
        match self {
            SeparatorState::Collapsed => "ScrollBarsSeparatorCollapsed",
            SeparatorState::CollapsedDisabled => "ScrollBarsSeparatorCollapsedDisabled",
            SeparatorState::Expanded => "ScrollBarsSeparatorExpanded",
            SeparatorState::CollapsedWithoutAnimation => {
                "ScrollBarsSeparatorCollapsedWithoutAnimation"
            }
            SeparatorState::ExpandedWithoutAnimation => {
                "ScrollBarsSeparatorExpandedWithoutAnimation"
            }
            SeparatorState::DisplayedWithoutAnimation => {
                "ScrollBarsSeparatorDisplayedWithoutAnimation"
            }
        }
    }
}

pub const INDICATOR_GROUP: &str = "ScrollingIndicatorStates";
pub const SEPARATOR_GROUP: &str = "ScrollBarsSeparatorStates";

/// A state requested or entered by one of the groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualStateEvent {
    pub group: &'static str,
    pub state: &'static str,
}

/// Rendered state of one scroll bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollControllerState {
    pub is_visible: bool,
    pub can_scroll: bool,
}

/// Indicator and separator state machine for a scroll view
pub struct ScrollStateMachine {
    indicators: StateGroup<IndicatorState>,
    separator: StateGroup<SeparatorState>,
    auto_hide: bool,
    is_enabled: bool,
    /// Device the indicators are currently shown for (`None` = hidden)
    shown_for: InputDeviceKind,
    last_device: InputDeviceKind,
    hide_timer: DismissTimer,
    horizontal: ScrollControllerState,
    vertical: ScrollControllerState,
    requested: Observers<VisualStateEvent>,
    changed: Observers<VisualStateEvent>,
}

impl ScrollStateMachine {
    /// Create a state machine. `hide_delay` is the idle time in seconds
    /// before auto-hiding indicators are dismissed.
    pub fn new(auto_hide: bool, hide_delay: f32) -> Self {
        Self {
            indicators: StateGroup::new(INDICATOR_GROUP),
            separator: StateGroup::new(SEPARATOR_GROUP),
            auto_hide,
            is_enabled: true,
            shown_for: InputDeviceKind::None,
            last_device: InputDeviceKind::None,
            hide_timer: DismissTimer::new(hide_delay),
            horizontal: ScrollControllerState::default(),
            vertical: ScrollControllerState::default(),
            requested: Observers::new(),
            changed: Observers::new(),
        }
    }

    /// Subscribe to every state request, repeated ones included
    pub fn on_state_requested<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&VisualStateEvent) + Send + Sync + 'static,
    {
        self.requested.subscribe(handler)
    }

    /// Subscribe to actual state changes
    pub fn on_state_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&VisualStateEvent) + Send + Sync + 'static,
    {
        self.changed.subscribe(handler)
    }

    /// Remove a subscription from either channel
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.requested.unsubscribe(id) || self.changed.unsubscribe(id)
    }

    pub fn indicator_group(&self) -> &StateGroup<IndicatorState> {
        &self.indicators
    }

    pub fn separator_group(&self) -> &StateGroup<SeparatorState> {
        &self.separator
    }

    pub fn indicator_state(&self) -> Option<IndicatorState> {
        self.indicators.current()
    }

    pub fn separator_state(&self) -> Option<SeparatorState> {
        self.separator.current()
    }

    pub fn is_auto_hiding(&self) -> bool {
        self.auto_hide
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    /// Check if auto-hiding indicators are currently shown
    pub fn are_indicators_shown(&self) -> bool {
        self.shown_for != InputDeviceKind::None
    }

    pub fn last_input_device(&self) -> InputDeviceKind {
        self.last_device
    }

    pub fn controller(&self, axis: Axis) -> ScrollControllerState {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// A fresh template was applied: forget previous states and run a pass
    /// with the scroll bars the template starts with.
    pub fn on_template_applied(
        &mut self,
        horizontal: ScrollControllerState,
        vertical: ScrollControllerState,
    ) {
        self.indicators.reset();
        self.separator.reset();
        self.horizontal = horizontal;
        self.vertical = vertical;
        self.go_to_states(false);
    }

    /// Update one scroll bar. Runs a pass when its state changed.
    pub fn update_controller(&mut self, axis: Axis, state: ScrollControllerState) -> bool {
        let slot = match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        };
        if *slot == state {
            return false;
        }

        *slot = state;
        self.go_to_states(false);
        true
    }

    /// Enable or disable the control.
    ///
    /// Scroll bars are updated first (each may run its own pass), then one
    /// pass runs for the enablement change itself.
    pub fn set_enabled(
        &mut self,
        is_enabled: bool,
        horizontal: ScrollControllerState,
        vertical: ScrollControllerState,
    ) {
        if self.is_enabled == is_enabled {
            return;
        }

        self.is_enabled = is_enabled;
        if !is_enabled {
            self.shown_for = InputDeviceKind::None;
            self.hide_timer.cancel();
        }

        self.update_controller(Axis::Horizontal, horizontal);
        self.update_controller(Axis::Vertical, vertical);
        self.go_to_states(false);
    }

    /// Input activity from a device. Auto-hiding indicators are shown for
    /// it and the dismiss timer is re-armed.
    pub fn on_pointer_activity(&mut self, device: InputDeviceKind) {
        if !self.is_enabled || device == InputDeviceKind::None {
            return;
        }

        self.last_device = device;
        if !self.auto_hide {
            return;
        }

        self.hide_timer.arm();
        if self.shown_for != device {
            self.shown_for = device;
            self.go_to_states(false);
        }
    }

    /// Advance the dismiss timer. Returns `true` when indicators were hidden.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.hide_timer.advance(dt) {
            return false;
        }

        self.shown_for = InputDeviceKind::None;
        self.go_to_states(false);
        true
    }

    /// Switch between auto-hiding and always-visible scroll bars
    pub fn set_auto_hide(&mut self, auto_hide: bool) {
        if self.auto_hide == auto_hide {
            return;
        }

        self.auto_hide = auto_hide;
        self.shown_for = InputDeviceKind::None;
        self.hide_timer.cancel();
        self.go_to_states(true);
    }

    fn resolve_indicator(&self) -> IndicatorState {
        if !self.auto_hide {
            return IndicatorState::MouseIndicator;
        }
        if !self.is_enabled {
            return IndicatorState::NoIndicator;
        }
        match self.shown_for {
            InputDeviceKind::Mouse | InputDeviceKind::Pen => IndicatorState::MouseIndicator,
            InputDeviceKind::Touch => IndicatorState::TouchIndicator,
            InputDeviceKind::None => IndicatorState::NoIndicator,
        }
    }

    fn resolve_separator(&self, auto_hide_changed: bool) -> Option<SeparatorState> {
        if !(self.horizontal.is_visible && self.vertical.is_visible) {
            return None;
        }

        let mouse_indicators = matches!(
            self.shown_for,
            InputDeviceKind::Mouse | InputDeviceKind::Pen
        );
        let expanded = self.is_enabled && (!self.auto_hide || mouse_indicators);

        let state = if auto_hide_changed {
            if !self.auto_hide {
                SeparatorState::DisplayedWithoutAnimation
            } else if expanded {
                SeparatorState::ExpandedWithoutAnimation
            } else {
                SeparatorState::CollapsedWithoutAnimation
            }
        } else if !self.is_enabled {
            SeparatorState::CollapsedDisabled
        } else if expanded {
            SeparatorState::Expanded
        } else {
            SeparatorState::Collapsed
        };
        Some(state)
    }

    /// Run one visual state pass
    fn go_to_states(&mut self, auto_hide_changed: bool) {
        if !self.horizontal.is_visible && !self.vertical.is_visible {
            return;
        }

        let indicator = self.resolve_indicator();
        let separator = self.resolve_separator(auto_hide_changed);

        let mut changes: SmallVec<[VisualStateEvent; 2]> = SmallVec::new();

        let event = VisualStateEvent {
            group: INDICATOR_GROUP,
            state: indicator.name(),
        };
        self.request(&event);
        if self.indicators.go_to(indicator) {
            changes.push(event);
        }

        if let Some(separator) = separator {
            let event = VisualStateEvent {
                group: SEPARATOR_GROUP,
                state: separator.name(),
            };
            self.request(&event);
            if self.separator.go_to(separator) {
                changes.push(event);
            }
        }

        for change in &changes {
            self.changed.notify(change);
        }
    }

    fn request(&self, event: &VisualStateEvent) {
        tracing::trace!(
            target: "glide::scroll_view",
            group = event.group,
            "ScrollView::GoToState {}",
            event.state
        );
        self.requested.notify(event);
    }
}

/// Per-state tally of visual state requests
#[derive(Debug, Default, Clone)]
pub struct VisualStateCounts {
    counts: FxHashMap<&'static str, u32>,
}

/// Counts shared with an observer closure
pub type SharedVisualStateCounts = Arc<Mutex<VisualStateCounts>>;

impl VisualStateCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared tally and the handler that feeds it
    pub fn shared() -> (
        SharedVisualStateCounts,
        impl Fn(&VisualStateEvent) + Send + Sync + 'static,
    ) {
        let counts = Arc::new(Mutex::new(Self::new()));
        let sink = counts.clone();
        let handler = move |event: &VisualStateEvent| {
            sink.lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .record(event);
        };
        (counts, handler)
    }

    pub fn record(&mut self, event: &VisualStateEvent) {
        *self.counts.entry(event.state).or_default() += 1;
    }

    /// Number of requests recorded for `state`
    pub fn count<S: VisualState>(&self, state: S) -> u32 {
        self.counts.get(state.name()).copied().unwrap_or(0)
    }

    /// Total number of requests recorded
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }
}
