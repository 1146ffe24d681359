//! Blocking waits on scroll view events
//!
//! [`StateProbe`] subscribes to a [`ScrollView`] and buffers visual state
//! transitions and anchor requests in channels, so a caller can wait for one
//! with a deadline instead of polling.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use glide_core::{Result, ScrollError, SubscriptionId, VisualState};

use crate::anchor::AnchorRequestedArgs;
use crate::visual_states::VisualStateEvent;
use crate::widgets::ScrollView;

/// Buffers events from a scroll view until they are waited for
pub struct StateProbe {
    states: Receiver<VisualStateEvent>,
    anchors: Receiver<AnchorRequestedArgs>,
    subscriptions: [SubscriptionId; 2],
}

impl StateProbe {
    /// Start buffering transitions and anchor requests from `view`
    pub fn attach(view: &mut ScrollView) -> Self {
        let (state_tx, states) = mpsc::channel();
        let (anchor_tx, anchors) = mpsc::channel();

        let state_tx = Mutex::new(state_tx);
        let changed = view.on_visual_state_changed(move |event| forward(&state_tx, *event));
        let anchor_tx = Mutex::new(anchor_tx);
        let anchor = view.on_anchor_requested(move |args| forward(&anchor_tx, args.clone()));

        Self {
            states,
            anchors,
            subscriptions: [changed, anchor],
        }
    }

    /// Wait until some group transitions into `state`.
    ///
    /// Transitions to other states buffered before it are consumed.
    pub fn wait_for_state<S: VisualState>(&self, state: S, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.states.recv_timeout(remaining) {
                Ok(event) if event.state == state.name() => return Ok(()),
                Ok(_) => continue,
                Err(_) => {
                    return Err(ScrollError::Timeout {
                        expected: state.name().to_string(),
                        waited: timeout,
                    })
                }
            }
        }
    }

    /// Wait for the next anchor request
    pub fn wait_for_anchor_request(&self, timeout: Duration) -> Result<AnchorRequestedArgs> {
        self.anchors
            .recv_timeout(timeout)
            .map_err(|_| ScrollError::Timeout {
                expected: "AnchorRequested".to_string(),
                waited: timeout,
            })
    }

    /// Stop buffering events from `view`
    pub fn detach(self, view: &mut ScrollView) {
        for id in self.subscriptions {
            view.unsubscribe(id);
        }
    }
}

fn forward<T>(sender: &Mutex<Sender<T>>, value: T) {
    let sender = sender
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    // The probe may have been dropped while the view lives on
    let _ = sender.send(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Size};
    use crate::tree::ElementTree;
    use crate::visual_states::{IndicatorState, SeparatorState};
    use crate::widgets::{ScrollPresenter, ScrollViewOptions};

    const SHORT: Duration = Duration::from_millis(20);

    #[test]
    fn test_wait_for_buffered_state() {
        let mut view = ScrollView::new(ScrollViewOptions::default());
        let probe = StateProbe::attach(&mut view);

        view.set_horizontal_scroll_bar_visibility(crate::ScrollBarVisibility::Visible);
        view.set_vertical_scroll_bar_visibility(crate::ScrollBarVisibility::Visible);
        view.apply_template(ScrollPresenter::new());

        probe
            .wait_for_state(SeparatorState::Collapsed, SHORT)
            .unwrap();
    }

    #[test]
    fn test_wait_times_out() {
        let mut view = ScrollView::new(ScrollViewOptions::default());
        let probe = StateProbe::attach(&mut view);

        let err = probe
            .wait_for_state(IndicatorState::TouchIndicator, SHORT)
            .unwrap_err();
        assert_eq!(
            err,
            ScrollError::Timeout {
                expected: "TouchIndicator".to_string(),
                waited: SHORT,
            }
        );
        assert!(probe.wait_for_anchor_request(SHORT).is_err());
    }

    #[test]
    fn test_wait_for_anchor_request() {
        let mut tree = ElementTree::new();
        let content = tree.create_element(Rect::new(0.0, 0.0, 300.0, 1000.0));

        let mut view = ScrollView::new(ScrollViewOptions::default());
        let probe = StateProbe::attach(&mut view);
        view.set_content(Some(content));
        view.on_size_changed(&tree, Size::new(300.0, 200.0));
        view.apply_template(ScrollPresenter::new());
        view.set_vertical_anchor_ratio(0.5).unwrap();
        view.invalidate_arrange(&tree).unwrap();

        let args = probe.wait_for_anchor_request(SHORT).unwrap();
        assert!(args.anchor_candidates.is_empty());
        assert_eq!(args.anchor_element, None);
    }

    #[test]
    fn test_detach_stops_buffering() {
        let mut view = ScrollView::new(ScrollViewOptions::always_visible_controllers());
        let probe = StateProbe::attach(&mut view);
        let states = StateProbe::attach(&mut view);
        probe.detach(&mut view);

        view.set_horizontal_scroll_bar_visibility(crate::ScrollBarVisibility::Visible);
        view.apply_template(ScrollPresenter::new());
        states
            .wait_for_state(IndicatorState::MouseIndicator, SHORT)
            .unwrap();
    }
}
