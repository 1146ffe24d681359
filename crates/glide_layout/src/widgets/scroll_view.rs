//! Scroll view control
//!
//! The outer scrollable control. It owns the user-facing configuration and
//! the scroll controller visual states, and delegates scrolling, zooming and
//! anchoring to its [`ScrollPresenter`] part once a template supplied one.
//!
//! Configuration written before the template is applied is kept on the view
//! and cloned onto the presenter by [`ScrollView::apply_template`]. Every
//! later write is forwarded immediately, so the view and its presenter never
//! disagree.
//!
//! # Example
//!
//! ```rust
//! use glide_layout::geometry::{Rect, Size};
//! use glide_layout::tree::ElementTree;
//! use glide_layout::visual_states::IndicatorState;
//! use glide_layout::widgets::{ScrollPresenter, ScrollView, ScrollViewOptions};
//!
//! let mut tree = ElementTree::new();
//! let content = tree.create_element(Rect::new(0.0, 0.0, 1200.0, 600.0));
//!
//! let mut view = ScrollView::new(ScrollViewOptions::default());
//! view.set_content(Some(content));
//! view.on_size_changed(&tree, Size::new(300.0, 200.0));
//! view.apply_template(ScrollPresenter::new());
//! view.invalidate_arrange(&tree).unwrap();
//!
//! assert_eq!(view.scrollable_width(), 900.0);
//! assert_eq!(view.indicator_state(), Some(IndicatorState::NoIndicator));
//! ```

use glide_core::{
    InputDeviceKind, InputKind, InputKinds, Observers, Result, ScrollError, SubscriptionId,
};

use crate::anchor::AnchorRequestedArgs;
use crate::geometry::{Axis, Point, Size};
use crate::properties::{
    ChainingMode, ContentOrientation, RailingMode, ScrollBarVisibility, ScrollMode,
    ScrollProperties, ZoomMode,
};
use crate::tree::{ElementId, ElementTree};
use crate::visual_states::{
    IndicatorState, ScrollControllerState, ScrollStateMachine, SeparatorState, VisualStateEvent,
};

use super::scroll_presenter::{ScrollInputOutcome, ScrollPresenter};

/// Construction options for a [`ScrollView`]
#[derive(Debug, Clone, Copy)]
pub struct ScrollViewOptions {
    /// Hide scroll bars while there is no input activity
    pub auto_hide_scroll_controllers: bool,
    /// Idle time in seconds before auto-hiding indicators are dismissed
    pub hide_indicators_delay: f32,
    pub horizontal_scroll_bar_visibility: ScrollBarVisibility,
    pub vertical_scroll_bar_visibility: ScrollBarVisibility,
}

impl Default for ScrollViewOptions {
    fn default() -> Self {
        Self {
            auto_hide_scroll_controllers: true,
            hide_indicators_delay: 1.5,
            horizontal_scroll_bar_visibility: ScrollBarVisibility::Auto,
            vertical_scroll_bar_visibility: ScrollBarVisibility::Auto,
        }
    }
}

impl ScrollViewOptions {
    /// Options with scroll bars that never auto-hide
    pub fn always_visible_controllers() -> Self {
        Self {
            auto_hide_scroll_controllers: false,
            ..Default::default()
        }
    }
}

/// Getter and setter pair for a property mirrored onto the presenter
macro_rules! mirrored_property {
    ($(#[$meta:meta])* $field:ident, $setter:ident: $ty:ty) => {
        $(#[$meta])*
        pub fn $field(&self) -> $ty {
            self.properties.$field
        }

        pub fn $setter(&mut self, value: $ty) {
            if self.properties.$field != value {
                self.properties.$field = value;
                self.mirror_properties();
            }
        }
    };
}

/// Scrollable container control
pub struct ScrollView {
    properties: ScrollProperties,
    horizontal_scroll_bar_visibility: ScrollBarVisibility,
    vertical_scroll_bar_visibility: ScrollBarVisibility,
    is_enabled: bool,
    content: Option<ElementId>,
    viewport: Size,
    presenter: Option<ScrollPresenter>,
    states: ScrollStateMachine,
    anchor_requested: Observers<AnchorRequestedArgs>,
}

impl Default for ScrollView {
    fn default() -> Self {
        Self::new(ScrollViewOptions::default())
    }
}

impl ScrollView {
    pub fn new(options: ScrollViewOptions) -> Self {
        Self {
            properties: ScrollProperties::default(),
            horizontal_scroll_bar_visibility: options.horizontal_scroll_bar_visibility,
            vertical_scroll_bar_visibility: options.vertical_scroll_bar_visibility,
            is_enabled: true,
            content: None,
            viewport: Size::ZERO,
            presenter: None,
            states: ScrollStateMachine::new(
                options.auto_hide_scroll_controllers,
                options.hide_indicators_delay,
            ),
            anchor_requested: Observers::new(),
        }
    }

    // =========================================================================
    // Template
    // =========================================================================

    /// Install the presenter part.
    ///
    /// All configuration is cloned onto it, the scroll controllers are created
    /// from the presenter's current geometry and a visual state pass runs.
    pub fn apply_template(&mut self, mut presenter: ScrollPresenter) {
        presenter.apply_properties(self.properties);
        presenter.set_content(self.content);
        presenter.set_viewport(self.viewport);
        self.presenter = Some(presenter);

        let horizontal = self.compute_controller(Axis::Horizontal);
        let vertical = self.compute_controller(Axis::Vertical);
        tracing::debug!(
            target: "glide::scroll_view",
            ?horizontal,
            ?vertical,
            "template applied"
        );
        self.states.on_template_applied(horizontal, vertical);
    }

    pub fn is_template_applied(&self) -> bool {
        self.presenter.is_some()
    }

    /// The presenter part, once a template supplied one
    pub fn scroll_presenter_part(&self) -> Option<&ScrollPresenter> {
        self.presenter.as_ref()
    }

    pub fn scroll_presenter_part_mut(&mut self) -> Option<&mut ScrollPresenter> {
        self.presenter.as_mut()
    }

    fn presenter_mut(&mut self) -> Result<&mut ScrollPresenter> {
        self.presenter.as_mut().ok_or(ScrollError::TemplateNotApplied)
    }

    // =========================================================================
    // Mirrored configuration
    // =========================================================================

    mirrored_property!(
        /// Input kinds the presenter does not react to
        ignored_input_kinds, set_ignored_input_kinds: InputKinds
    );
    mirrored_property!(content_orientation, set_content_orientation: ContentOrientation);
    mirrored_property!(
        horizontal_scroll_chaining_mode,
        set_horizontal_scroll_chaining_mode: ChainingMode
    );
    mirrored_property!(
        vertical_scroll_chaining_mode,
        set_vertical_scroll_chaining_mode: ChainingMode
    );
    mirrored_property!(
        horizontal_scroll_railing_mode,
        set_horizontal_scroll_railing_mode: RailingMode
    );
    mirrored_property!(
        vertical_scroll_railing_mode,
        set_vertical_scroll_railing_mode: RailingMode
    );
    mirrored_property!(horizontal_scroll_mode, set_horizontal_scroll_mode: ScrollMode);
    mirrored_property!(vertical_scroll_mode, set_vertical_scroll_mode: ScrollMode);
    mirrored_property!(zoom_mode, set_zoom_mode: ZoomMode);
    mirrored_property!(zoom_chaining_mode, set_zoom_chaining_mode: ChainingMode);

    pub fn min_zoom_factor(&self) -> f64 {
        self.properties.min_zoom_factor
    }

    /// Set the minimum zoom factor. The previous value is kept on error.
    pub fn set_min_zoom_factor(&mut self, value: f64) -> Result<()> {
        self.write_validated("min_zoom_factor", |props| props.set_min_zoom_factor(value))
    }

    pub fn max_zoom_factor(&self) -> f64 {
        self.properties.max_zoom_factor
    }

    /// Set the maximum zoom factor. The previous value is kept on error.
    pub fn set_max_zoom_factor(&mut self, value: f64) -> Result<()> {
        self.write_validated("max_zoom_factor", |props| props.set_max_zoom_factor(value))
    }

    pub fn horizontal_anchor_ratio(&self) -> f64 {
        self.properties.horizontal_anchor_ratio
    }

    /// Set the horizontal anchor ratio, in `[0, 1]`
    pub fn set_horizontal_anchor_ratio(&mut self, value: f64) -> Result<()> {
        self.write_validated("horizontal_anchor_ratio", |props| {
            props.set_horizontal_anchor_ratio(value)
        })
    }

    pub fn vertical_anchor_ratio(&self) -> f64 {
        self.properties.vertical_anchor_ratio
    }

    /// Set the vertical anchor ratio, in `[0, 1]`
    pub fn set_vertical_anchor_ratio(&mut self, value: f64) -> Result<()> {
        self.write_validated("vertical_anchor_ratio", |props| {
            props.set_vertical_anchor_ratio(value)
        })
    }

    /// Snapshot of every mirrored property
    pub fn properties(&self) -> &ScrollProperties {
        &self.properties
    }

    fn write_validated(
        &mut self,
        property: &'static str,
        write: impl FnOnce(&mut ScrollProperties) -> Result<()>,
    ) -> Result<()> {
        if let Err(err) = write(&mut self.properties) {
            tracing::warn!(target: "glide::scroll_view", property, %err, "rejected value");
            return Err(err);
        }
        self.mirror_properties();
        Ok(())
    }

    fn mirror_properties(&mut self) {
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.apply_properties(self.properties);
        }
        self.sync_controllers();
    }

    // =========================================================================
    // View-only configuration
    // =========================================================================

    pub fn horizontal_scroll_bar_visibility(&self) -> ScrollBarVisibility {
        self.horizontal_scroll_bar_visibility
    }

    pub fn set_horizontal_scroll_bar_visibility(&mut self, visibility: ScrollBarVisibility) {
        self.horizontal_scroll_bar_visibility = visibility;
        self.sync_controllers();
    }

    pub fn vertical_scroll_bar_visibility(&self) -> ScrollBarVisibility {
        self.vertical_scroll_bar_visibility
    }

    pub fn set_vertical_scroll_bar_visibility(&mut self, visibility: ScrollBarVisibility) {
        self.vertical_scroll_bar_visibility = visibility;
        self.sync_controllers();
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    /// Enable or disable the control.
    ///
    /// Both scroll controllers are refreshed before the enablement pass runs.
    pub fn set_is_enabled(&mut self, is_enabled: bool) {
        if self.is_enabled == is_enabled {
            return;
        }

        self.is_enabled = is_enabled;
        let horizontal = self.compute_controller(Axis::Horizontal);
        let vertical = self.compute_controller(Axis::Vertical);
        self.states.set_enabled(is_enabled, horizontal, vertical);
    }

    pub fn is_auto_hiding_scroll_controllers(&self) -> bool {
        self.states.is_auto_hiding()
    }

    pub fn set_auto_hide_scroll_controllers(&mut self, auto_hide: bool) {
        self.states.set_auto_hide(auto_hide);
    }

    // =========================================================================
    // Content & layout
    // =========================================================================

    pub fn content(&self) -> Option<ElementId> {
        self.content
    }

    pub fn set_content(&mut self, content: Option<ElementId>) {
        self.content = content;
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.set_content(content);
        }
    }

    /// The view was resized. Runs a layout pass once the template is applied.
    pub fn on_size_changed(&mut self, tree: &ElementTree, size: Size) {
        self.viewport = size;
        if let Some(presenter) = self.presenter.as_mut() {
            presenter.set_viewport(size);
            self.arrange(tree);
        }
    }

    /// Run a synchronous layout pass.
    ///
    /// Updates the geometry from the content bounds, refreshes both scroll
    /// controllers and raises `AnchorRequested` when an axis is anchoring to
    /// an element.
    ///
    /// Not every pass raises `AnchorRequested`. When both axes rest on the
    /// edge their anchor ratio pins them to (ratio `0.0` at offset 0, or
    /// ratio `1.0` at the end of the scrollable range), the content edge is
    /// the anchor and no event is raised. Set a ratio strictly between 0 and
    /// 1 to get an event on every pass.
    pub fn invalidate_arrange(&mut self, tree: &ElementTree) -> Result<()> {
        if self.presenter.is_none() {
            return Err(ScrollError::TemplateNotApplied);
        }
        self.arrange(tree);
        Ok(())
    }

    fn arrange(&mut self, tree: &ElementTree) {
        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };

        let request = presenter.invalidate_arrange(tree);
        self.sync_controllers();

        if let Some(args) = request {
            tracing::debug!(
                target: "glide::scroll_view",
                candidates = args.anchor_candidates.len(),
                anchor = ?args.anchor_element,
                "anchor requested"
            );
            self.anchor_requested.notify(&args);
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn extent_width(&self) -> f64 {
        self.presenter.as_ref().map_or(0.0, ScrollPresenter::extent_width)
    }

    pub fn extent_height(&self) -> f64 {
        self.presenter.as_ref().map_or(0.0, ScrollPresenter::extent_height)
    }

    pub fn viewport_width(&self) -> f64 {
        self.presenter.as_ref().map_or(0.0, ScrollPresenter::viewport_width)
    }

    pub fn viewport_height(&self) -> f64 {
        self.presenter.as_ref().map_or(0.0, ScrollPresenter::viewport_height)
    }

    pub fn scrollable_width(&self) -> f64 {
        self.presenter.as_ref().map_or(0.0, ScrollPresenter::scrollable_width)
    }

    pub fn scrollable_height(&self) -> f64 {
        self.presenter.as_ref().map_or(0.0, ScrollPresenter::scrollable_height)
    }

    pub fn horizontal_offset(&self) -> f64 {
        self.presenter.as_ref().map_or(0.0, ScrollPresenter::horizontal_offset)
    }

    pub fn vertical_offset(&self) -> f64 {
        self.presenter.as_ref().map_or(0.0, ScrollPresenter::vertical_offset)
    }

    pub fn zoom_factor(&self) -> f64 {
        self.presenter.as_ref().map_or(1.0, ScrollPresenter::zoom_factor)
    }

    pub fn computed_horizontal_scroll_mode(&self) -> ScrollMode {
        self.computed_scroll_mode(Axis::Horizontal)
    }

    pub fn computed_vertical_scroll_mode(&self) -> ScrollMode {
        self.computed_scroll_mode(Axis::Vertical)
    }

    fn computed_scroll_mode(&self, axis: Axis) -> ScrollMode {
        match &self.presenter {
            Some(presenter) => presenter.computed_scroll_mode(axis),
            None => match axis {
                Axis::Horizontal => self.properties.horizontal_scroll_mode.computed(0.0),
                Axis::Vertical => self.properties.vertical_scroll_mode.computed(0.0),
            },
        }
    }

    // =========================================================================
    // Scroll controllers & visual states
    // =========================================================================

    /// Horizontal scroll bar, created by the template
    pub fn horizontal_scroll_controller(&self) -> Option<ScrollControllerState> {
        self.presenter
            .as_ref()
            .map(|_| self.states.controller(Axis::Horizontal))
    }

    /// Vertical scroll bar, created by the template
    pub fn vertical_scroll_controller(&self) -> Option<ScrollControllerState> {
        self.presenter
            .as_ref()
            .map(|_| self.states.controller(Axis::Vertical))
    }

    pub fn indicator_state(&self) -> Option<IndicatorState> {
        self.states.indicator_state()
    }

    pub fn separator_state(&self) -> Option<SeparatorState> {
        self.states.separator_state()
    }

    pub fn are_indicators_shown(&self) -> bool {
        self.states.are_indicators_shown()
    }

    /// Pointer movement or contact over the view
    pub fn on_pointer_activity(&mut self, device: InputDeviceKind) {
        self.states.on_pointer_activity(device);
    }

    /// Advance time. Returns `true` when auto-hiding indicators were dismissed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.states.tick(dt)
    }

    fn compute_controller(&self, axis: Axis) -> ScrollControllerState {
        let Some(presenter) = &self.presenter else {
            return ScrollControllerState::default();
        };

        let can_scroll = self.is_enabled
            && presenter.computed_scroll_mode(axis) != ScrollMode::Disabled
            && presenter.geometry().scrollable(axis) > 0.0;
        let visibility = match axis {
            Axis::Horizontal => self.horizontal_scroll_bar_visibility,
            Axis::Vertical => self.vertical_scroll_bar_visibility,
        };
        let is_visible = match visibility {
            ScrollBarVisibility::Visible => true,
            ScrollBarVisibility::Collapsed => false,
            ScrollBarVisibility::Auto => can_scroll,
        };

        ScrollControllerState {
            is_visible,
            can_scroll,
        }
    }

    fn sync_controllers(&mut self) {
        if self.presenter.is_none() {
            return;
        }
        let horizontal = self.compute_controller(Axis::Horizontal);
        self.states.update_controller(Axis::Horizontal, horizontal);
        let vertical = self.compute_controller(Axis::Vertical);
        self.states.update_controller(Axis::Vertical, vertical);
    }

    // =========================================================================
    // Scrolling & zooming
    // =========================================================================

    /// Scroll by a delta coming from `kind`. Indicators are shown for the
    /// device that produced accepted input.
    pub fn scroll_by(
        &mut self,
        kind: InputKind,
        delta_x: f64,
        delta_y: f64,
    ) -> Result<ScrollInputOutcome> {
        let outcome = self.presenter_mut()?.scroll_by(kind, delta_x, delta_y);
        if !outcome.ignored {
            self.states.on_pointer_activity(kind.device());
        }
        Ok(outcome)
    }

    /// Scroll to an absolute offset, clamped to the scrollable range
    pub fn scroll_to(&mut self, x: f64, y: f64) -> Result<Point> {
        Ok(self.presenter_mut()?.scroll_to(x, y))
    }

    /// Zoom to `factor`. Returns `Ok(false)` when zooming is disabled.
    pub fn zoom_to(&mut self, factor: f64) -> Result<bool> {
        let zoomed = self.presenter_mut()?.zoom_to(factor)?;
        if zoomed {
            self.sync_controllers();
        }
        Ok(zoomed)
    }

    // =========================================================================
    // Anchoring
    // =========================================================================

    /// Register an element as a scroll anchor candidate
    pub fn register_anchor_candidate(
        &mut self,
        tree: &ElementTree,
        element: ElementId,
    ) -> Result<()> {
        self.presenter_mut()?
            .register_anchor_candidate(tree, element)
            .map(|_| ())
    }

    /// Remove an anchor candidate. Unknown elements are ignored.
    pub fn unregister_anchor_candidate(&mut self, element: ElementId) -> Result<()> {
        self.presenter_mut()?.unregister_anchor_candidate(element);
        Ok(())
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn on_anchor_requested<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&AnchorRequestedArgs) + Send + Sync + 'static,
    {
        self.anchor_requested.subscribe(handler)
    }

    /// Every `GoToState` request, repeated ones included
    pub fn on_visual_state_requested<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&VisualStateEvent) + Send + Sync + 'static,
    {
        self.states.on_state_requested(handler)
    }

    /// Actual visual state transitions
    pub fn on_visual_state_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&VisualStateEvent) + Send + Sync + 'static,
    {
        self.states.on_state_changed(handler)
    }

    /// Remove a subscription from any channel
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.anchor_requested.unsubscribe(id) || self.states.unsubscribe(id)
    }
}
