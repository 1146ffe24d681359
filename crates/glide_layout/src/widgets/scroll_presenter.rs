//! Scroll presenter
//!
//! The presenter is the template part of a scroll view that actually owns the
//! scroll offset, zoom factor, extent and viewport. It applies input with the
//! configured scroll modes, railing and chaining, and runs anchoring on every
//! layout pass.
//!
//! # Example
//!
//! ```rust
//! use glide_core::InputKind;
//! use glide_layout::geometry::{Rect, Size};
//! use glide_layout::tree::ElementTree;
//! use glide_layout::widgets::ScrollPresenter;
//!
//! let mut tree = ElementTree::new();
//! let content = tree.create_element(Rect::new(0.0, 0.0, 1200.0, 600.0));
//!
//! let mut presenter = ScrollPresenter::new();
//! presenter.set_content(Some(content));
//! presenter.set_viewport(Size::new(300.0, 200.0));
//! presenter.invalidate_arrange(&tree);
//!
//! assert_eq!(presenter.scrollable_height(), 400.0);
//! let outcome = presenter.scroll_by(InputKind::MouseWheel, 0.0, 120.0);
//! assert_eq!(outcome.consumed.y, 120.0);
//! ```

use glide_core::{InputKind, Result};

use crate::anchor::{AnchorContext, AnchorRegistry, AnchorRequestedArgs};
use crate::geometry::{Axis, Point, ScrollGeometry, Size};
use crate::properties::{
    validate_zoom_factor, ChainingMode, RailingMode, ScrollMode, ScrollProperties, ZoomMode,
};
use crate::tree::{ElementId, ElementTree};

/// Default dominance ratio for touch railing
pub const DEFAULT_RAILING_RATIO: f64 = 2.0;

/// How a scroll input was applied
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollInputOutcome {
    /// The input kind is ignored by this presenter
    pub ignored: bool,
    /// Delta applied to the offset
    pub consumed: Point,
    /// Delta handed to a scrollable ancestor
    pub chained: Point,
}

/// Template part holding scroll offset, zoom and extents
pub struct ScrollPresenter {
    properties: ScrollProperties,
    content: Option<ElementId>,
    geometry: ScrollGeometry,
    offset: Point,
    anchors: AnchorRegistry,
    /// Touch input rails to one axis when it exceeds the other by this ratio
    railing_ratio: f64,
}

impl Default for ScrollPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollPresenter {
    pub fn new() -> Self {
        Self {
            properties: ScrollProperties::default(),
            content: None,
            geometry: ScrollGeometry::default(),
            offset: Point::ZERO,
            anchors: AnchorRegistry::new(),
            railing_ratio: DEFAULT_RAILING_RATIO,
        }
    }

    /// Set the railing dominance ratio (clamped to at least 1.0)
    pub fn railing_ratio(mut self, ratio: f64) -> Self {
        self.railing_ratio = ratio.max(1.0);
        self
    }

    pub fn properties(&self) -> &ScrollProperties {
        &self.properties
    }

    /// Replace the whole property set (used by the owning scroll view)
    pub(crate) fn apply_properties(&mut self, properties: ScrollProperties) {
        self.properties = properties;
        self.geometry.zoom_factor = properties.clamp_zoom_factor(self.geometry.zoom_factor);
        self.offset = self.clamp_offset(self.offset);
    }

    pub fn content(&self) -> Option<ElementId> {
        self.content
    }

    pub fn set_content(&mut self, content: Option<ElementId>) {
        self.content = content;
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn geometry(&self) -> &ScrollGeometry {
        &self.geometry
    }

    pub fn extent_width(&self) -> f64 {
        self.geometry.extent.width
    }

    pub fn extent_height(&self) -> f64 {
        self.geometry.extent.height
    }

    pub fn viewport_width(&self) -> f64 {
        self.geometry.viewport.width
    }

    pub fn viewport_height(&self) -> f64 {
        self.geometry.viewport.height
    }

    pub fn scrollable_width(&self) -> f64 {
        self.geometry.scrollable_width()
    }

    pub fn scrollable_height(&self) -> f64 {
        self.geometry.scrollable_height()
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.geometry.viewport = viewport;
        self.offset = self.clamp_offset(self.offset);
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn horizontal_offset(&self) -> f64 {
        self.offset.x
    }

    pub fn vertical_offset(&self) -> f64 {
        self.offset.y
    }

    pub fn zoom_factor(&self) -> f64 {
        self.geometry.zoom_factor
    }

    /// Scroll mode with `Auto` resolved against the current extents
    pub fn computed_scroll_mode(&self, axis: Axis) -> ScrollMode {
        let mode = match axis {
            Axis::Horizontal => self.properties.horizontal_scroll_mode,
            Axis::Vertical => self.properties.vertical_scroll_mode,
        };
        mode.computed(self.geometry.scrollable(axis))
    }

    fn clamp_offset(&self, offset: Point) -> Point {
        Point::new(
            offset.x.clamp(0.0, self.geometry.scrollable_width()),
            offset.y.clamp(0.0, self.geometry.scrollable_height()),
        )
    }

    // =========================================================================
    // Scrolling and zooming
    // =========================================================================

    /// Jump to an offset, clamped to the scrollable range.
    ///
    /// A non-finite coordinate leaves that axis where it is.
    pub fn scroll_to(&mut self, x: f64, y: f64) -> Point {
        let x = if x.is_finite() { x } else { self.offset.x };
        let y = if y.is_finite() { y } else { self.offset.y };
        self.offset = self.clamp_offset(Point::new(x, y));
        self.offset
    }

    /// Apply a scroll delta produced by `kind` input
    pub fn scroll_by(&mut self, kind: InputKind, delta_x: f64, delta_y: f64) -> ScrollInputOutcome {
        if self.properties.ignored_input_kinds.contains(kind) {
            return ScrollInputOutcome {
                ignored: true,
                consumed: Point::ZERO,
                chained: Point::new(delta_x, delta_y),
            };
        }

        let (delta_x, delta_y) = if kind == InputKind::Touch {
            self.rail(delta_x, delta_y)
        } else {
            (delta_x, delta_y)
        };

        let (consumed_x, chained_x) = self.scroll_axis(Axis::Horizontal, delta_x);
        let (consumed_y, chained_y) = self.scroll_axis(Axis::Vertical, delta_y);

        ScrollInputOutcome {
            ignored: false,
            consumed: Point::new(consumed_x, consumed_y),
            chained: Point::new(chained_x, chained_y),
        }
    }

    /// Drop the minor axis of a touch pan when railing applies
    fn rail(&self, delta_x: f64, delta_y: f64) -> (f64, f64) {
        let horizontal = self.properties.horizontal_scroll_railing_mode == RailingMode::Enabled;
        let vertical = self.properties.vertical_scroll_railing_mode == RailingMode::Enabled;

        if horizontal && delta_x.abs() > self.railing_ratio * delta_y.abs() {
            (delta_x, 0.0)
        } else if vertical && delta_y.abs() > self.railing_ratio * delta_x.abs() {
            (0.0, delta_y)
        } else {
            (delta_x, delta_y)
        }
    }

    /// Returns (consumed, chained) for one axis
    fn scroll_axis(&mut self, axis: Axis, delta: f64) -> (f64, f64) {
        if !delta.is_finite() {
            return (0.0, 0.0);
        }

        let (current, chaining) = match axis {
            Axis::Horizontal => (
                self.offset.x,
                self.properties.horizontal_scroll_chaining_mode,
            ),
            Axis::Vertical => (self.offset.y, self.properties.vertical_scroll_chaining_mode),
        };

        let consumed = if self.computed_scroll_mode(axis) == ScrollMode::Disabled {
            0.0
        } else {
            (current + delta).clamp(0.0, self.geometry.scrollable(axis)) - current
        };
        let leftover = delta - consumed;

        let chained = match chaining {
            ChainingMode::Never => 0.0,
            ChainingMode::Always => leftover,
            ChainingMode::Auto if consumed == 0.0 => leftover,
            ChainingMode::Auto => 0.0,
        };

        match axis {
            Axis::Horizontal => self.offset.x += consumed,
            Axis::Vertical => self.offset.y += consumed,
        }
        (consumed, chained)
    }

    /// Zoom to `factor`, clamped to the configured range.
    ///
    /// Returns `Ok(false)` when zooming is disabled.
    pub fn zoom_to(&mut self, factor: f64) -> Result<bool> {
        validate_zoom_factor(factor)?;
        if self.properties.zoom_mode == ZoomMode::Disabled {
            return Ok(false);
        }

        self.geometry.zoom_factor = self.properties.clamp_zoom_factor(factor);
        self.offset = self.clamp_offset(self.offset);
        Ok(true)
    }

    // =========================================================================
    // Anchoring and layout
    // =========================================================================

    pub fn register_anchor_candidate(
        &mut self,
        tree: &ElementTree,
        element: ElementId,
    ) -> Result<bool> {
        self.anchors.register(tree, element)
    }

    pub fn unregister_anchor_candidate(&mut self, element: ElementId) -> bool {
        self.anchors.unregister(element)
    }

    pub fn anchor_candidates(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.anchors.candidates()
    }

    /// Anchor element tracked since the last layout pass
    pub fn current_anchor(&self) -> Option<ElementId> {
        self.anchors.current_anchor()
    }

    /// Run a layout pass.
    ///
    /// Re-reads the content extent from the tree, keeps the offset in range,
    /// and returns the anchor request to raise when anchoring applies.
    pub fn invalidate_arrange(&mut self, tree: &ElementTree) -> Option<AnchorRequestedArgs> {
        self.geometry.extent = self
            .content
            .and_then(|content| tree.bounds(content))
            .map(|bounds| bounds.size())
            .unwrap_or(Size::ZERO);
        self.offset = self.clamp_offset(self.offset);

        let ctx = AnchorContext {
            offset: self.offset,
            geometry: self.geometry,
            horizontal_ratio: self.properties.horizontal_anchor_ratio,
            vertical_ratio: self.properties.vertical_anchor_ratio,
        };
        let outcome = self.anchors.arrange(tree, &ctx);
        self.offset = self.clamp_offset(Point::new(
            self.offset.x + outcome.shift.x,
            self.offset.y + outcome.shift.y,
        ));

        tracing::debug!(
            extent_width = self.geometry.extent.width,
            extent_height = self.geometry.extent.height,
            offset_x = self.offset.x,
            offset_y = self.offset.y,
            anchor_requested = outcome.request.is_some(),
            "ScrollPresenter arrange"
        );
        outcome.request
    }
}
