//! Scroll anchoring
//!
//! Keeps the visible content stable when layout changes move things around.
//! Candidates are registered by handle; the registry never keeps an element
//! alive and drops candidates whose element has been removed from the tree.
//!
//! An axis anchors to an element unless its anchor ratio pins it to an edge
//! the presenter is already resting on:
//! - ratio `0.0` with the offset at the start anchors to the near edge
//! - ratio `1.0` with the offset at the end anchors to the far edge
//!
//! When an element is anchored its ratio point is compared against the
//! viewport's ratio point; the closest live candidate wins, and ties go to
//! the candidate registered first.

use glide_core::{Result, ScrollError};
use indexmap::IndexSet;

use crate::geometry::{Axis, Point, ScrollGeometry};
use crate::tree::{ElementId, ElementTree};

/// Payload of the anchor-requested event
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorRequestedArgs {
    /// Live candidates at the time of the layout pass, in registration order
    pub anchor_candidates: Vec<ElementId>,
    /// Anchor picked for this pass, if the current offset requires one
    pub anchor_element: Option<ElementId>,
}

/// Scroll state the registry anchors against
#[derive(Debug, Clone, Copy)]
pub struct AnchorContext {
    pub offset: Point,
    pub geometry: ScrollGeometry,
    pub horizontal_ratio: f64,
    pub vertical_ratio: f64,
}

impl AnchorContext {
    fn ratio(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal_ratio,
            Axis::Vertical => self.vertical_ratio,
        }
    }

    fn offset_on(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.offset.x,
            Axis::Vertical => self.offset.y,
        }
    }

    /// Check if `axis` anchors to an element rather than an edge
    pub fn is_anchoring_element(&self, axis: Axis) -> bool {
        let ratio = self.ratio(axis);
        let offset = self.offset_on(axis);
        let near_edge = ratio == 0.0 && offset <= 0.0;
        let far_edge = ratio == 1.0 && offset >= self.geometry.scrollable(axis);
        !(near_edge || far_edge)
    }

    /// Check if the current offset calls for an anchor element
    pub fn needs_anchor_element(&self) -> bool {
        [Axis::Horizontal, Axis::Vertical]
            .into_iter()
            .any(|axis| self.is_anchoring_element(axis) && self.offset_on(axis) > 0.0)
    }

    /// Anchor point of the viewport, in zoomed content coordinates
    pub fn viewport_anchor_point(&self) -> Point {
        Point::new(
            self.offset.x + self.horizontal_ratio * self.geometry.viewport.width,
            self.offset.y + self.vertical_ratio * self.geometry.viewport.height,
        )
    }

    fn clamp_offset(&self, offset: Point) -> Point {
        Point::new(
            offset.x.clamp(0.0, self.geometry.scrollable_width()),
            offset.y.clamp(0.0, self.geometry.scrollable_height()),
        )
    }
}

/// Result of anchoring during one layout pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorOutcome {
    /// Offset change that keeps the previous anchor in place
    pub shift: Point,
    /// Event to raise, when either axis anchors to an element
    pub request: Option<AnchorRequestedArgs>,
}

/// Ordered set of anchor candidates plus the currently tracked anchor
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    candidates: IndexSet<ElementId>,
    /// Anchor chosen by the last pass and its ratio point at that time
    anchor: Option<(ElementId, Point)>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a candidate.
    ///
    /// Returns `Ok(false)` when it was already registered and
    /// [`ScrollError::ElementReleased`] when the element is gone.
    pub fn register(&mut self, tree: &ElementTree, element: ElementId) -> Result<bool> {
        if !tree.contains(element) {
            return Err(ScrollError::ElementReleased);
        }
        Ok(self.candidates.insert(element))
    }

    /// Unregister a candidate. Unknown or released elements are ignored.
    pub fn unregister(&mut self, element: ElementId) -> bool {
        if matches!(self.anchor, Some((id, _)) if id == element) {
            self.anchor = None;
        }
        self.candidates.shift_remove(&element)
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.candidates.contains(&element)
    }

    /// Registered candidates in registration order (including released ones
    /// not yet pruned by a layout pass)
    pub fn candidates(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.candidates.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Anchor tracked since the last layout pass
    pub fn current_anchor(&self) -> Option<ElementId> {
        self.anchor.map(|(id, _)| id)
    }

    /// Drop candidates whose element no longer exists
    pub fn prune(&mut self, tree: &ElementTree) -> usize {
        let before = self.candidates.len();
        self.candidates.retain(|id| tree.contains(*id));
        if let Some((id, _)) = self.anchor {
            if !self.candidates.contains(&id) {
                self.anchor = None;
            }
        }
        before - self.candidates.len()
    }

    /// Pick the live candidate closest to the viewport anchor point
    pub fn select(&self, tree: &ElementTree, ctx: &AnchorContext) -> Option<ElementId> {
        let target = ctx.viewport_anchor_point();
        let mut best: Option<(ElementId, f64)> = None;

        for id in self.candidates() {
            let Some(point) = candidate_point(tree, id, ctx) else {
                continue;
            };
            let distance = point.distance_squared(target);
            // Strict comparison keeps the earliest registration on ties
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((id, distance));
            }
        }

        best.map(|(id, _)| id)
    }

    /// Run anchoring for a layout pass
    pub fn arrange(&mut self, tree: &ElementTree, ctx: &AnchorContext) -> AnchorOutcome {
        let horizontal = ctx.is_anchoring_element(Axis::Horizontal);
        let vertical = ctx.is_anchoring_element(Axis::Vertical);
        if !horizontal && !vertical {
            self.anchor = None;
            return AnchorOutcome::default();
        }

        let pruned = self.prune(tree);
        if pruned > 0 {
            tracing::debug!(pruned, "dropped released anchor candidates");
        }

        // Move the offset by however far the previous anchor moved
        let mut adjusted = *ctx;
        if let Some((id, previous)) = self.anchor {
            if let Some(current) = candidate_point(tree, id, ctx) {
                let mut offset = ctx.offset;
                if horizontal {
                    offset.x += current.x - previous.x;
                }
                if vertical {
                    offset.y += current.y - previous.y;
                }
                adjusted.offset = ctx.clamp_offset(offset);
            }
        }

        let anchor_element = if adjusted.needs_anchor_element() {
            self.select(tree, &adjusted)
        } else {
            None
        };
        self.anchor = anchor_element
            .and_then(|id| candidate_point(tree, id, &adjusted).map(|point| (id, point)));

        AnchorOutcome {
            shift: Point::new(
                adjusted.offset.x - ctx.offset.x,
                adjusted.offset.y - ctx.offset.y,
            ),
            request: Some(AnchorRequestedArgs {
                anchor_candidates: self.candidates().collect(),
                anchor_element,
            }),
        }
    }
}

/// Ratio point of a candidate in zoomed content coordinates
fn candidate_point(tree: &ElementTree, id: ElementId, ctx: &AnchorContext) -> Option<Point> {
    let rect = tree.bounds(id)?;
    let point = rect.point_at_ratio(ctx.horizontal_ratio, ctx.vertical_ratio);
    let zoom = ctx.geometry.zoom_factor;
    Some(Point::new(point.x * zoom, point.y * zoom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Size};

    fn context(offset: Point, horizontal_ratio: f64, vertical_ratio: f64) -> AnchorContext {
        AnchorContext {
            offset,
            geometry: ScrollGeometry {
                extent: Size::new(1200.0, 600.0),
                viewport: Size::new(300.0, 200.0),
                zoom_factor: 1.0,
            },
            horizontal_ratio,
            vertical_ratio,
        }
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut tree = ElementTree::new();
        let element = tree.create_element(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut registry = AnchorRegistry::new();

        assert_eq!(registry.register(&tree, element), Ok(true));
        assert_eq!(registry.register(&tree, element), Ok(false));
        assert_eq!(registry.len(), 1);

        assert!(registry.unregister(element));
        assert!(!registry.unregister(element));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_released_element_fails() {
        let mut tree = ElementTree::new();
        let element = tree.create_element(Rect::default());
        tree.remove_element(element);

        let mut registry = AnchorRegistry::new();
        assert_eq!(
            registry.register(&tree, element),
            Err(ScrollError::ElementReleased)
        );
        // Unregistering a released element is a no-op
        assert!(!registry.unregister(element));
    }

    #[test]
    fn test_edge_anchoring() {
        let at_start = context(Point::ZERO, 0.0, 0.0);
        assert!(!at_start.is_anchoring_element(Axis::Horizontal));
        assert!(!at_start.is_anchoring_element(Axis::Vertical));

        let scrolled = context(Point::new(10.0, 0.0), 0.0, 0.0);
        assert!(scrolled.is_anchoring_element(Axis::Horizontal));

        let at_end = context(Point::new(900.0, 400.0), 1.0, 1.0);
        assert!(!at_end.is_anchoring_element(Axis::Horizontal));
        assert!(!at_end.is_anchoring_element(Axis::Vertical));

        let middle_ratio = context(Point::ZERO, 0.1, 0.0);
        assert!(middle_ratio.is_anchoring_element(Axis::Horizontal));
        assert!(!middle_ratio.needs_anchor_element());
    }

    #[test]
    fn test_request_at_origin_has_no_anchor_element() {
        let mut tree = ElementTree::new();
        let element = tree.create_element(Rect::new(0.0, 0.0, 1200.0, 600.0));
        let mut registry = AnchorRegistry::new();
        registry.register(&tree, element).unwrap();

        let outcome = registry.arrange(&tree, &context(Point::ZERO, 0.1, 0.0));
        assert_eq!(
            outcome.request,
            Some(AnchorRequestedArgs {
                anchor_candidates: vec![element],
                anchor_element: None,
            })
        );
        assert_eq!(outcome.shift, Point::ZERO);
    }

    #[test]
    fn test_no_request_when_resting_on_edges() {
        let mut tree = ElementTree::new();
        let element = tree.create_element(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut registry = AnchorRegistry::new();
        registry.register(&tree, element).unwrap();

        let outcome = registry.arrange(&tree, &context(Point::ZERO, 0.0, 0.0));
        assert!(outcome.request.is_none());
    }

    #[test]
    fn test_select_closest_candidate() {
        let mut tree = ElementTree::new();
        let far = tree.create_element(Rect::new(0.0, 500.0, 300.0, 50.0));
        let near = tree.create_element(Rect::new(0.0, 100.0, 300.0, 50.0));
        let mut registry = AnchorRegistry::new();
        registry.register(&tree, far).unwrap();
        registry.register(&tree, near).unwrap();

        // Viewport anchor point is (0, 120) with the top edge anchored
        let ctx = context(Point::new(0.0, 120.0), 0.0, 0.0);
        assert_eq!(registry.select(&tree, &ctx), Some(near));
    }

    #[test]
    fn test_ties_go_to_earliest_registration() {
        let mut tree = ElementTree::new();
        let first = tree.create_element(Rect::new(0.0, 100.0, 10.0, 10.0));
        let second = tree.create_element(Rect::new(0.0, 100.0, 10.0, 10.0));
        let mut registry = AnchorRegistry::new();
        registry.register(&tree, first).unwrap();
        registry.register(&tree, second).unwrap();

        let ctx = context(Point::new(0.0, 50.0), 0.0, 0.0);
        assert_eq!(registry.select(&tree, &ctx), Some(first));
    }

    #[test]
    fn test_released_candidates_are_excluded() {
        let mut tree = ElementTree::new();
        let kept = tree.create_element(Rect::new(0.0, 400.0, 10.0, 10.0));
        let released = tree.create_element(Rect::new(0.0, 100.0, 10.0, 10.0));
        let mut registry = AnchorRegistry::new();
        registry.register(&tree, kept).unwrap();
        registry.register(&tree, released).unwrap();
        tree.remove_element(released);

        let outcome = registry.arrange(&tree, &context(Point::new(0.0, 100.0), 0.0, 0.0));
        let request = outcome.request.unwrap();
        assert_eq!(request.anchor_candidates, vec![kept]);
        assert_eq!(request.anchor_element, Some(kept));
        assert!(!registry.contains(released));
    }

    #[test]
    fn test_anchor_compensates_layout_shift() {
        let mut tree = ElementTree::new();
        let item = tree.create_element(Rect::new(0.0, 300.0, 300.0, 50.0));
        let mut registry = AnchorRegistry::new();
        registry.register(&tree, item).unwrap();

        let ctx = context(Point::new(0.0, 250.0), 0.0, 0.0);
        let first = registry.arrange(&tree, &ctx);
        assert_eq!(first.shift, Point::ZERO);
        assert_eq!(registry.current_anchor(), Some(item));

        // Content inserted above pushes the item down by 40px
        tree.set_bounds(item, Rect::new(0.0, 340.0, 300.0, 50.0));
        let second = registry.arrange(&tree, &ctx);
        assert_eq!(second.shift, Point::new(0.0, 40.0));
        assert_eq!(registry.current_anchor(), Some(item));
    }

    #[test]
    fn test_unregistering_anchor_clears_it() {
        let mut tree = ElementTree::new();
        let item = tree.create_element(Rect::new(0.0, 300.0, 300.0, 50.0));
        let mut registry = AnchorRegistry::new();
        registry.register(&tree, item).unwrap();
        registry.arrange(&tree, &context(Point::new(0.0, 250.0), 0.0, 0.0));

        registry.unregister(item);
        assert_eq!(registry.current_anchor(), None);
    }
}
