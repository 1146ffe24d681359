//! Element tree management
//!
//! Elements live in an arena owned by the application. Controls refer to them
//! through [`ElementId`] handles and probe liveness before use, so holding a
//! handle never keeps an element alive.

use slotmap::{new_key_type, SlotMap};

use crate::geometry::Rect;

new_key_type! {
    pub struct ElementId;
}

/// Arena of laid-out elements
pub struct ElementTree {
    elements: SlotMap<ElementId, Rect>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self {
            elements: SlotMap::with_key(),
        }
    }

    /// Create an element with the given bounds (content coordinates)
    pub fn create_element(&mut self, bounds: Rect) -> ElementId {
        self.elements.insert(bounds)
    }

    /// Move or resize an element. Returns `false` if it no longer exists.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) -> bool {
        match self.elements.get_mut(id) {
            Some(rect) => {
                *rect = bounds;
                true
            }
            None => false,
        }
    }

    /// Get the bounds of a live element
    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(id).copied()
    }

    /// Check if the element is still alive
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Remove an element
    pub fn remove_element(&mut self, id: ElementId) -> Option<Rect> {
        self.elements.remove(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}
