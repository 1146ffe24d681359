//! Geometry primitives and scroll extents

/// Width and height in device-independent pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A point in content coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance to `other`
    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned rectangle in content coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Point at the given fractions of the rectangle's width and height
    pub fn point_at_ratio(&self, horizontal: f64, vertical: f64) -> Point {
        Point::new(
            self.x + horizontal * self.width,
            self.y + vertical * self.height,
        )
    }
}

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Extent and viewport of a scroll presenter.
///
/// Scrollable sizes are derived and never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    /// Unzoomed size of the content
    pub extent: Size,
    /// Size of the visible area
    pub viewport: Size,
    /// Current zoom factor applied to the extent
    pub zoom_factor: f64,
}

impl Default for ScrollGeometry {
    fn default() -> Self {
        Self {
            extent: Size::ZERO,
            viewport: Size::ZERO,
            zoom_factor: 1.0,
        }
    }
}

impl ScrollGeometry {
    pub fn scrollable_width(&self) -> f64 {
        (self.extent.width * self.zoom_factor - self.viewport.width).max(0.0)
    }

    pub fn scrollable_height(&self) -> f64 {
        (self.extent.height * self.zoom_factor - self.viewport.height).max(0.0)
    }

    pub fn scrollable(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.scrollable_width(),
            Axis::Vertical => self.scrollable_height(),
        }
    }

    pub fn viewport_length(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.viewport.width,
            Axis::Vertical => self.viewport.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_is_empty() {
        let geometry = ScrollGeometry::default();
        assert_eq!(geometry.extent, Size::ZERO);
        assert_eq!(geometry.viewport, Size::ZERO);
        assert_eq!(geometry.scrollable_width(), 0.0);
        assert_eq!(geometry.scrollable_height(), 0.0);
    }

    #[test]
    fn test_scrollable_size() {
        let geometry = ScrollGeometry {
            extent: Size::new(1200.0, 600.0),
            viewport: Size::new(300.0, 200.0),
            zoom_factor: 1.0,
        };
        assert_eq!(geometry.scrollable_width(), 900.0);
        assert_eq!(geometry.scrollable(Axis::Vertical), 400.0);
    }

    #[test]
    fn test_scrollable_size_clamps_at_zero() {
        let geometry = ScrollGeometry {
            extent: Size::new(100.0, 50.0),
            viewport: Size::new(300.0, 200.0),
            zoom_factor: 1.0,
        };
        assert_eq!(geometry.scrollable_width(), 0.0);
        assert_eq!(geometry.scrollable_height(), 0.0);
    }

    #[test]
    fn test_zoom_scales_extent() {
        let geometry = ScrollGeometry {
            extent: Size::new(300.0, 200.0),
            viewport: Size::new(300.0, 200.0),
            zoom_factor: 2.0,
        };
        assert_eq!(geometry.scrollable_width(), 300.0);
        assert_eq!(geometry.scrollable_height(), 200.0);
    }

    #[test]
    fn test_point_at_ratio() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.point_at_ratio(0.5, 0.25), Point::new(60.0, 30.0));
        assert_eq!(rect.size(), Size::new(100.0, 40.0));
    }
}
