//! Scroll configuration shared by the scroll view and its presenter part

use glide_core::{InputKinds, Result, ScrollError};

/// Whether unconsumed scroll input is forwarded to a scrollable ancestor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainingMode {
    /// Chain once the presenter cannot move further in the input direction
    #[default]
    Auto,
    /// Chain any leftover input, even after a partial scroll
    Always,
    /// Never chain
    Never,
}

/// Whether touch panning is locked to the dominant axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RailingMode {
    #[default]
    Enabled,
    Disabled,
}

/// Whether an axis can be scrolled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    #[default]
    Enabled,
    Disabled,
    /// Enabled only while the content is larger than the viewport
    Auto,
}

impl ScrollMode {
    /// Resolve `Auto` against the scrollable size of the axis
    pub fn computed(self, scrollable: f64) -> ScrollMode {
        match self {
            ScrollMode::Auto if scrollable > 0.0 => ScrollMode::Enabled,
            ScrollMode::Auto => ScrollMode::Disabled,
            mode => mode,
        }
    }
}

/// Whether the content can be zoomed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomMode {
    Enabled,
    #[default]
    Disabled,
}

/// Which directions the content is laid out to grow in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentOrientation {
    #[default]
    Vertical,
    Horizontal,
    None,
    Both,
}

/// Scroll bar visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBarVisibility {
    /// Shown while the axis can be scrolled
    #[default]
    Auto,
    /// Always shown
    Visible,
    /// Never shown (content is still scrollable)
    Collapsed,
}

pub const DEFAULT_MIN_ZOOM_FACTOR: f64 = 0.1;
pub const DEFAULT_MAX_ZOOM_FACTOR: f64 = 10.0;
pub const DEFAULT_ANCHOR_RATIO: f64 = 0.0;

/// Properties the scroll view clones onto its presenter part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollProperties {
    pub ignored_input_kinds: InputKinds,
    pub content_orientation: ContentOrientation,
    pub horizontal_scroll_chaining_mode: ChainingMode,
    pub vertical_scroll_chaining_mode: ChainingMode,
    pub horizontal_scroll_railing_mode: RailingMode,
    pub vertical_scroll_railing_mode: RailingMode,
    pub horizontal_scroll_mode: ScrollMode,
    pub vertical_scroll_mode: ScrollMode,
    pub zoom_mode: ZoomMode,
    pub zoom_chaining_mode: ChainingMode,
    pub min_zoom_factor: f64,
    pub max_zoom_factor: f64,
    pub horizontal_anchor_ratio: f64,
    pub vertical_anchor_ratio: f64,
}

impl Default for ScrollProperties {
    fn default() -> Self {
        Self {
            ignored_input_kinds: InputKinds::NONE,
            content_orientation: ContentOrientation::Vertical,
            horizontal_scroll_chaining_mode: ChainingMode::Auto,
            vertical_scroll_chaining_mode: ChainingMode::Auto,
            horizontal_scroll_railing_mode: RailingMode::Enabled,
            vertical_scroll_railing_mode: RailingMode::Enabled,
            horizontal_scroll_mode: ScrollMode::Enabled,
            vertical_scroll_mode: ScrollMode::Enabled,
            zoom_mode: ZoomMode::Disabled,
            zoom_chaining_mode: ChainingMode::Auto,
            min_zoom_factor: DEFAULT_MIN_ZOOM_FACTOR,
            max_zoom_factor: DEFAULT_MAX_ZOOM_FACTOR,
            horizontal_anchor_ratio: DEFAULT_ANCHOR_RATIO,
            vertical_anchor_ratio: DEFAULT_ANCHOR_RATIO,
        }
    }
}

impl ScrollProperties {
    /// Set the minimum zoom factor, keeping `min <= max`
    pub fn set_min_zoom_factor(&mut self, value: f64) -> Result<()> {
        validate_zoom_factor(value)?;
        if value > self.max_zoom_factor {
            return Err(ScrollError::InvalidZoomFactors {
                min: value,
                max: self.max_zoom_factor,
            });
        }
        self.min_zoom_factor = value;
        Ok(())
    }

    /// Set the maximum zoom factor, keeping `min <= max`
    pub fn set_max_zoom_factor(&mut self, value: f64) -> Result<()> {
        validate_zoom_factor(value)?;
        if value < self.min_zoom_factor {
            return Err(ScrollError::InvalidZoomFactors {
                min: self.min_zoom_factor,
                max: value,
            });
        }
        self.max_zoom_factor = value;
        Ok(())
    }

    pub fn set_horizontal_anchor_ratio(&mut self, value: f64) -> Result<()> {
        self.horizontal_anchor_ratio = validate_anchor_ratio(value)?;
        Ok(())
    }

    pub fn set_vertical_anchor_ratio(&mut self, value: f64) -> Result<()> {
        self.vertical_anchor_ratio = validate_anchor_ratio(value)?;
        Ok(())
    }

    /// Clamp a zoom factor into `[min, max]`
    pub fn clamp_zoom_factor(&self, factor: f64) -> f64 {
        factor.clamp(self.min_zoom_factor, self.max_zoom_factor)
    }
}

pub(crate) fn validate_zoom_factor(value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScrollError::InvalidZoomFactor(value))
    }
}

fn validate_anchor_ratio(value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ScrollError::InvalidAnchorRatio(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let props = ScrollProperties::default();
        assert_eq!(props.ignored_input_kinds, InputKinds::NONE);
        assert_eq!(props.content_orientation, ContentOrientation::Vertical);
        assert_eq!(props.horizontal_scroll_chaining_mode, ChainingMode::Auto);
        assert_eq!(props.vertical_scroll_railing_mode, RailingMode::Enabled);
        assert_eq!(props.horizontal_scroll_mode, ScrollMode::Enabled);
        assert_eq!(props.zoom_mode, ZoomMode::Disabled);
        assert!((props.min_zoom_factor - 0.1).abs() < 1e-7);
        assert!((props.max_zoom_factor - 10.0).abs() < 1e-7);
        assert_eq!(props.horizontal_anchor_ratio, 0.0);
        assert_eq!(props.vertical_anchor_ratio, 0.0);
    }

    #[test]
    fn test_zoom_factor_ordering_is_enforced() {
        let mut props = ScrollProperties::default();

        assert_eq!(
            props.set_min_zoom_factor(20.0),
            Err(ScrollError::InvalidZoomFactors {
                min: 20.0,
                max: 10.0
            })
        );
        assert_eq!(props.min_zoom_factor, DEFAULT_MIN_ZOOM_FACTOR);

        props.set_max_zoom_factor(8.0).unwrap();
        props.set_min_zoom_factor(2.0).unwrap();
        assert!(props.set_max_zoom_factor(1.0).is_err());
        assert_eq!(props.max_zoom_factor, 8.0);
    }

    #[test]
    fn test_invalid_zoom_factor_values() {
        let mut props = ScrollProperties::default();
        assert_eq!(
            props.set_min_zoom_factor(f64::NAN).unwrap_err().to_string(),
            "Invalid zoom factor: NaN"
        );
        assert!(props.set_max_zoom_factor(0.0).is_err());
        assert!(props.set_max_zoom_factor(f64::INFINITY).is_err());
    }

    #[test]
    fn test_anchor_ratio_range() {
        let mut props = ScrollProperties::default();
        props.set_horizontal_anchor_ratio(0.1).unwrap();
        assert_eq!(props.horizontal_anchor_ratio, 0.1);

        assert_eq!(
            props.set_vertical_anchor_ratio(1.5),
            Err(ScrollError::InvalidAnchorRatio(1.5))
        );
        assert!(props.set_vertical_anchor_ratio(f64::NAN).is_err());
        assert_eq!(props.vertical_anchor_ratio, 0.0);
    }

    #[test]
    fn test_computed_scroll_mode() {
        assert_eq!(ScrollMode::Auto.computed(10.0), ScrollMode::Enabled);
        assert_eq!(ScrollMode::Auto.computed(0.0), ScrollMode::Disabled);
        assert_eq!(ScrollMode::Disabled.computed(10.0), ScrollMode::Disabled);
        assert_eq!(ScrollMode::Enabled.computed(0.0), ScrollMode::Enabled);
    }
}
