//! Scroll control error types

use std::time::Duration;

use thiserror::Error;

/// Errors reported by scroll controls
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrollError {
    /// Minimum zoom factor would exceed the maximum
    #[error("Invalid zoom factors: min {min} is greater than max {max}")]
    InvalidZoomFactors { min: f64, max: f64 },

    /// Zoom factor is not a positive finite number
    #[error("Invalid zoom factor: {0}")]
    InvalidZoomFactor(f64),

    /// Anchor ratio outside of [0, 1]
    #[error("Invalid anchor ratio: {0} (expected a value between 0.0 and 1.0)")]
    InvalidAnchorRatio(f64),

    /// An expected notification did not arrive in time
    #[error("Timed out after {waited:?} waiting for {expected}")]
    Timeout { expected: String, waited: Duration },

    /// Write through a handle whose element was already removed
    #[error("Element has been released")]
    ElementReleased,

    /// The presenter part is required but the template was not applied yet
    #[error("Template part PART_ScrollPresenter is not available")]
    TemplateNotApplied,
}

/// Result type for scroll control operations
pub type Result<T> = std::result::Result<T, ScrollError>;
