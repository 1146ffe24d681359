//! Scroll widgets

pub mod scroll_presenter;
pub mod scroll_view;

pub use scroll_presenter::{ScrollInputOutcome, ScrollPresenter, DEFAULT_RAILING_RATIO};
pub use scroll_view::{ScrollView, ScrollViewOptions};
