//! Glide Layout
//!
//! Scroll view control built on an element arena: scroll controller visual
//! states, anchor candidates and the presenter part that scrolls the content.

pub mod anchor;
pub mod geometry;
pub mod probe;
pub mod properties;
pub mod tree;
pub mod visual_states;
pub mod widgets;

pub use anchor::{AnchorRegistry, AnchorRequestedArgs};
pub use geometry::{Axis, Point, Rect, ScrollGeometry, Size};
pub use probe::StateProbe;
pub use properties::{
    ChainingMode, ContentOrientation, RailingMode, ScrollBarVisibility, ScrollMode,
    ScrollProperties, ZoomMode,
};
pub use tree::{ElementId, ElementTree};
pub use visual_states::{
    IndicatorState, ScrollControllerState, ScrollStateMachine, SeparatorState, VisualStateCounts,
    VisualStateEvent,
};
pub use widgets::{ScrollPresenter, ScrollView, ScrollViewOptions};
