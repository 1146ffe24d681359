//! Glide Core Runtime
//!
//! This crate provides the foundational primitives for Glide controls:
//!
//! - **Visual State Groups**: named, mutually exclusive states with idempotent transitions
//! - **Observers**: ordered subscriber lists for control events
//! - **Dismiss Timers**: tick-driven cancellable timers for auto-hiding UI
//!
//! # Example
//!
//! ```rust
//! use glide_core::fsm::{StateGroup, VisualState};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Focus {
//!     Focused,
//!     Unfocused,
//! }
//!
//! impl VisualState for Focus {
//!     fn name(self) -> &'static str {
//!         match self {
//!             Focus::Focused => "Focused",
//!             Focus::Unfocused => "Unfocused",
//!         }
//!     }
//! }
//!
//! let mut group = StateGroup::new("FocusStates");
//! assert!(group.go_to(Focus::Focused));
//! // Requesting the current state again is not a transition
//! assert!(!group.go_to(Focus::Focused));
//! assert_eq!(group.current(), Some(Focus::Focused));
//! ```

pub mod error;
pub mod events;
pub mod fsm;
pub mod timer;

pub use error::{Result, ScrollError};
pub use events::{InputDeviceKind, InputKind, InputKinds, Observers, SubscriptionId};
pub use fsm::{StateGroup, VisualState, DEFAULT_HISTORY_LIMIT};
pub use timer::DismissTimer;
