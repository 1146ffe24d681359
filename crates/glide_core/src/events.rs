//! Event dispatch system
//!
//! Ordered observer lists and the input device vocabulary shared by controls.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

/// Kind of device that last interacted with a control
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum InputDeviceKind {
    #[default]
    None,
    Mouse,
    Touch,
    Pen,
}

/// Kind of input that can drive scrolling or zooming
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    Touch,
    Pen,
    MouseWheel,
    Keyboard,
    Gamepad,
}

impl InputKind {
    const fn bit(self) -> u8 {
        match self {
            InputKind::Touch => InputKinds::TOUCH,
            InputKind::Pen => InputKinds::PEN,
            InputKind::MouseWheel => InputKinds::MOUSE_WHEEL,
            InputKind::Keyboard => InputKinds::KEYBOARD,
            InputKind::Gamepad => InputKinds::GAMEPAD,
        }
    }

    /// Device that produced this input, if it maps to one
    pub const fn device(self) -> InputDeviceKind {
        match self {
            InputKind::Touch => InputDeviceKind::Touch,
            InputKind::Pen => InputDeviceKind::Pen,
            InputKind::MouseWheel => InputDeviceKind::Mouse,
            InputKind::Keyboard | InputKind::Gamepad => InputDeviceKind::None,
        }
    }
}

/// Set of input kinds (used for ignored input)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputKinds {
    bits: u8,
}

impl InputKinds {
    pub const NONE: InputKinds = InputKinds { bits: 0 };
    pub const ALL: InputKinds = InputKinds { bits: 0b1_1111 };
    pub const TOUCH: u8 = 0b0_0001;
    pub const PEN: u8 = 0b0_0010;
    pub const MOUSE_WHEEL: u8 = 0b0_0100;
    pub const KEYBOARD: u8 = 0b0_1000;
    pub const GAMEPAD: u8 = 0b1_0000;

    /// Create from raw bits (unknown bits are dropped)
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            bits: bits & Self::ALL.bits,
        }
    }

    /// Raw bits
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Set with a single kind
    pub const fn only(kind: InputKind) -> Self {
        Self { bits: kind.bit() }
    }

    /// Return a copy that also contains `kind`
    pub const fn with(self, kind: InputKind) -> Self {
        Self {
            bits: self.bits | kind.bit(),
        }
    }

    /// Check if `kind` is in the set
    pub const fn contains(&self, kind: InputKind) -> bool {
        self.bits & kind.bit() != 0
    }

    /// Check if the set is empty
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl From<InputKind> for InputKinds {
    fn from(kind: InputKind) -> Self {
        Self::only(kind)
    }
}

impl std::ops::BitOr for InputKind {
    type Output = InputKinds;

    fn bitor(self, rhs: InputKind) -> InputKinds {
        InputKinds::only(self).with(rhs)
    }
}

impl std::ops::BitOr<InputKind> for InputKinds {
    type Output = InputKinds;

    fn bitor(self, rhs: InputKind) -> InputKinds {
        self.with(rhs)
    }
}

/// Identifies one subscription. Ids are unique across all observer lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

impl SubscriptionId {
    fn next() -> Self {
        Self(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Event handler function type
pub type EventHandler<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Ordered list of event subscribers.
///
/// Handlers run in subscription order. A handler that panics is logged and
/// skipped; the remaining handlers still receive the event.
pub struct Observers<T> {
    handlers: SmallVec<[(SubscriptionId, EventHandler<T>); 2]>,
}

impl<T> Observers<T> {
    pub fn new() -> Self {
        Self {
            handlers: SmallVec::new(),
        }
    }

    /// Register a handler
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId::next();
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Deliver an event to every handler, in subscription order
    pub fn notify(&self, event: &T) {
        for (id, handler) in &self.handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
                tracing::warn!(
                    subscription = id.0,
                    "event handler panicked; continuing delivery"
                );
            }
        }
    }

    /// Number of subscribed handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if nothing is subscribed
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_delivery_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::new();

        for tag in ["first", "second", "third"] {
            let log = log.clone();
            observers.subscribe(move |value: &u32| {
                log.lock().unwrap().push((tag, *value));
            });
        }

        observers.notify(&7);
        assert_eq!(
            *log.lock().unwrap(),
            vec![("first", 7), ("second", 7), ("third", 7)]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let mut observers = Observers::new();

        let count_clone = count.clone();
        let id = observers.subscribe(move |_: &()| *count_clone.lock().unwrap() += 1);
        assert_eq!(observers.len(), 1);

        observers.notify(&());
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify(&());

        assert_eq!(*count.lock().unwrap(), 1);
        assert!(observers.is_empty());
    }

    #[test]
    fn test_ids_are_unique_across_lists() {
        let mut first: Observers<()> = Observers::new();
        let mut second: Observers<()> = Observers::new();
        let a = first.subscribe(|_| {});
        let b = second.subscribe(|_| {});
        assert_ne!(a, b);
        assert!(!first.unsubscribe(b));
    }

    #[test]
    fn test_panicking_handler_does_not_stop_delivery() {
        let reached = Arc::new(Mutex::new(false));
        let mut observers = Observers::new();

        observers.subscribe(|_: &()| panic!("handler failure"));
        let reached_clone = reached.clone();
        observers.subscribe(move |_: &()| *reached_clone.lock().unwrap() = true);

        observers.notify(&());
        assert!(*reached.lock().unwrap());
    }

    #[test]
    fn test_input_kinds() {
        let kinds = InputKind::MouseWheel | InputKind::Pen;
        assert!(kinds.contains(InputKind::MouseWheel));
        assert!(kinds.contains(InputKind::Pen));
        assert!(!kinds.contains(InputKind::Touch));
        assert_eq!(kinds.bits(), InputKinds::MOUSE_WHEEL | InputKinds::PEN);

        assert!(InputKinds::default().is_empty());
        assert_eq!(InputKinds::default(), InputKinds::NONE);
        assert_eq!(InputKinds::from_bits(0xFF), InputKinds::ALL);
    }

    #[test]
    fn test_input_kind_devices() {
        assert_eq!(InputKind::MouseWheel.device(), InputDeviceKind::Mouse);
        assert_eq!(InputKind::Touch.device(), InputDeviceKind::Touch);
        assert_eq!(InputKind::Keyboard.device(), InputDeviceKind::None);
    }
}
