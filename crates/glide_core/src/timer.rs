//! Dismiss timer
//!
//! A one-shot, cancellable timer advanced by the frame tick instead of a
//! system clock, so callers on the UI thread decide when time passes.

/// One-shot timer that fires once `delay` seconds of ticks have elapsed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DismissTimer {
    delay: f32,
    elapsed: f32,
    armed: bool,
}

impl DismissTimer {
    /// Create a disarmed timer
    pub fn new(delay: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            elapsed: 0.0,
            armed: false,
        }
    }

    /// Delay in seconds
    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Check if a fire is pending
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Start (or restart) the countdown. A pending fire is replaced.
    pub fn arm(&mut self) {
        self.elapsed = 0.0;
        self.armed = true;
    }

    /// Cancel any pending fire
    pub fn cancel(&mut self) {
        self.elapsed = 0.0;
        self.armed = false;
    }

    /// Advance by `dt` seconds.
    ///
    /// Returns `true` exactly once, on the tick the delay is reached.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.armed {
            return false;
        }

        self.elapsed += dt;
        if self.elapsed >= self.delay {
            self.cancel();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let mut timer = DismissTimer::new(1.0);
        timer.arm();

        assert!(!timer.advance(0.5));
        assert!(timer.advance(0.5));
        assert!(!timer.is_armed());
        assert!(!timer.advance(5.0));
    }

    #[test]
    fn test_rearm_restarts_countdown() {
        let mut timer = DismissTimer::new(1.0);
        timer.arm();
        assert!(!timer.advance(0.75));

        timer.arm();
        assert!(!timer.advance(0.75));
        assert!(timer.advance(0.25));
    }

    #[test]
    fn test_cancel() {
        let mut timer = DismissTimer::new(0.25);
        timer.arm();
        timer.cancel();
        assert!(!timer.advance(1.0));
    }

    #[test]
    fn test_disarmed_timer_never_fires() {
        let mut timer = DismissTimer::new(0.0);
        assert!(!timer.advance(1.0));
        assert_eq!(timer.delay(), 0.0);
    }
}
