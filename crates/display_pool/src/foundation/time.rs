//! Tick-driven time management utilities
//!
//! Nothing in this module reads a wall clock. All elapsed time is supplied by
//! the host through explicit deltas, which keeps every timer deterministic
//! under test.

/// Countdown timer driven by externally supplied deltas
///
/// The countdown does not run on its own; the owner feeds it elapsed time
/// via [`Countdown::tick`] and reacts when it reports expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    remaining: f32,
    running: bool,
}

impl Countdown {
    /// Create a countdown with `duration` seconds remaining
    ///
    /// A non-positive duration produces an already-expired countdown that
    /// reports expiry on the next tick.
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
            running: true,
        }
    }

    /// Create a stopped countdown with nothing remaining
    pub fn idle() -> Self {
        Self {
            remaining: 0.0,
            running: false,
        }
    }

    /// Advance by `delta` seconds, returning `true` if the countdown expired
    /// on this tick
    ///
    /// A stopped countdown never expires. Expiry stops the countdown, so it
    /// fires at most once per [`Countdown::reset`].
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.running {
            return false;
        }
        self.remaining -= delta;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.running = false;
            return true;
        }
        false
    }

    /// Restart with `duration` seconds remaining
    pub fn reset(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
        self.running = true;
    }

    /// Stop the countdown without firing
    pub fn cancel(&mut self) {
        self.remaining = 0.0;
        self.running = false;
    }

    /// Seconds left before expiry
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Whether the countdown is still counting
    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::idle()
    }
}

/// Accumulator for virtual time advanced by the host tick loop
///
/// Tracks total elapsed virtual time and tick count so callers can report
/// average tick rates without touching a real clock.
#[derive(Debug, Clone, Default)]
pub struct TickClock {
    total_time: f32,
    last_delta: f32,
    tick_count: u64,
}

impl TickClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `delta` seconds (call once per host tick)
    pub fn advance(&mut self, delta: f32) {
        self.last_delta = delta;
        self.total_time += delta;
        self.tick_count += 1;
    }

    /// Total virtual time elapsed in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Delta supplied on the most recent tick
    pub fn last_delta(&self) -> f32 {
        self.last_delta
    }

    /// Number of ticks observed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Average ticks per second of virtual time
    pub fn average_tick_rate(&self) -> f32 {
        if self.total_time > 0.0 {
            self.tick_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn countdown_expires_once() {
        let mut countdown = Countdown::new(3.0);
        assert!(!countdown.tick(1.0));
        assert!(!countdown.tick(1.0));
        assert!(countdown.tick(1.0));
        // Already expired; must not fire again without a reset
        assert!(!countdown.tick(1.0));
        assert!(!countdown.is_running());
    }

    #[test]
    fn countdown_expires_on_overshoot() {
        let mut countdown = Countdown::new(0.5);
        assert!(countdown.tick(10.0));
        assert_relative_eq!(countdown.remaining(), 0.0);
    }

    #[test]
    fn countdown_reset_restarts() {
        let mut countdown = Countdown::new(1.0);
        assert!(countdown.tick(1.0));
        countdown.reset(2.0);
        assert!(countdown.is_running());
        assert!(!countdown.tick(1.5));
        assert_relative_eq!(countdown.remaining(), 0.5);
        assert!(countdown.tick(0.5));
    }

    #[test]
    fn cancelled_countdown_never_fires() {
        let mut countdown = Countdown::new(1.0);
        countdown.cancel();
        assert!(!countdown.tick(5.0));
    }

    #[test]
    fn idle_countdown_is_inert() {
        let mut countdown = Countdown::idle();
        assert!(!countdown.tick(1.0));
        assert!(!countdown.is_running());
    }

    #[test]
    fn tick_clock_accumulates() {
        let mut clock = TickClock::new();
        clock.advance(0.5);
        clock.advance(0.5);
        clock.advance(1.0);
        assert_relative_eq!(clock.total_time(), 2.0);
        assert_eq!(clock.tick_count(), 3);
        assert_relative_eq!(clock.average_tick_rate(), 1.5);
        assert_relative_eq!(clock.last_delta(), 1.0);
    }

    #[test]
    fn fresh_clock_reports_zero_rate() {
        let clock = TickClock::new();
        assert_relative_eq!(clock.average_tick_rate(), 0.0);
    }
}
