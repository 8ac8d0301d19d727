//! Frame pacing for data playback.
//!
//! A [`FrameTicker`] decides when a playback routine may advance to its next
//! data frame. It is driven by the scaled world delta and is independent of
//! how frames are read or parsed.
//!
//! The first tick after [`FrameTicker::restart`] fires immediately; after
//! that it fires once every `interval` seconds of accumulated time. Overshoot
//! past a boundary carries into the next interval, so the long-run rate does
//! not drift with the frame delta. At most one advance happens per tick, so a
//! long stall does not replay a burst of frames.

/// Interval timer that gates "advance one frame".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTicker {
    /// Seconds between two advances.
    pub interval: f32,
    elapsed: f32,
    primed: bool,
}

impl FrameTicker {
    /// Create a ticker that fires on its first tick.
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(0.0),
            elapsed: 0.0,
            primed: true,
        }
    }

    /// Make the next tick fire immediately.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.primed = true;
    }

    /// Advance by `dt` seconds; returns true when a frame should be shown.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.primed {
            self.primed = false;
            self.elapsed = 0.0;
            return true;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.interval {
            // keep the overshoot, but drop whole intervals missed in a stall
            self.elapsed = if self.interval > 0.0 {
                (self.elapsed - self.interval) % self.interval
            } else {
                0.0
            };
            true
        } else {
            false
        }
    }

    /// Seconds until the next advance.
    pub fn remaining(&self) -> f32 {
        if self.primed {
            0.0
        } else {
            (self.interval - self.elapsed).max(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_immediately_then_every_interval() {
        let mut ticker = FrameTicker::new(1.0);
        assert!(ticker.tick(0.0));
        assert!(!ticker.tick(0.4));
        assert!(!ticker.tick(0.4));
        assert!(ticker.tick(0.4));
        assert!(!ticker.tick(0.1));
    }

    #[test]
    fn long_stall_advances_only_once() {
        let mut ticker = FrameTicker::new(0.5);
        assert!(ticker.tick(0.0));
        assert!(ticker.tick(10.0));
        assert!(!ticker.tick(0.0));
    }

    #[test]
    fn overshoot_carries_into_next_interval() {
        // 0.75 and 1.0 are exact in binary, so counts are exact too.
        let mut ticker = FrameTicker::new(1.0);
        assert!(ticker.tick(0.0));
        let fired = (0..40).filter(|_| ticker.tick(0.75)).count();
        assert_eq!(fired, 30);
    }

    #[test]
    fn stall_remainder_is_within_one_interval() {
        let mut ticker = FrameTicker::new(1.0);
        assert!(ticker.tick(0.0));
        assert!(ticker.tick(3.5));
        assert_eq!(ticker.remaining(), 0.5);
        assert!(!ticker.tick(0.25));
        assert!(ticker.tick(0.25));
    }

    #[test]
    fn zero_interval_fires_every_tick() {
        let mut ticker = FrameTicker::new(0.0);
        assert!(ticker.tick(0.0));
        assert!(ticker.tick(0.0));
        assert!(ticker.tick(0.016));
    }

    #[test]
    fn restart_primes_again() {
        let mut ticker = FrameTicker::new(2.0);
        assert!(ticker.tick(0.0));
        assert!(!ticker.tick(1.0));
        assert_eq!(ticker.remaining(), 1.0);
        ticker.restart();
        assert_eq!(ticker.remaining(), 0.0);
        assert!(ticker.tick(0.0));
    }

    #[test]
    fn negative_interval_is_clamped() {
        let ticker = FrameTicker::new(-3.0);
        assert_eq!(ticker.interval, 0.0);
    }
}
