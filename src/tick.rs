//! Tick type and wrap-safe arithmetic.
//!
//! The kernel never compares two absolute tick values directly — the tick
//! counter wraps, and a direct `a < b` comparison breaks the moment it
//! does. Every comparison instead goes through [`Tick::elapsed_since`] or
//! [`Tick::has_expired`], both built on wrapping subtraction the same way
//! `Instant::duration_since` is built on wrapping subtraction on targets
//! without a monotonic clock.

#[cfg(not(feature = "wide-tick"))]
pub type Raw = u32;
#[cfg(feature = "wide-tick")]
pub type Raw = u64;

/// A kernel tick count, or a delay expressed in ticks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tick(pub Raw);

/// Return immediately; never block.
pub const IMMEDIATE: Tick = Tick(0);

/// Block forever; never time out.
pub const INFINITE: Tick = Tick(Raw::MAX);

impl Tick {
    pub const fn new(ticks: Raw) -> Self {
        Tick(ticks)
    }

    /// Number of ticks that have elapsed from `self` to `now`, correct
    /// across one counter wraparound.
    pub fn elapsed_since(self, now: Tick) -> Raw {
        now.0.wrapping_sub(self.0)
    }

    /// `true` once `now` has reached or passed `self` (a deadline),
    /// treating [`INFINITE`] as never expiring.
    pub fn has_expired(self, now: Tick) -> bool {
        if self == INFINITE {
            return false;
        }
        // Deadlines more than half the counter's range away are treated
        // as already passed rather than "not yet", so a single wrap never
        // makes an expired deadline look freshly scheduled.
        self.elapsed_since(now) < Raw::MAX / 2
    }

    pub fn add_delay(self, delay: Tick) -> Tick {
        if delay == INFINITE {
            return INFINITE;
        }
        Tick(self.0.wrapping_add(delay.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_expires_right_away() {
        assert!(IMMEDIATE.has_expired(Tick::new(0)));
    }

    #[test]
    fn infinite_never_expires() {
        assert!(!INFINITE.has_expired(Tick::new(Raw::MAX)));
    }

    #[test]
    fn deadline_survives_wraparound() {
        let start = Tick::new(Raw::MAX - 2);
        let deadline = start.add_delay(Tick::new(5));
        assert!(!deadline.has_expired(Tick::new(Raw::MAX)));
        assert!(!deadline.has_expired(Tick::new(1)));
        assert!(deadline.has_expired(deadline));
    }
}
