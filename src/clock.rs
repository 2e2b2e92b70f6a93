//! Monotonic millisecond time base.

/// A point on the round clock, in milliseconds since boot.
pub type Millis = fugit::TimerInstantU64<1000>;

/// A span on the round clock.
pub type MillisDuration = fugit::MillisDurationU64;

/// Monotonically increasing millisecond counter.
///
/// The counter is advanced from an interrupt or hardware timer; reading it
/// never blocks.
pub trait Clock {
    fn now(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Millis {
        (**self).now()
    }
}

/// Build an instant from a raw millisecond count.
#[must_use]
pub const fn millis(ms: u64) -> Millis {
    Millis::from_ticks(ms)
}
