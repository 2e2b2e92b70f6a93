//! Tuning constants for one round.

use crate::clock::MillisDuration;

/// Pacing of every periodic action in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Time between projectile advances.
    pub projectile_interval: MillisDuration,
    /// Minimum time between two joystick samples.
    pub joystick_interval: MillisDuration,
    /// Descent interval at round start.
    pub descent_initial: MillisDuration,
    /// Amount the descent interval shrinks per threshold crossed.
    pub descent_step: MillisDuration,
    /// The descent interval never goes below this.
    pub descent_floor: MillisDuration,
    /// Score distance between difficulty thresholds. Also the first threshold.
    pub threshold_step: u32,
    /// Presses closer together than this are treated as contact bounce.
    pub debounce: MillisDuration,
}

impl Timing {
    pub const DEFAULT: Self = Self {
        projectile_interval: MillisDuration::millis(500),
        joystick_interval: MillisDuration::millis(200),
        descent_initial: MillisDuration::millis(4444),
        descent_step: MillisDuration::millis(100),
        descent_floor: MillisDuration::millis(100),
        threshold_step: 5,
        debounce: MillisDuration::millis(20),
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}
