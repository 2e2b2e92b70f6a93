//! Independently paced periodic actions.
//!
//! Every entry remembers when it last fired. A late check fires once and
//! re-bases on the current time; missed periods are never replayed.

use crate::{
    clock::{
        Millis,
        MillisDuration,
    },
    config::Timing,
};

/// One periodic action: `(last fired, interval)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Periodic {
    last_fired: Millis,
    interval: MillisDuration,
}

impl Periodic {
    #[must_use]
    pub const fn new(now: Millis, interval: MillisDuration) -> Self {
        Self {
            last_fired: now,
            interval,
        }
    }

    #[must_use]
    pub const fn last_fired(&self) -> Millis {
        self.last_fired
    }

    #[must_use]
    pub const fn interval(&self) -> MillisDuration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: MillisDuration) {
        self.interval = interval;
    }

    #[must_use]
    pub fn is_due(&self, now: Millis) -> bool {
        now >= self.last_fired + self.interval
    }

    /// Returns `true` and records `now` as the last firing if the interval
    /// has elapsed.
    pub fn fire_if_due(&mut self, now: Millis) -> bool {
        if self.is_due(now) {
            self.last_fired = now;
            true
        } else {
            false
        }
    }
}

/// All periodic actions of one round plus the difficulty ramp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Schedule {
    pub projectiles: Periodic,
    pub descent: Periodic,
    pub joystick: Periodic,
    next_threshold: u32,
    timing: Timing,
}

impl Schedule {
    /// Fresh schedule with every entry anchored at `now`.
    #[must_use]
    pub const fn new(now: Millis, timing: Timing) -> Self {
        Self {
            projectiles: Periodic::new(now, timing.projectile_interval),
            descent: Periodic::new(now, timing.descent_initial),
            joystick: Periodic::new(now, timing.joystick_interval),
            next_threshold: timing.threshold_step,
            timing,
        }
    }

    /// Score at which the descent interval next shrinks.
    #[must_use]
    pub const fn next_threshold(&self) -> u32 {
        self.next_threshold
    }

    /// Shrink the descent interval by one step if `score` reached the next
    /// threshold. At most one step per call, however far the score jumped.
    pub fn ramp(&mut self, score: u32) -> bool {
        let interval = self.descent.interval();
        if score < self.next_threshold || interval <= self.timing.descent_floor {
            return false;
        }

        let reduced = interval
            .checked_sub(self.timing.descent_step)
            .unwrap_or(self.timing.descent_floor);
        let reduced = if reduced < self.timing.descent_floor {
            self.timing.descent_floor
        } else {
            reduced
        };

        self.next_threshold = self.next_threshold.saturating_add(self.timing.threshold_step);
        self.descent.set_interval(reduced);
        debug!(
            "descent every {} ms, next step at score {}",
            reduced.to_millis(),
            self.next_threshold
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::millis;

    fn ms(v: u64) -> MillisDuration {
        MillisDuration::millis(v)
    }

    #[test]
    fn fires_once_and_rebases_on_now() {
        let mut p = Periodic::new(millis(1000), ms(500));
        assert!(!p.fire_if_due(millis(1499)));
        assert!(p.fire_if_due(millis(2300)));
        assert_eq!(p.last_fired(), millis(2300));
        assert!(!p.fire_if_due(millis(2300)));
        assert!(!p.fire_if_due(millis(2799)));
        assert!(p.fire_if_due(millis(2800)));
    }

    #[test]
    fn due_exactly_at_interval() {
        let p = Periodic::new(millis(0), ms(200));
        assert!(!p.is_due(millis(199)));
        assert!(p.is_due(millis(200)));
    }

    #[test]
    fn score_five_steps_descent_down() {
        let mut s = Schedule::new(millis(0), Timing::DEFAULT);
        assert!(!s.ramp(4));
        assert_eq!(s.descent.interval(), ms(4444));
        assert!(s.ramp(5));
        assert_eq!(s.descent.interval(), ms(4344));
        assert_eq!(s.next_threshold(), 10);
    }

    #[test]
    fn one_step_per_call_even_after_a_big_jump() {
        let mut s = Schedule::new(millis(0), Timing::DEFAULT);
        assert!(s.ramp(17));
        assert_eq!(s.descent.interval(), ms(4344));
        assert_eq!(s.next_threshold(), 10);
        assert!(s.ramp(17));
        assert!(s.ramp(17));
        assert!(!s.ramp(17));
        assert_eq!(s.descent.interval(), ms(4144));
        assert_eq!(s.next_threshold(), 20);
    }

    #[test]
    fn interval_stops_at_floor() {
        let mut s = Schedule::new(millis(0), Timing::DEFAULT);
        for _ in 0..100 {
            s.ramp(u32::MAX);
        }
        assert_eq!(s.descent.interval(), ms(100));
        let threshold = s.next_threshold();
        assert!(!s.ramp(u32::MAX));
        assert_eq!(s.next_threshold(), threshold);
    }

    #[test]
    fn ramp_keeps_last_fired() {
        let mut s = Schedule::new(millis(0), Timing::DEFAULT);
        s.descent.fire_if_due(millis(5000));
        s.ramp(5);
        assert_eq!(s.descent.last_fired(), millis(5000));
        assert!(s.descent.is_due(millis(5000 + 4344)));
    }
}
