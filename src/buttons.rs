//! Push-button and D-pad adapters over `embedded-hal` input pins.
//!
//! All pins are active low (pulled up, pressed = low), as on the badge.

use embedded_hal::digital::InputPin;

use crate::{
    clock::{
        Clock,
        Millis,
        MillisDuration,
    },
    input::{
        Button,
        ButtonSource,
        Joystick,
        JoystickSource,
    },
};

fn pressed(pin: &mut impl InputPin) -> bool {
    // A pin that cannot be read counts as released.
    pin.is_low().unwrap_or(false)
}

/// Debounce state of one pin.
#[derive(Clone, Copy, Debug)]
struct Contact {
    raw: bool,
    stable: bool,
    changed_at: Millis,
}

/// Four push buttons, latched on press and handed out one per poll.
///
/// A level must hold for the debounce time before it counts, so contact
/// bounce on either edge never produces a second press.
pub struct ButtonBank<P, C> {
    pins: [P; 4],
    clock: C,
    contacts: [Contact; 4],
    debounce: MillisDuration,
    pending: u8,
}

impl<P, C> ButtonBank<P, C>
where
    P: InputPin,
    C: Clock,
{
    /// `pins[n]` reports as button code `n`.
    pub fn new(pins: [P; 4], clock: C, debounce: MillisDuration) -> Self {
        let now = clock.now();
        let mut bank = Self {
            pins,
            clock,
            contacts: [Contact {
                raw: false,
                stable: false,
                changed_at: now,
            }; 4],
            debounce,
            pending: 0,
        };
        // Buttons held at power-up are not presses.
        for (pin, contact) in bank.pins.iter_mut().zip(bank.contacts.iter_mut()) {
            let level = pressed(pin);
            contact.raw = level;
            contact.stable = level;
        }
        bank
    }

    /// Sample every pin and latch presses that have settled.
    pub fn scan(&mut self) {
        let now = self.clock.now();
        for (index, (pin, contact)) in self.pins.iter_mut().zip(self.contacts.iter_mut()).enumerate() {
            let level = pressed(pin);
            if level != contact.raw {
                contact.raw = level;
                contact.changed_at = now;
            }
            if contact.raw != contact.stable && now >= contact.changed_at + self.debounce {
                contact.stable = contact.raw;
                if contact.stable {
                    self.pending |= 1 << index;
                }
            }
        }
    }
}

impl<P, C> ButtonSource for ButtonBank<P, C>
where
    P: InputPin,
    C: Clock,
{
    fn poll(&mut self) -> Option<Button> {
        self.scan();
        if self.pending == 0 {
            return None;
        }
        let index = self.pending.trailing_zeros() as u8;
        self.pending &= !(1 << index);
        Button::from_code(index)
    }

    fn clear(&mut self) {
        self.scan();
        self.pending = 0;
    }

    fn latch(&mut self) {
        self.scan();
    }
}

/// The D-pad read as a joystick.
pub struct DpadJoystick<P> {
    pub up: P,
    pub down: P,
    pub left: P,
    pub right: P,
}

impl<P: InputPin> JoystickSource for DpadJoystick<P> {
    fn sample(&mut self) -> Joystick {
        if pressed(&mut self.left) {
            Joystick::Left
        } else if pressed(&mut self.right) {
            Joystick::Right
        } else if pressed(&mut self.up) {
            Joystick::Up
        } else if pressed(&mut self.down) {
            Joystick::Down
        } else {
            Joystick::Neutral
        }
    }
}
