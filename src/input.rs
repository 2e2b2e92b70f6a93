//! Input sources polled by the round loop.
//!
//! Each source reports "nothing happened" with its own tagged value
//! (`None`, [`Joystick::Neutral`]) so no sentinel is shared between them.

/// One of the four push buttons, numbered as on the original board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Move right.
    B0,
    /// Reserved.
    B1,
    /// Fire.
    B2,
    /// Move left.
    B3,
}

impl Button {
    pub const ALL: [Self; 4] = [Self::B0, Self::B1, Self::B2, Self::B3];

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::B0),
            1 => Some(Self::B1),
            2 => Some(Self::B2),
            3 => Some(Self::B3),
            _ => None,
        }
    }
}

/// Position of the joystick at the moment it was sampled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Joystick {
    Left,
    Right,
    Up,
    Down,
    #[default]
    Neutral,
}

/// Edge-triggered push buttons.
pub trait ButtonSource {
    /// Return the oldest pending press and consume it.
    fn poll(&mut self) -> Option<Button>;

    /// Discard every pending press.
    fn clear(&mut self) {
        while self.poll().is_some() {}
    }

    /// Sample the hardware and keep new presses for a later
    /// [`poll`](Self::poll). Sources that queue presses on their own need
    /// nothing here.
    fn latch(&mut self) {}
}

/// Byte stream from the serial terminal.
pub trait SerialSource {
    /// `true` when [`read_byte`](Self::read_byte) would return immediately.
    fn available(&mut self) -> bool;

    /// Read one byte, blocking until one arrives.
    fn read_byte(&mut self) -> u8;

    /// Drop everything already received.
    fn clear(&mut self) {
        while self.available() {
            let _ = self.read_byte();
        }
    }
}

/// Level-sampled joystick.
pub trait JoystickSource {
    fn sample(&mut self) -> Joystick;
}

impl<T: ButtonSource + ?Sized> ButtonSource for &mut T {
    fn poll(&mut self) -> Option<Button> {
        (**self).poll()
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn latch(&mut self) {
        (**self).latch();
    }
}

impl<T: SerialSource + ?Sized> SerialSource for &mut T {
    fn available(&mut self) -> bool {
        (**self).available()
    }

    fn read_byte(&mut self) -> u8 {
        (**self).read_byte()
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

impl<T: JoystickSource + ?Sized> JoystickSource for &mut T {
    fn sample(&mut self) -> Joystick {
        (**self).sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_codes_round_trip() {
        for button in Button::ALL {
            assert_eq!(Button::from_code(button.code()), Some(button));
        }
        assert_eq!(Button::from_code(4), None);
    }
}
