//! Input arbitration: many raw signals in, one [`Command`] out.

use crate::{
    escape::{
        Decoded,
        Decoder,
        Key,
    },
    input::{
        Button,
        ButtonSource,
        Joystick,
        JoystickSource,
        SerialSource,
    },
};

/// The single action taken from input in one loop iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    MoveLeft,
    MoveRight,
    Fire,
    /// Recognised input with no effect yet (button 1, cursor down).
    Ignore,
    PauseToggle,
    /// No input this iteration.
    None,
}

/// Everything the input sources reported in one iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Signals {
    pub button: Option<Button>,
    pub key: Option<Key>,
    pub plain: Option<u8>,
    pub joystick: Joystick,
}

impl Signals {
    /// Resolve to one command. First match wins:
    /// move-left, fire, ignore, move-right, pause.
    #[must_use]
    pub fn resolve(&self) -> Command {
        let Self {
            button,
            key,
            plain,
            joystick,
        } = *self;

        if button == Some(Button::B3)
            || key == Some(Key::Left)
            || matches!(plain, Some(b'L' | b'l'))
            || joystick == Joystick::Left
        {
            Command::MoveLeft
        } else if button == Some(Button::B2)
            || key == Some(Key::Up)
            || plain == Some(b' ')
            || joystick == Joystick::Up
        {
            Command::Fire
        } else if button == Some(Button::B1) || key == Some(Key::Down) {
            Command::Ignore
        } else if button == Some(Button::B0)
            || key == Some(Key::Right)
            || matches!(plain, Some(b'R' | b'r'))
            || joystick == Joystick::Right
        {
            Command::MoveRight
        } else if matches!(plain, Some(b'P' | b'p')) {
            Command::PauseToggle
        } else {
            Command::None
        }
    }
}

/// Polls the input sources and owns the escape decoder between iterations.
#[derive(Clone, Debug, Default)]
pub struct Arbiter {
    decoder: Decoder,
}

impl Arbiter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            decoder: Decoder::new(),
        }
    }

    #[must_use]
    pub const fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn reset(&mut self) {
        self.decoder.reset();
    }

    /// Gather this iteration's signals.
    ///
    /// A button press shadows serial input: the serial byte stays queued for
    /// a later iteration. At most one serial byte is consumed. The joystick
    /// is only sampled when `joystick_due` is set.
    pub fn poll(
        &mut self,
        buttons: &mut impl ButtonSource,
        serial: &mut impl SerialSource,
        joystick: &mut impl JoystickSource,
        joystick_due: bool,
    ) -> Signals {
        let mut signals = Signals {
            button: buttons.poll(),
            ..Signals::default()
        };

        if signals.button.is_none() && serial.available() {
            match self.decoder.feed(serial.read_byte()) {
                Decoded::Pending => {}
                Decoded::Key(key) => signals.key = Some(key),
                Decoded::Plain(byte) => signals.plain = Some(byte),
            }
        }

        if joystick_due {
            signals.joystick = joystick.sample();
        }

        signals
    }
}
