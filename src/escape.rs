//! Terminal escape-sequence decoder.
//!
//! Cursor keys arrive as the three bytes `ESC [ X`. The decoder swallows the
//! prefix and reports the final byte as a [`Key`]; anything that breaks the
//! prefix is handed back as an ordinary byte.

/// ASCII escape.
pub const ESC: u8 = 0x1b;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    #[default]
    Idle,
    SawEscape,
    SawBracket,
}

/// Final byte of a complete escape sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// `ESC [ A`
    Up,
    /// `ESC [ B`
    Down,
    /// `ESC [ C`
    Right,
    /// `ESC [ D`
    Left,
    /// Any other terminator. Decoded, but maps to no command.
    Other(u8),
}

impl Key {
    #[must_use]
    pub const fn from_terminator(byte: u8) -> Self {
        match byte {
            b'A' => Self::Up,
            b'B' => Self::Down,
            b'C' => Self::Right,
            b'D' => Self::Left,
            other => Self::Other(other),
        }
    }
}

/// What one input byte turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decoded {
    /// Part of a sequence that is still in progress.
    Pending,
    /// A complete `ESC [ X` sequence.
    Key(Key),
    /// An ordinary byte.
    Plain(u8),
}

/// Three-state escape-sequence decoder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoder {
    state: State,
}

impl Decoder {
    #[must_use]
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Consume one byte.
    pub fn feed(&mut self, byte: u8) -> Decoded {
        match (self.state, byte) {
            (State::Idle, ESC) => {
                self.state = State::SawEscape;
                Decoded::Pending
            }
            (State::SawEscape, b'[') => {
                self.state = State::SawBracket;
                Decoded::Pending
            }
            (State::SawBracket, terminator) => {
                self.state = State::Idle;
                Decoded::Key(Key::from_terminator(terminator))
            }
            (State::Idle, plain) => Decoded::Plain(plain),
            (State::SawEscape, plain) => {
                trace!("escape sequence broken by byte {}", plain);
                self.state = State::Idle;
                Decoded::Plain(plain)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn feed_all(decoder: &mut Decoder, bytes: &[u8]) -> Vec<Decoded> {
        bytes.iter().map(|&b| decoder.feed(b)).collect()
    }

    #[test]
    fn cursor_keys_decode() {
        let mut d = Decoder::new();
        for (term, key) in [
            (b'A', Key::Up),
            (b'B', Key::Down),
            (b'C', Key::Right),
            (b'D', Key::Left),
        ] {
            let out = feed_all(&mut d, &[ESC, b'[', term]);
            assert_eq!(out, [Decoded::Pending, Decoded::Pending, Decoded::Key(key)]);
            assert_eq!(d.state(), State::Idle);
        }
    }

    #[test]
    fn unknown_terminator_still_completes_sequence() {
        let mut d = Decoder::new();
        let out = feed_all(&mut d, &[ESC, b'[', b'Z', b'l']);
        assert_eq!(out[2], Decoded::Key(Key::Other(b'Z')));
        assert_eq!(out[3], Decoded::Plain(b'l'));
    }

    #[test]
    fn broken_prefix_passes_byte_through() {
        let mut d = Decoder::new();
        assert_eq!(d.feed(ESC), Decoded::Pending);
        assert_eq!(d.feed(b'Q'), Decoded::Plain(b'Q'));
        assert_eq!(d.state(), State::Idle);
    }

    #[test]
    fn escape_after_escape_is_plain() {
        let mut d = Decoder::new();
        assert_eq!(d.feed(ESC), Decoded::Pending);
        assert_eq!(d.feed(ESC), Decoded::Plain(ESC));
        assert_eq!(d.state(), State::Idle);
    }

    #[test]
    fn reset_drops_partial_sequence() {
        let mut d = Decoder::new();
        d.feed(ESC);
        d.feed(b'[');
        d.reset();
        assert_eq!(d.feed(b'D'), Decoded::Plain(b'D'));
    }

    proptest! {
        #[test]
        fn well_formed_sequence_yields_exactly_one_key(
            prefix in proptest::collection::vec(any::<u8>().prop_filter("no esc", |b| *b != ESC), 0..16),
            term in any::<u8>(),
        ) {
            let mut d = Decoder::new();
            feed_all(&mut d, &prefix);
            prop_assume!(d.state() == State::Idle);
            let out = feed_all(&mut d, &[ESC, b'[', term]);
            prop_assert_eq!(out, vec![Decoded::Pending, Decoded::Pending, Decoded::Key(Key::from_terminator(term))]);
            prop_assert_eq!(d.state(), State::Idle);
        }

        #[test]
        fn never_stuck_after_three_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut d = Decoder::new();
            let mut pending_run = 0;
            for b in bytes {
                match d.feed(b) {
                    Decoded::Pending => pending_run += 1,
                    _ => pending_run = 0,
                }
                prop_assert!(pending_run <= 2);
            }
        }

        #[test]
        fn plain_bytes_outside_sequences_pass_through(byte in any::<u8>().prop_filter("no esc", |b| *b != ESC)) {
            let mut d = Decoder::new();
            prop_assert_eq!(d.feed(byte), Decoded::Plain(byte));
        }
    }
}
