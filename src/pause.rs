//! Modal pause.
//!
//! The only place the round blocks. Only the serial byte stream is acted on
//! until the next `p`/`P`. The joystick and every periodic action are
//! frozen, and the schedule is not compensated for the time spent here.
//! Button presses are latched while waiting and handled after resuming.

use crate::{
    game::Presentation,
    input::{
        ButtonSource,
        SerialSource,
    },
};

/// Block until the pause key arrives again. Returns how many other bytes
/// were discarded meanwhile.
pub fn hold(
    serial: &mut impl SerialSource,
    buttons: &mut impl ButtonSource,
    hud: &mut impl Presentation,
) -> usize {
    hud.show_paused();
    info!("paused");

    let mut discarded = 0;
    loop {
        if !serial.available() {
            buttons.latch();
            continue;
        }
        if matches!(serial.read_byte(), b'p' | b'P') {
            break;
        }
        discarded += 1;
    }

    hud.show_resumed();
    info!("resumed, {} bytes ignored while paused", discarded);
    discarded
}
