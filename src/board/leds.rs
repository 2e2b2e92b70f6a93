//! Health gauge on the two WS2812 LED bars.
//!
//! The badge has 10 LEDs, five per side. Both bars mirror each other and
//! light bottom-up, one LED per remaining life.

use embassy_time::{
    Duration,
    block_for,
};
use esp_hal::{
    Blocking,
    gpio::Level,
    rmt::{
        Channel,
        PulseCode,
        Tx,
    },
};
use palette::Srgb;

const LED_COUNT: usize = 10;
const BAR_COUNT: usize = 5;
/// 24 pulses per LED (GRB) plus the end marker.
const PULSES: usize = LED_COUNT * 24 + 1;

const HEALTHY: Srgb<u8> = Srgb::new(0, 6, 2);
const CRITICAL: Srgb<u8> = Srgb::new(12, 2, 0);
const OFF: Srgb<u8> = Srgb::new(0, 0, 0);

pub struct HealthLeds<'a> {
    channel: Option<Channel<'a, Blocking, Tx>>,
    framebuffer: [Srgb<u8>; LED_COUNT],
    shown: [Srgb<u8>; LED_COUNT],
}

impl<'a> HealthLeds<'a> {
    pub const fn new(channel: Channel<'a, Blocking, Tx>) -> Self {
        Self {
            channel: Some(channel),
            framebuffer: [OFF; LED_COUNT],
            shown: [OFF; LED_COUNT],
        }
    }

    /// Light one LED per life on both bars, red on the last one.
    pub fn show_health(&mut self, health: u32) {
        let lit = (health as usize).min(BAR_COUNT);
        let color = if lit <= 1 { CRITICAL } else { HEALTHY };
        let mut bar = [OFF; BAR_COUNT];
        bar[..lit].fill(color);
        self.set_bars(&bar);
        self.flush();
    }

    /// Blank the bars while paused, keeping the gauge to restore later.
    pub fn dim(&mut self) {
        self.shown = self.framebuffer;
        self.framebuffer = [OFF; LED_COUNT];
        self.flush();
    }

    pub fn restore(&mut self) {
        self.framebuffer = self.shown;
        self.flush();
    }

    pub fn clear(&mut self) {
        self.framebuffer = [OFF; LED_COUNT];
        self.flush();
    }

    /// All LEDs red.
    pub fn alarm(&mut self) {
        self.framebuffer = [Srgb::new(20, 0, 0); LED_COUNT];
        self.flush();
    }

    /// Hardware index 0 is bottom right, 4 top right, 5 top left, 9 bottom
    /// left. `bar[0]` is the bottom LED on both sides.
    fn set_bars(&mut self, bar: &[Srgb<u8>; BAR_COUNT]) {
        self.framebuffer[..BAR_COUNT].copy_from_slice(bar);
        for (i, color) in bar.iter().enumerate() {
            self.framebuffer[LED_COUNT - 1 - i] = *color;
        }
    }

    fn flush(&mut self) {
        let Some(channel) = self.channel.take() else {
            error!("RMT channel lost during previous transmission");
            return;
        };

        let mut pulses = [PulseCode::default(); PULSES];
        for (led, color) in self.framebuffer.iter().enumerate() {
            // WS2812 expects GRB byte order
            for (byte_index, byte) in [color.green, color.red, color.blue].into_iter().enumerate() {
                let start = led * 24 + byte_index * 8;
                pulses[start..start + 8].copy_from_slice(&Self::byte_to_pulses(byte));
            }
        }
        pulses[PULSES - 1] = PulseCode::end_marker();

        let transaction = match channel.transmit(&pulses) {
            Ok(t) => t,
            Err(e) => {
                error!("RMT transmit failed: {}", e);
                return;
            }
        };

        self.channel = Some(match transaction.wait() {
            Ok(ch) => ch,
            Err((err, ch)) => {
                error!("RMT transaction failed: {}", err);
                ch
            }
        });

        // WS2812 latch time
        block_for(Duration::from_micros(50));
    }

    /// WS2812 bit timing at 40 MHz RMT clock.
    const fn bit_to_pulse(bit: bool) -> PulseCode {
        if bit {
            // '1': 0.8 µs high, 0.45 µs low
            PulseCode::new(Level::High, 32, Level::Low, 18)
        } else {
            // '0': 0.4 µs high, 0.85 µs low
            PulseCode::new(Level::High, 16, Level::Low, 34)
        }
    }

    fn byte_to_pulses(byte: u8) -> [PulseCode; 8] {
        core::array::from_fn(|i| Self::bit_to_pulse((byte >> (7 - i)) & 1 != 0))
    }
}
