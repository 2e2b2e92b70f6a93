//! Badge hardware.
//!
//! Pin assignment, CPU clock bring-up and the adapters that connect the
//! round loop to the real peripherals:
//! - **Clock**: embassy-time millisecond counter
//! - **Buttons**: Start/B/A/stick-click as codes 0..3, D-pad as joystick
//! - **Serial**: UART0 at 19200 baud
//! - **HUD**: ST7789 status panel plus the LED bars showing health
//!
//! ```rust,ignore
//! let peripherals = disobey2026_defender::board::init();
//! let resources = disobey2026_defender::split_resources!(peripherals);
//! let (buttons, joystick) = board::controls(resources.buttons, &Timing::DEFAULT);
//! ```

mod display;
mod leds;
mod serial;

use core::cell::RefCell;

pub use display::Display;
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};
use esp_hal::{
    Blocking,
    assign_resources,
    clock::{
        Clock as _,
        CpuClock,
    },
    gpio::{
        Input,
        InputConfig,
        Level,
        Output,
        OutputConfig,
        Pull,
    },
    rmt::{
        Rmt,
        Tx,
        TxChannelConfig,
        TxChannelCreator as _,
    },
    rom,
    time::Rate,
};
pub use leds::HealthLeds;
pub use serial::Serial;

use crate::{
    buttons::{
        ButtonBank,
        DpadJoystick,
    },
    clock::{
        Clock,
        Millis,
    },
    config::Timing,
    game::Presentation,
    hud::Hud,
};

/// StaticCell helper: allocates a value into a `static` exactly once.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
        buttons: ButtonResources<'d> {
            up: GPIO11,
            down: GPIO1,
            left: GPIO21,
            right: GPIO2,
            stick: GPIO14,
            a: GPIO13,
            b: GPIO38,
            start: GPIO12,
        },
        leds: LedResources<'d> {
            power: GPIO17,
            io: GPIO18,
            rmt: RMT,
        },
        serial: SerialResources<'d> {
            uart: UART0,
            tx: GPIO43,
            rx: GPIO44,
        },
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// The ROM bootloader leaves the S3 on its crystal; the PLL divider has to be
/// selected before esp-hal raises the clock further.
fn set_cpu_clock(cpu_clock_speed: CpuClock) {
    let divider = match cpu_clock_speed {
        CpuClock::_80MHz => 0,
        CpuClock::_160MHz => 1,
        CpuClock::_240MHz => 2,
        _ => panic!("Unsupported CPU clock speed"),
    };
    let system = esp_hal::peripherals::SYSTEM::regs();
    let _ = system
        .sysclk_conf()
        .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
    let _ = system.cpu_per_conf().modify(|_, w| unsafe {
        let _ = w.pll_freq_sel().set_bit();
        w.cpuperiod_sel().bits(divider)
    });

    rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
}

/// Bring up the badge and return the raw peripheral set.
///
/// Split it with [`split_resources!`] afterwards.
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    set_cpu_clock(CpuClock::_160MHz);
    esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()))
}

// ── Adapters ────────────────────────────────────────────────────────────────

/// Round clock backed by the embassy time driver started by `esp-rtos`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoardClock;

impl Clock for BoardClock {
    fn now(&self) -> Millis {
        Millis::from_ticks(embassy_time::Instant::now().as_millis())
    }
}

pub type Buttons = ButtonBank<Input<'static>, BoardClock>;
pub type Joystick = DpadJoystick<Input<'static>>;

/// Split the button pins into the four push buttons and the D-pad.
pub fn controls(res: ButtonResources<'static>, timing: &Timing) -> (Buttons, Joystick) {
    let pull_up = InputConfig::default().with_pull(Pull::Up);
    let buttons = ButtonBank::new(
        [
            Input::new(res.start, pull_up),
            Input::new(res.b, pull_up),
            Input::new(res.a, pull_up),
            Input::new(res.stick, pull_up),
        ],
        BoardClock,
        timing.debounce,
    );
    let joystick = DpadJoystick {
        up: Input::new(res.up, pull_up),
        down: Input::new(res.down, pull_up),
        left: Input::new(res.left, pull_up),
        right: Input::new(res.right, pull_up),
    };
    (buttons, joystick)
}

impl<'a> From<LedResources<'a>> for esp_hal::rmt::Channel<'a, Blocking, Tx> {
    fn from(res: LedResources<'a>) -> Self {
        // The LED supply rail stays on for as long as the firmware runs.
        core::mem::forget(Output::new(res.power, Level::High, OutputConfig::default()));
        let rmt = Rmt::new(res.rmt, Rate::from_mhz(40)).unwrap();
        rmt.channel0
            .configure_tx(res.io, TxChannelConfig::default().with_clk_divider(1))
            .unwrap()
    }
}

/// Status output on the badge: LCD panel plus health on the LED bars.
pub struct BadgeHud<D> {
    lcd: Hud<D>,
    leds: HealthLeds<'static>,
    _backlight: Output<'static>,
}

impl<D> BadgeHud<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(
        lcd: D,
        leds: LedResources<'static>,
        backlight: BacklightResources<'static>,
    ) -> Self {
        Self {
            lcd: Hud::new(lcd),
            leds: HealthLeds::new(leds.into()),
            _backlight: Output::new(backlight.led, Level::High, OutputConfig::default()),
        }
    }
}

impl<D> Presentation for BadgeHud<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn refresh_score(&mut self, score: u32) {
        self.lcd.refresh_score(score);
    }

    fn refresh_health(&mut self, health: u32) {
        self.lcd.refresh_health(health);
        self.leds.show_health(health);
    }

    fn show_paused(&mut self) {
        self.lcd.show_paused();
        self.leds.dim();
    }

    fn show_resumed(&mut self) {
        self.lcd.show_resumed();
        self.leds.restore();
    }

    fn show_splash(&mut self) {
        self.lcd.show_splash();
        self.leds.clear();
    }

    fn show_round_start(&mut self) {
        self.lcd.show_round_start();
    }

    fn show_game_over(&mut self, score: u32) {
        self.lcd.show_game_over(score);
        self.leds.alarm();
    }
}

/// Lets the playfield and the HUD draw on the one panel.
pub struct SharedDisplay(pub &'static RefCell<Display<'static>>);

impl OriginDimensions for SharedDisplay {
    fn size(&self) -> Size {
        self.0.borrow().size()
    }
}

impl DrawTarget for SharedDisplay {
    type Color = Rgb565;
    type Error = <Display<'static> as DrawTarget>::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.borrow_mut().draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.0.borrow_mut().fill_contiguous(area, colors)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.0.borrow_mut().fill_solid(area, color)
    }
}
