//! Asteroid defence on the badge.
//!
//! Asteroids drift down an 8-column field on the left of the panel; the base
//! on the bottom row shoots them. Score and lives are on the right.
//!
//! Controls:
//! - D-pad Left/Right or stick click/Start: move base
//! - A or D-pad Up: fire
//! - Serial terminal (19200 baud): `L`/`R`/space, cursor keys, `P` to pause

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::info;
#[allow(clippy::wildcard_imports)]
use disobey2026_defender::board::*;
use disobey2026_defender::{
    Devices,
    Direction,
    Session,
    Simulation,
    Timing,
    mk_static,
};
use embassy_executor::Spawner;
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        PrimitiveStyle,
        Rectangle,
    },
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

// ── Field geometry ──────────────────────────────────────────────────────────
const COLS: usize = 8;
const ROWS: usize = 17;
const CELL: i32 = 10;
const FIELD_X: i32 = 20;
const BASE_ROW: usize = ROWS - 1;

const MAX_ASTEROIDS: usize = 12;
const MAX_PROJECTILES: usize = 4;
const START_HEALTH: u32 = 5;

const SKY: Rgb565 = Rgb565::BLACK;

// ── Simple RNG ──────────────────────────────────────────────────────────────
struct Rng(u32);

impl Rng {
    fn next(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        self.0
    }

    fn range(&mut self, max: u32) -> u32 {
        self.next() % max
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    col: usize,
    row: usize,
}

/// Grid playfield drawn straight onto the shared panel.
struct Field {
    panel: SharedDisplay,
    rng: Rng,
    base: usize,
    asteroids: [Option<Cell>; MAX_ASTEROIDS],
    projectiles: [Option<Cell>; MAX_PROJECTILES],
    score: u32,
    health: u32,
}

impl Field {
    fn new(panel: SharedDisplay, seed: u32) -> Self {
        Self {
            panel,
            rng: Rng(seed | 1),
            base: COLS / 2,
            asteroids: [None; MAX_ASTEROIDS],
            projectiles: [None; MAX_PROJECTILES],
            score: 0,
            health: START_HEALTH,
        }
    }

    fn paint(&mut self, cell: Cell, color: Rgb565) {
        let at = Point::new(FIELD_X + cell.col as i32 * CELL, cell.row as i32 * CELL);
        Rectangle::new(at, Size::new(CELL as u32 - 1, CELL as u32 - 1))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.panel)
            .ok();
    }

    fn paint_base(&mut self, color: Rgb565) {
        for col in self.base.saturating_sub(1)..=(self.base + 1).min(COLS - 1) {
            self.paint(Cell { col, row: BASE_ROW }, color);
        }
    }

    fn spawn(&mut self) {
        let col = self.rng.range(COLS as u32) as usize;
        let cell = Cell { col, row: 0 };
        if self.asteroids.contains(&Some(cell)) {
            return;
        }
        if let Some(slot) = self.asteroids.iter_mut().find(|a| a.is_none()) {
            *slot = Some(cell);
            self.paint(cell, Rgb565::CSS_SADDLE_BROWN);
        }
    }

    fn on_base(&self, cell: Cell) -> bool {
        cell.row == BASE_ROW && cell.col.abs_diff(self.base) <= 1
    }

    /// Remove whatever projectile and asteroid share a cell.
    fn collide(&mut self) {
        for p in 0..MAX_PROJECTILES {
            let Some(shot) = self.projectiles[p] else { continue };
            if let Some(a) = self.asteroids.iter().position(|a| *a == Some(shot)) {
                self.asteroids[a] = None;
                self.projectiles[p] = None;
                self.paint(shot, SKY);
                self.score += 1;
            }
        }
    }
}

impl Simulation for Field {
    fn start_round(&mut self) {
        self.base = COLS / 2;
        self.asteroids = [None; MAX_ASTEROIDS];
        self.projectiles = [None; MAX_PROJECTILES];
        self.score = 0;
        self.health = START_HEALTH;
        let size = Size::new((COLS as i32 * CELL) as u32, (ROWS as i32 * CELL) as u32);
        Rectangle::new(Point::new(FIELD_X, 0), size)
            .into_styled(PrimitiveStyle::with_fill(SKY))
            .draw(&mut self.panel)
            .ok();
        for _ in 0..3 {
            self.spawn();
        }
        self.paint_base(Rgb565::CSS_LIME_GREEN);
    }

    fn move_base(&mut self, direction: Direction) {
        let next = match direction {
            Direction::Left => self.base.saturating_sub(1).max(1),
            Direction::Right => (self.base + 1).min(COLS - 2),
        };
        if next != self.base {
            self.paint_base(SKY);
            self.base = next;
            self.paint_base(Rgb565::CSS_LIME_GREEN);
        }
    }

    fn fire_projectile(&mut self) {
        let shot = Cell {
            col: self.base,
            row: BASE_ROW - 1,
        };
        if let Some(slot) = self.projectiles.iter_mut().find(|p| p.is_none()) {
            *slot = Some(shot);
            self.paint(shot, Rgb565::YELLOW);
            self.collide();
        }
    }

    fn advance_projectiles(&mut self) {
        for p in 0..MAX_PROJECTILES {
            let Some(shot) = self.projectiles[p] else { continue };
            self.paint(shot, SKY);
            self.projectiles[p] = shot.row.checked_sub(1).map(|row| Cell { row, ..shot });
            if let Some(next) = self.projectiles[p] {
                self.paint(next, Rgb565::YELLOW);
            }
        }
        self.collide();
    }

    fn descend_objects(&mut self) {
        for a in 0..MAX_ASTEROIDS {
            let Some(rock) = self.asteroids[a] else { continue };
            self.paint(rock, SKY);
            let next = Cell {
                row: rock.row + 1,
                ..rock
            };
            if next.row > BASE_ROW {
                self.asteroids[a] = None;
            } else {
                self.asteroids[a] = Some(next);
                self.paint(next, Rgb565::CSS_SADDLE_BROWN);
            }
        }
        self.collide();
        self.spawn();
        self.paint_base(Rgb565::CSS_LIME_GREEN);
    }

    fn register_impact(&mut self) {
        for a in 0..MAX_ASTEROIDS {
            let Some(rock) = self.asteroids[a] else { continue };
            if self.on_base(rock) {
                self.asteroids[a] = None;
                self.health = self.health.saturating_sub(1);
                info!("base hit, {} lives left", self.health);
            }
        }
    }

    fn is_round_over(&self) -> bool {
        self.health == 0
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn health(&self) -> u32 {
        self.health
    }
}

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = init();
    let resources = disobey2026_defender::split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 32 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let timing = Timing::DEFAULT;
    let panel: &'static RefCell<Display<'static>> =
        mk_static!(RefCell<Display<'static>>, RefCell::new(resources.display.into()));
    let (buttons, joystick) = controls(resources.buttons, &timing);
    let devices = Devices {
        clock: BoardClock,
        buttons,
        serial: Serial::from(resources.serial),
        joystick,
    };

    let seed = embassy_time::Instant::now().as_ticks() as u32;
    let field = Field::new(SharedDisplay(panel), seed);
    let hud = BadgeHud::new(SharedDisplay(panel), resources.leds, resources.backlight);

    info!("Defender started");
    Session::new(devices, field, hud, timing).run()
}
