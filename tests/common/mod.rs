#![allow(dead_code)]

use std::{
    cell::Cell,
    collections::VecDeque,
    rc::Rc,
};

use disobey2026_defender::{
    Button,
    ButtonSource,
    Clock,
    Devices,
    Direction,
    Joystick,
    JoystickSource,
    Millis,
    Presentation,
    SerialSource,
    Simulation,
    clock::millis,
};

#[derive(Clone, Default)]
pub struct FakeClock(Rc<Cell<u64>>);

impl FakeClock {
    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Millis {
        millis(self.0.get())
    }
}

/// One slot per poll; an empty queue means no press.
#[derive(Default)]
pub struct Buttons(pub VecDeque<Option<Button>>);

impl Buttons {
    pub fn press(&mut self, button: Button) {
        self.0.push_back(Some(button));
    }
}

impl ButtonSource for Buttons {
    fn poll(&mut self) -> Option<Button> {
        self.0.pop_front().flatten()
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Bytes in `.0` are waiting now. Bytes in `.1` arrive right after the
/// next `clear`, as if typed once the round had started.
#[derive(Default)]
pub struct Serial(pub VecDeque<u8>, pub VecDeque<u8>);

impl Serial {
    pub fn send(&mut self, bytes: &[u8]) {
        self.0.extend(bytes);
    }

    pub fn send_after_clear(&mut self, bytes: &[u8]) {
        self.1.extend(bytes);
    }
}

impl SerialSource for Serial {
    fn available(&mut self) -> bool {
        !self.0.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        self.0.pop_front().expect("blocking read with nothing scripted")
    }

    fn clear(&mut self) {
        self.0.clear();
        self.0.append(&mut self.1);
    }
}

#[derive(Default)]
pub struct Stick {
    pub position: Joystick,
    pub samples: usize,
}

impl JoystickSource for Stick {
    fn sample(&mut self) -> Joystick {
        self.samples += 1;
        self.position
    }
}

pub type TestDevices = Devices<FakeClock, Buttons, Serial, Stick>;

pub fn devices() -> (FakeClock, TestDevices) {
    let clock = FakeClock::default();
    let devices = Devices {
        clock: clock.clone(),
        buttons: Buttons::default(),
        serial: Serial::default(),
        joystick: Stick::default(),
    };
    (clock, devices)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimCall {
    StartRound,
    Move(Direction),
    Fire,
    AdvanceProjectiles,
    Descend,
    Impact,
}

/// Records every call. Each `register_impact` costs one life while
/// `hits_pending` is non-zero; `start_round` refills it from
/// `hits_per_round`.
#[derive(Default)]
pub struct FakeSim {
    pub calls: Vec<SimCall>,
    pub score: u32,
    pub health: u32,
    pub hits_pending: u32,
    pub hits_per_round: u32,
    pub start_health: u32,
}

impl FakeSim {
    pub fn with_health(health: u32) -> Self {
        Self {
            health,
            start_health: health,
            ..Self::default()
        }
    }

    pub fn take_calls(&mut self) -> Vec<SimCall> {
        std::mem::take(&mut self.calls)
    }

    /// Calls other than the per-iteration impact check.
    pub fn actions(&mut self) -> Vec<SimCall> {
        self.take_calls()
            .into_iter()
            .filter(|c| *c != SimCall::Impact)
            .collect()
    }
}

impl Simulation for FakeSim {
    fn start_round(&mut self) {
        self.calls.push(SimCall::StartRound);
        self.score = 0;
        self.health = self.start_health;
        self.hits_pending = self.hits_per_round;
    }

    fn move_base(&mut self, direction: Direction) {
        self.calls.push(SimCall::Move(direction));
    }

    fn fire_projectile(&mut self) {
        self.calls.push(SimCall::Fire);
    }

    fn advance_projectiles(&mut self) {
        self.calls.push(SimCall::AdvanceProjectiles);
    }

    fn descend_objects(&mut self) {
        self.calls.push(SimCall::Descend);
    }

    fn register_impact(&mut self) {
        self.calls.push(SimCall::Impact);
        if self.hits_pending > 0 {
            self.hits_pending -= 1;
            self.health = self.health.saturating_sub(1);
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

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudCall {
    Score(u32),
    Health(u32),
    Paused,
    Resumed,
    Splash,
    RoundStart,
    GameOver(u32),
}

#[derive(Default)]
pub struct FakeHud(pub Vec<HudCall>);

impl FakeHud {
    pub fn take(&mut self) -> Vec<HudCall> {
        std::mem::take(&mut self.0)
    }
}

impl Presentation for FakeHud {
    fn refresh_score(&mut self, score: u32) {
        self.0.push(HudCall::Score(score));
    }

    fn refresh_health(&mut self, health: u32) {
        self.0.push(HudCall::Health(health));
    }

    fn show_paused(&mut self) {
        self.0.push(HudCall::Paused);
    }

    fn show_resumed(&mut self) {
        self.0.push(HudCall::Resumed);
    }

    fn show_splash(&mut self) {
        self.0.push(HudCall::Splash);
    }

    fn show_round_start(&mut self) {
        self.0.push(HudCall::RoundStart);
    }

    fn show_game_over(&mut self, score: u32) {
        self.0.push(HudCall::GameOver(score));
    }
}
