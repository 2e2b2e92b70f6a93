//! The round loop.
//!
//! One call to [`Round::step`] is one pass of the cooperative loop:
//!
//! 1. apply a base hit, if any
//! 2. poll input, arbitrate, dispatch at most one command
//! 3. ramp the descent interval from the current score
//! 4. fire periodic actions whose interval has elapsed
//! 5. redraw the score and health fields that changed
//! 6. report whether the round is over
//!
//! The clock is read once at the top of a pass and that snapshot is used for
//! every due-check in the pass.

use crate::{
    arbiter::{
        Arbiter,
        Command,
    },
    clock::{
        Clock,
        Millis,
    },
    config::Timing,
    game::{
        Direction,
        Presentation,
        Simulation,
    },
    input::{
        ButtonSource,
        JoystickSource,
        SerialSource,
    },
    pause,
    scheduler::Schedule,
};

/// Clock and input sources polled by the loop.
pub struct Devices<C, B, S, J> {
    pub clock: C,
    pub buttons: B,
    pub serial: S,
    pub joystick: J,
}

impl<C, B, S, J> Devices<C, B, S, J>
where
    B: ButtonSource,
    S: SerialSource,
{
    /// Drop input that arrived before the round started.
    pub fn clear_inputs(&mut self) {
        self.buttons.clear();
        self.serial.clear();
    }
}

/// Where a round stands between passes.
///
/// A pause never outlives the pass that entered it: [`pause::hold`] blocks
/// until the game resumes, so callers only ever see these two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Running,
    GameOver,
}

/// Everything scoped to one round. Built fresh for each round.
#[derive(Clone, Debug)]
pub struct Round {
    arbiter: Arbiter,
    schedule: Schedule,
    shown_score: Option<u32>,
    shown_health: Option<u32>,
    phase: Phase,
}

impl Round {
    #[must_use]
    pub const fn new(now: Millis, timing: Timing) -> Self {
        Self {
            arbiter: Arbiter::new(),
            schedule: Schedule::new(now, timing),
            shown_score: None,
            shown_health: None,
            phase: Phase::Running,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    #[must_use]
    pub const fn arbiter(&self) -> &Arbiter {
        &self.arbiter
    }

    /// Run one pass of the loop and return the phase it ended in.
    pub fn step<C, B, S, J>(
        &mut self,
        devices: &mut Devices<C, B, S, J>,
        sim: &mut impl Simulation,
        hud: &mut impl Presentation,
    ) -> Phase
    where
        C: Clock,
        B: ButtonSource,
        S: SerialSource,
        J: JoystickSource,
    {
        if self.phase == Phase::GameOver || sim.is_round_over() {
            self.phase = Phase::GameOver;
            return self.phase;
        }

        let now = devices.clock.now();

        sim.register_impact();

        let joystick_due = self.schedule.joystick.fire_if_due(now);
        let command = self
            .arbiter
            .poll(
                &mut devices.buttons,
                &mut devices.serial,
                &mut devices.joystick,
                joystick_due,
            )
            .resolve();
        self.dispatch(command, devices, sim, hud);

        self.schedule.ramp(sim.score());

        if self.schedule.descent.fire_if_due(now) {
            sim.descend_objects();
        }
        if !sim.is_round_over() && self.schedule.projectiles.fire_if_due(now) {
            sim.advance_projectiles();
        }

        self.refresh(sim, hud);

        if sim.is_round_over() {
            self.phase = Phase::GameOver;
        }
        self.phase
    }

    /// Loop until the round is over and return the final score.
    pub fn run<C, B, S, J>(
        &mut self,
        devices: &mut Devices<C, B, S, J>,
        sim: &mut impl Simulation,
        hud: &mut impl Presentation,
    ) -> u32
    where
        C: Clock,
        B: ButtonSource,
        S: SerialSource,
        J: JoystickSource,
    {
        while self.step(devices, sim, hud) != Phase::GameOver {}
        sim.score()
    }

    fn dispatch<C, B, S, J>(
        &mut self,
        command: Command,
        devices: &mut Devices<C, B, S, J>,
        sim: &mut impl Simulation,
        hud: &mut impl Presentation,
    ) where
        B: ButtonSource,
        S: SerialSource,
    {
        match command {
            Command::MoveLeft => sim.move_base(Direction::Left),
            Command::MoveRight => sim.move_base(Direction::Right),
            Command::Fire => sim.fire_projectile(),
            Command::PauseToggle => {
                pause::hold(&mut devices.serial, &mut devices.buttons, hud);
            }
            Command::Ignore | Command::None => {}
        }
    }

    fn refresh(&mut self, sim: &impl Simulation, hud: &mut impl Presentation) {
        let score = sim.score();
        if self.shown_score != Some(score) {
            hud.refresh_score(score);
            self.shown_score = Some(score);
        }

        let health = sim.health();
        if self.shown_health != Some(health) {
            hud.refresh_health(health);
            self.shown_health = Some(health);
        }
    }
}
