//! Power-up to power-off: splash, rounds, game-over screens.

use crate::{
    clock::Clock,
    config::Timing,
    game::{
        Presentation,
        Simulation,
    },
    input::{
        Button,
        ButtonSource,
        JoystickSource,
        SerialSource,
    },
    round::{
        Devices,
        Round,
    },
};

/// Owns the devices and collaborators for the lifetime of the firmware.
pub struct Session<C, B, S, J, G, P> {
    devices: Devices<C, B, S, J>,
    sim: G,
    hud: P,
    timing: Timing,
    rounds: u32,
}

impl<C, B, S, J, G, P> Session<C, B, S, J, G, P>
where
    C: Clock,
    B: ButtonSource,
    S: SerialSource,
    J: JoystickSource,
    G: Simulation,
    P: Presentation,
{
    pub fn new(devices: Devices<C, B, S, J>, sim: G, hud: P, timing: Timing) -> Self {
        Self {
            devices,
            sim,
            hud,
            timing,
            rounds: 0,
        }
    }

    pub fn devices(&mut self) -> &mut Devices<C, B, S, J> {
        &mut self.devices
    }

    pub fn simulation(&self) -> &G {
        &self.sim
    }

    pub fn presentation(&self) -> &P {
        &self.hud
    }

    /// Rounds started so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Show the title and wait for any button.
    pub fn splash(&mut self) {
        self.hud.show_splash();
        self.wait_for_press();
    }

    /// Reset everything round-scoped, play until the round is over and
    /// return the final score.
    pub fn play_round(&mut self) -> u32 {
        self.sim.start_round();
        self.hud.show_round_start();
        self.devices.clear_inputs();

        let mut round = Round::new(self.devices.clock.now(), self.timing);
        self.rounds += 1;
        info!("round {} started", self.rounds);

        let score = round.run(&mut self.devices, &mut self.sim, &mut self.hud);
        info!("game over, score {}", score);
        score
    }

    /// Show the final score and wait for a fresh button press.
    pub fn game_over(&mut self, score: u32) {
        self.hud.show_game_over(score);
        self.wait_for_press();
    }

    pub fn run(mut self) -> ! {
        self.splash();
        loop {
            let score = self.play_round();
            self.game_over(score);
        }
    }

    fn wait_for_press(&mut self) -> Button {
        loop {
            if let Some(button) = self.devices.buttons.poll() {
                return button;
            }
        }
    }
}
