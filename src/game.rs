//! Collaborators driven by the round loop.
//!
//! The playfield itself (objects, base, projectiles) and everything that
//! draws it live behind these traits.

/// Direction the base moves in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Left,
    Right,
}

/// Playfield state and the actions that change it.
pub trait Simulation {
    /// Reset the playfield for a new round.
    fn start_round(&mut self);

    fn move_base(&mut self, direction: Direction);

    fn fire_projectile(&mut self);

    fn advance_projectiles(&mut self);

    /// Spawn new descending objects and move existing ones down one step.
    fn descend_objects(&mut self);

    /// Apply damage if an object reached the base.
    fn register_impact(&mut self);

    fn is_round_over(&self) -> bool;

    fn score(&self) -> u32;

    fn health(&self) -> u32;
}

/// Status output: HUD fields and round banners.
pub trait Presentation {
    fn refresh_score(&mut self, score: u32);

    fn refresh_health(&mut self, health: u32);

    fn show_paused(&mut self);

    fn show_resumed(&mut self);

    /// Title screen shown once at power-up.
    fn show_splash(&mut self) {}

    /// Clear the status area before a new round.
    fn show_round_start(&mut self) {}

    fn show_game_over(&mut self, _score: u32) {}
}

impl<T: Simulation + ?Sized> Simulation for &mut T {
    fn start_round(&mut self) {
        (**self).start_round();
    }

    fn move_base(&mut self, direction: Direction) {
        (**self).move_base(direction);
    }

    fn fire_projectile(&mut self) {
        (**self).fire_projectile();
    }

    fn advance_projectiles(&mut self) {
        (**self).advance_projectiles();
    }

    fn descend_objects(&mut self) {
        (**self).descend_objects();
    }

    fn register_impact(&mut self) {
        (**self).register_impact();
    }

    fn is_round_over(&self) -> bool {
        (**self).is_round_over()
    }

    fn score(&self) -> u32 {
        (**self).score()
    }

    fn health(&self) -> u32 {
        (**self).health()
    }
}

impl<T: Presentation + ?Sized> Presentation for &mut T {
    fn refresh_score(&mut self, score: u32) {
        (**self).refresh_score(score);
    }

    fn refresh_health(&mut self, health: u32) {
        (**self).refresh_health(health);
    }

    fn show_paused(&mut self) {
        (**self).show_paused();
    }

    fn show_resumed(&mut self) {
        (**self).show_resumed();
    }

    fn show_splash(&mut self) {
        (**self).show_splash();
    }

    fn show_round_start(&mut self) {
        (**self).show_round_start();
    }

    fn show_game_over(&mut self, score: u32) {
        (**self).show_game_over(score);
    }
}
