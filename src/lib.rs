//! # disobey2026-defender
//!
//! Round controller for an asteroid-defence game on the Disobey 2026 badge.
//!
//! The heart of the crate is a single-threaded, busy-polling loop that
//! merges three input sources with several independently paced actions:
//! - **Input**: push buttons, a serial terminal (plain bytes and `ESC [ X`
//!   cursor keys) and a joystick sampled every 200 ms
//! - **Arbitration**: exactly one [`Command`] per pass, fixed priority
//! - **Scheduling**: projectile advance, object descent (speeding up with
//!   score) and joystick sampling, each on its own interval
//! - **Pause**: a blocking modal wait for the next `p`
//!
//! The playfield and everything that draws it sit behind the [`Simulation`]
//! and [`Presentation`] traits. With the `badge` feature, [`board`] wires the
//! loop to the badge hardware.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let devices = Devices { clock, buttons, serial, joystick };
//! let session = Session::new(devices, simulation, Hud::new(display), Timing::DEFAULT);
//! session.run()
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod arbiter;
pub mod buttons;
pub mod clock;
pub mod config;
pub mod escape;
pub mod game;
pub mod hud;
pub mod input;
pub mod pause;
pub mod round;
pub mod scheduler;
pub mod session;

#[cfg(feature = "badge")]
pub mod board;

pub use arbiter::{
    Arbiter,
    Command,
    Signals,
};
pub use buttons::{
    ButtonBank,
    DpadJoystick,
};
pub use clock::{
    Clock,
    Millis,
    MillisDuration,
};
pub use config::Timing;
pub use escape::{
    Decoded,
    Decoder,
    Key,
};
pub use game::{
    Direction,
    Presentation,
    Simulation,
};
pub use hud::{
    Hud,
    HudLayout,
};
pub use input::{
    Button,
    ButtonSource,
    Joystick,
    JoystickSource,
    SerialSource,
};
pub use round::{
    Devices,
    Phase,
    Round,
};
pub use scheduler::{
    Periodic,
    Schedule,
};
pub use session::Session;
