mod common;

use common::{
    Buttons,
    FakeClock,
    FakeHud,
    FakeSim,
    HudCall,
    Serial,
    SimCall,
    Stick,
    devices,
};
use disobey2026_defender::{
    Button,
    Direction,
    Session,
    Timing,
    escape::ESC,
};

type TestSession = Session<FakeClock, Buttons, Serial, Stick, FakeSim, FakeHud>;

fn session(health: u32, hits_per_round: u32) -> TestSession {
    let (_clock, devices) = devices();
    let sim = FakeSim {
        hits_per_round,
        ..FakeSim::with_health(health)
    };
    Session::new(devices, sim, FakeHud::default(), Timing::DEFAULT)
}

#[test]
fn splash_waits_for_a_button() {
    let mut session = session(3, 3);
    session.devices().buttons.0.extend([None, None, Some(Button::B1)]);

    session.splash();

    assert_eq!(session.presentation().0, [HudCall::Splash]);
    assert!(session.devices().buttons.0.is_empty());
}

#[test]
fn input_queued_before_the_round_is_dropped() {
    let mut session = session(2, 2);
    session.devices().buttons.press(Button::B2);
    session.devices().serial.send(b"LLL ");

    let score = session.play_round();

    assert_eq!(score, 0);
    assert_eq!(
        session.simulation().calls,
        [SimCall::StartRound, SimCall::Impact, SimCall::Impact]
    );
    assert_eq!(
        session.presentation().0,
        [
            HudCall::RoundStart,
            HudCall::Score(0),
            HudCall::Health(1),
            HudCall::Health(0),
        ]
    );
    assert!(session.devices().serial.0.is_empty());
}

#[test]
fn game_over_shows_the_score_and_waits() {
    let mut session = session(1, 1);
    session.devices().buttons.0.extend([None, Some(Button::B0)]);

    session.game_over(42);

    assert_eq!(session.presentation().0, [HudCall::GameOver(42)]);
    assert!(session.devices().buttons.0.is_empty());
}

#[test]
fn every_round_starts_with_a_full_redraw() {
    let mut session = session(1, 1);

    session.play_round();
    session.devices().buttons.press(Button::B3);
    session.game_over(0);
    session.play_round();

    assert_eq!(session.rounds(), 2);
    assert_eq!(
        session.presentation().0,
        [
            HudCall::RoundStart,
            HudCall::Score(0),
            HudCall::Health(0),
            HudCall::GameOver(0),
            HudCall::RoundStart,
            HudCall::Score(0),
            HudCall::Health(0),
        ]
    );
}

#[test]
fn new_round_starts_with_a_fresh_decoder() {
    let mut session = session(2, 2);

    // Round one ends half way through a cursor-key sequence.
    session.devices().serial.send_after_clear(&[ESC, b'[']);
    session.play_round();
    assert!(session.devices().serial.0.is_empty());

    session.devices().buttons.press(Button::B0);
    session.game_over(0);

    // `D` would finish a cursor-left; in a new round it is a plain byte.
    session.devices().serial.send_after_clear(b"Dl");
    session.play_round();

    assert_eq!(
        session.simulation().calls,
        [
            SimCall::StartRound,
            SimCall::Impact,
            SimCall::Impact,
            SimCall::StartRound,
            SimCall::Impact,
            SimCall::Impact,
            SimCall::Move(Direction::Left),
        ]
    );
}
