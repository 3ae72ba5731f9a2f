//! Cross-module session flows: full rounds against the real catalog,
//! unlock progression, determinism, and the input-guard properties.

use proptest::prelude::*;

use tap_rush::{
    BallColor, GameSession, InputEvent, LevelCatalog, LevelDefinition, Outcome, SessionEvent,
    TargetShape, UnlockState,
};

fn level(id: u32) -> LevelDefinition {
    LevelCatalog::build(20).get(id).cloned().expect("catalog level")
}

fn tap() -> InputEvent {
    InputEvent::Tap { color: None }
}

#[test]
fn level_one_won_with_five_taps_before_timeout() {
    let mut session = GameSession::new(1, UnlockState::new(1));
    session.start(level(1), false);

    for _ in 0..5 {
        session.tick(1.0);
        session.handle_input(tap());
    }

    assert_eq!(session.outcome, Some(Outcome::Won));
    assert_eq!(session.score, 5);
    assert_eq!(session.time_remaining, 25);
    assert!(!session.active);
}

#[test]
fn level_one_lost_after_thirty_idle_ticks() {
    let mut session = GameSession::new(1, UnlockState::new(1));
    session.start(level(1), false);

    for _ in 0..30 {
        session.tick(1.0);
    }

    assert_eq!(session.outcome, Some(Outcome::Lost));
    assert_eq!(session.score, 0);
    assert_eq!(session.time_remaining, 0);
}

#[test]
fn winning_the_frontier_unlocks_and_advances() {
    let catalog = LevelCatalog::build(1);
    let mut session = GameSession::new(9, UnlockState::new(1));
    session.start(catalog.last_unlocked().cloned().expect("level 1"), false);

    for _ in 0..5 {
        session.handle_input(tap());
    }
    assert_eq!(session.outcome, Some(Outcome::Won));
    assert_eq!(session.unlock_state().count(), 2);

    let events = session.take_events();
    assert!(events.contains(&SessionEvent::FrontierAdvanced { unlocked: 2 }));
    assert!(events.contains(&SessionEvent::Ended {
        outcome: Outcome::Won
    }));

    // Rebuild the catalog from the new count and move on to level 2
    let catalog = LevelCatalog::build(session.unlock_state().count());
    assert!(session.advance_to_next_level(&catalog));
    assert_eq!(session.active_level.as_ref().map(|l| l.id), Some(2));

    // Level 2 is the moving blue ball: seven blue taps win it
    for _ in 0..7 {
        session.handle_input(InputEvent::Tap {
            color: Some(BallColor::Blue),
        });
    }
    assert_eq!(session.outcome, Some(Outcome::Won));
    assert_eq!(session.unlock_state().count(), 3);
}

#[test]
fn replaying_an_old_level_never_re_advances() {
    let mut session = GameSession::new(9, UnlockState::new(5));
    session.start(level(3), false);
    // Level 3 disappears on a 0.7s toggle; tap while visible
    for _ in 0..8 {
        session.handle_input(InputEvent::Tap {
            color: Some(BallColor::Green),
        });
    }
    assert_eq!(session.outcome, Some(Outcome::Won));
    assert_eq!(session.unlock_state().count(), 5);
}

#[test]
fn no_next_level_past_the_catalog_end() {
    let catalog = LevelCatalog::build(20);
    let mut session = GameSession::new(1, UnlockState::new(20));
    session.start(level(20), false);
    session.end();
    assert!(!session.advance_to_next_level(&catalog));
    // Session still shows the final round for the end screen
    assert_eq!(session.active_level.as_ref().map(|l| l.id), Some(20));
}

#[test]
fn retry_after_a_loss_starts_fresh() {
    let mut session = GameSession::new(1, UnlockState::new(1));
    session.start(level(16), false);
    session.handle_input(InputEvent::Digit(1));
    session.handle_input(InputEvent::Digit(2));
    for _ in 0..20 {
        session.tick(1.0);
    }
    assert_eq!(session.outcome, Some(Outcome::Lost));

    session.retry();
    assert!(session.active);
    assert!(session.outcome.is_none());
    assert_eq!(session.score, 0);
    assert_eq!(session.time_remaining, 20);
    assert_eq!(session.snapshot().sequence_cursor, 0);
}

#[test]
fn equal_seeds_and_scripts_publish_equal_state() {
    let mut a = GameSession::new(31337, UnlockState::new(20));
    let mut b = GameSession::new(31337, UnlockState::new(20));

    for session in [&mut a, &mut b] {
        session.start(level(2), false);
        session.tick(0.7);
        session.handle_input(InputEvent::Tap {
            color: Some(BallColor::Blue),
        });
        session.tick(1.4);
        session.handle_input(tap());
    }

    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn countdown_survives_pause_resume_cycles() {
    let mut session = GameSession::new(1, UnlockState::new(1));
    session.start(level(4), false); // 15 second flash level

    session.tick(1.0);
    session.pause();
    session.tick(60.0);
    session.resume();
    session.tick(1.0);
    assert_eq!(session.time_remaining, 13);
    assert!(session.active);
}

fn arb_color() -> impl Strategy<Value = BallColor> {
    prop::sample::select(vec![
        BallColor::Red,
        BallColor::Blue,
        BallColor::Green,
        BallColor::Yellow,
        BallColor::Black,
        BallColor::Purple,
        BallColor::Orange,
        BallColor::Cyan,
        BallColor::Mint,
        BallColor::Pink,
        BallColor::Gray,
    ])
}

fn arb_event() -> impl Strategy<Value = InputEvent> {
    prop::strategy::Union::new(vec![
        prop::option::of(arb_color())
            .prop_map(|color| InputEvent::Tap { color })
            .boxed(),
        arb_color()
            .prop_map(|color| InputEvent::PaletteTap { color })
            .boxed(),
        (0u8..10).prop_map(InputEvent::Digit).boxed(),
        (0u8..5).prop_map(|count| InputEvent::Pair { count }).boxed(),
        Just(InputEvent::HoldBegin).boxed(),
        Just(InputEvent::HoldEnd).boxed(),
        (0usize..4)
            .prop_map(|index| InputEvent::SizedBall { index })
            .boxed(),
        prop::sample::select(vec![
            TargetShape::Circle,
            TargetShape::Square,
            TargetShape::Triangle,
            TargetShape::Star,
        ])
        .prop_map(|shape| InputEvent::ShapeTap { shape })
        .boxed(),
        (0usize..4).prop_map(|index| InputEvent::Slot { index }).boxed(),
        (0.0f32..200.0)
            .prop_map(|distance| InputEvent::Swipe { distance })
            .boxed(),
        (-10.0f32..10.0, -10.0f32..10.0)
            .prop_map(|(dx, dy)| InputEvent::TiltDelta { dx, dy })
            .boxed(),
        (0.1f32..3.0).prop_map(|scale| InputEvent::Pinch { scale }).boxed(),
    ])
}

proptest! {
    /// No input of any shape mutates a paused session.
    #[test]
    fn input_is_inert_while_paused(
        events in prop::collection::vec(arb_event(), 1..32),
        id in 1u32..=20,
    ) {
        let mut session = GameSession::new(7, UnlockState::new(20));
        session.start(level(id), true);
        let before = session.snapshot();
        for event in events {
            session.handle_input(event);
        }
        prop_assert_eq!(session.snapshot(), before);
    }

    /// No input of any shape mutates an ended session.
    #[test]
    fn input_is_inert_after_end(
        events in prop::collection::vec(arb_event(), 1..32),
        id in 1u32..=20,
    ) {
        let mut session = GameSession::new(7, UnlockState::new(20));
        session.start(level(id), false);
        session.end();
        let before = session.snapshot();
        for event in events {
            session.handle_input(event);
        }
        prop_assert_eq!(session.snapshot(), before);
    }

    /// The clock is frozen while paused, whatever the level.
    #[test]
    fn tick_is_inert_while_paused(
        dt in 0.0f32..120.0,
        id in 1u32..=20,
    ) {
        let mut session = GameSession::new(7, UnlockState::new(20));
        session.start(level(id), true);
        let before = session.snapshot();
        session.tick(dt);
        prop_assert_eq!(session.snapshot(), before);
    }
}
