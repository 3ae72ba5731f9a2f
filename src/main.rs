//! Tap Rush entry point - headless demo driver
//!
//! Exercises the public API end to end without a UI: builds the catalog
//! from persisted progress, plays a scripted run of a level, and logs the
//! outcome.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tap_rush::{
        GameSession, InputEvent, LevelCatalog, Outcome, SessionEvent, Settings, UnlockState,
    };

    env_logger::init();

    let settings = Settings::load();
    let unlock = UnlockState::load();
    let catalog = LevelCatalog::build(unlock.count());
    let Some(level) = catalog.last_unlocked().cloned() else {
        log::warn!("Empty catalog, nothing to play");
        return;
    };

    let seed = 0xC0FFEE;
    let mut session = GameSession::new(seed, unlock);
    session.start(level, false);

    // Scripted player: one tap-shaped event per simulated second. The
    // countdown guarantees termination even on gesture-driven levels.
    while session.active {
        session.tick(1.0);
        session.handle_input(InputEvent::Tap { color: None });
        for event in session.take_events() {
            if event == SessionEvent::SuccessCue && settings.sound_enabled {
                log::debug!("(pop)");
            }
        }
    }

    match session.outcome {
        Some(Outcome::Won) => println!(
            "Won with score {} and {}s to spare",
            session.score, session.time_remaining
        ),
        _ => println!("Lost with score {}", session.score),
    }
}

/// The core is platform-neutral but the demo driver is native-only; a wasm
/// host drives the library crate directly.
#[cfg(target_arch = "wasm32")]
fn main() {}
