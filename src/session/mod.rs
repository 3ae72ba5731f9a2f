//! Per-play state machine
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Host-driven ticks only (no wall clock)
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! One [`GameSession`] lives for the whole app run and is reused across
//! levels; `start` performs the full reset between plays.

pub mod input;
pub mod state;
pub mod tick;
mod timers;

pub use input::InputEvent;
pub use state::{GameSession, Outcome, SessionEvent, Snapshot};
