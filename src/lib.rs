//! Tap Rush - a reaction-training tap game core
//!
//! Core modules:
//! - `catalog`: the fixed 20-level catalog and unlock flags
//! - `session`: the per-play state machine (countdown, input dispatch, scoring)
//! - `progress`: persisted unlock frontier
//! - `settings`: persisted player preferences
//!
//! Everything presentational (views, sound playback, navigation) lives in the
//! host. The host forwards raw input events into [`session::GameSession`],
//! drives its clock with `tick`, and re-renders from the published fields
//! after every call.

pub mod catalog;
pub mod progress;
pub mod session;
pub mod settings;

pub use catalog::{BallColor, LevelCatalog, LevelDefinition, Mechanic, TargetShape};
pub use progress::UnlockState;
pub use session::{GameSession, InputEvent, Outcome, SessionEvent, Snapshot};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of levels in the catalog
    pub const LEVEL_COUNT: u32 = 20;

    /// Countdown granularity (seconds per tick)
    pub const COUNTDOWN_PERIOD: f32 = 1.0;
    /// Moving-target relocation period
    pub const MOVE_PERIOD: f32 = 0.7;
    /// Changing-color redraw period
    pub const RECOLOR_PERIOD: f32 = 0.7;
    /// Rhythm pulse toggle period
    pub const PULSE_PERIOD: f32 = 0.7;
    /// Runaway-ball hop period
    pub const RUNAWAY_PERIOD: f32 = 1.2;
    /// One-shot reveal delay for the wait mechanic
    pub const REVEAL_DELAY: f32 = 1.5;
    /// Fallback visibility toggle period when a level omits its blink interval
    pub const DEFAULT_BLINK_PERIOD: f32 = 0.7;

    /// Visible rect for random target placement
    pub const TARGET_MIN_X: f32 = 60.0;
    pub const TARGET_MAX_X: f32 = 320.0;
    pub const TARGET_MIN_Y: f32 = 120.0;
    pub const TARGET_MAX_Y: f32 = 650.0;

    /// Tighter rect the runaway ball hops within on its own timer
    pub const RUNAWAY_MIN_X: f32 = 100.0;
    pub const RUNAWAY_MAX_X: f32 = 280.0;
    pub const RUNAWAY_MIN_Y: f32 = 200.0;
    pub const RUNAWAY_MAX_Y: f32 = 500.0;

    /// Resting position for the runaway ball and the tilt cursor
    pub const HOME_X: f32 = 180.0;
    pub const HOME_Y: f32 = 400.0;

    /// Ball diameters for the smallest/biggest mechanics, ascending
    pub const BALL_SIZES: [f32; 3] = [30.0, 60.0, 90.0];
    /// Slot count for the multi-simultaneous mechanic
    pub const MULTI_SLOTS: usize = 3;

    /// Minimum drag distance for a swipe to register
    pub const SWIPE_MIN_DISTANCE: f32 = 30.0;
    /// Pinch succeeds outside [PINCH_IN_THRESHOLD, PINCH_OUT_THRESHOLD]
    pub const PINCH_OUT_THRESHOLD: f32 = 1.5;
    pub const PINCH_IN_THRESHOLD: f32 = 0.7;

    /// Levels at or above this id accept color-matched palette taps
    pub const PALETTE_MIN_LEVEL: u32 = 11;
}
