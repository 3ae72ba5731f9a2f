//! Session state and lifecycle
//!
//! One mutable [`GameSession`] per app run. `start` is the only entry into
//! the running state and always performs a full reset, which makes restart
//! and level-skip degenerate cases of the same transition.

use glam::Vec2;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::timers::{OneShot, Repeating, Timers};
use crate::catalog::{BallColor, LevelCatalog, LevelDefinition, Mechanic};
use crate::consts::*;
use crate::progress::UnlockState;

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Outbound notifications, drained by the host after every mutating call.
///
/// `SuccessCue` is the request to play the success sound; whether it is
/// audible is the host's call (`Settings::sound_enabled`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SuccessCue,
    Ended { outcome: Outcome },
    FrontierAdvanced { unlocked: u32 },
}

/// Read-only copy of every published field, available after any mutating
/// call. The host re-renders from this; tests compare them.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub level_id: Option<u32>,
    pub score: u32,
    pub time_remaining: u32,
    pub active: bool,
    pub paused: bool,
    pub outcome: Option<Outcome>,
    pub target_pos: Vec2,
    pub target_visible: bool,
    pub target_color: BallColor,
    pub sequence_cursor: usize,
    pub holding: bool,
    pub blink_visible: bool,
    pub flash_visible: bool,
    pub displayed_color: BallColor,
    pub runaway_pos: Vec2,
    pub rhythm_pulse: bool,
    pub wait_visible: bool,
    pub multi_active: [bool; MULTI_SLOTS],
    pub tilt_pos: Vec2,
    pub pinch_scale: f32,
}

/// The per-play state machine.
///
/// Exactly one mechanic's transient fields are live at a time, selected by
/// the active level's mechanic (or, for super-mix, by the sub-mechanic drawn
/// once at `start`). The rest sit at their reset defaults.
pub struct GameSession {
    /// Set on start, kept after the round for end-screen display
    pub active_level: Option<LevelDefinition>,
    pub score: u32,
    pub time_remaining: u32,
    pub active: bool,
    pub paused: bool,
    /// `Some` once the round has ended; ties favor a win
    pub outcome: Option<Outcome>,

    // Mechanic-scoped transient state
    pub target_pos: Vec2,
    pub target_visible: bool,
    pub color_choices: Vec<BallColor>,
    pub target_color: BallColor,
    pub sequence_cursor: usize,
    pub holding: bool,
    pub hold_started_at: Option<f32>,
    pub blink_visible: bool,
    pub flash_visible: bool,
    pub displayed_color: BallColor,
    /// Ascending; smallest mechanic wants index 0, biggest the last
    pub ball_sizes: [f32; 3],
    pub runaway_pos: Vec2,
    pub rhythm_pulse: bool,
    pub wait_visible: bool,
    pub multi_active: [bool; MULTI_SLOTS],
    pub tilt_pos: Vec2,
    pub pinch_scale: f32,
    /// Super-mix delegate, drawn once per start and never re-chosen
    pub sub_mechanic: Mechanic,

    /// Unpaused seconds since start; the hold mechanic measures against this
    pub(super) elapsed: f32,
    pub(super) timers: Timers,
    pub(super) rng: Pcg32,
    unlock: UnlockState,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Create an idle session. `seed` drives every random draw the session
    /// makes (target placement, color draws, super-mix choice).
    pub fn new(seed: u64, unlock: UnlockState) -> Self {
        Self {
            active_level: None,
            score: 0,
            time_remaining: 0,
            active: false,
            paused: false,
            outcome: None,
            target_pos: Vec2::ZERO,
            target_visible: true,
            color_choices: vec![BallColor::Red, BallColor::Green, BallColor::Blue],
            target_color: BallColor::Red,
            sequence_cursor: 0,
            holding: false,
            hold_started_at: None,
            blink_visible: true,
            flash_visible: true,
            displayed_color: BallColor::Gray,
            ball_sizes: BALL_SIZES,
            runaway_pos: Vec2::new(HOME_X, HOME_Y),
            rhythm_pulse: false,
            wait_visible: false,
            multi_active: [true; MULTI_SLOTS],
            tilt_pos: Vec2::new(HOME_X, HOME_Y),
            pinch_scale: 1.0,
            sub_mechanic: Mechanic::Static,
            elapsed: 0.0,
            timers: Timers::default(),
            rng: Pcg32::seed_from_u64(seed),
            unlock,
            events: Vec::new(),
        }
    }

    /// Start a level. Legal from any state; a running or ended round is
    /// aborted by the reset. Every previously armed timer is cancelled
    /// before new ones are armed.
    pub fn start(&mut self, level: LevelDefinition, begin_paused: bool) {
        self.timers.cancel_all();
        self.events.clear();

        self.score = 0;
        self.time_remaining = level.time_limit_secs;
        self.active = true;
        self.paused = begin_paused;
        self.outcome = None;
        self.elapsed = 0.0;

        self.target_visible = true;
        self.color_choices = vec![BallColor::Red, BallColor::Green, BallColor::Blue];
        self.target_color = level.target_color.unwrap_or(BallColor::Red);
        self.sequence_cursor = 0;
        self.holding = false;
        self.hold_started_at = None;
        self.blink_visible = true;
        self.flash_visible = true;
        self.displayed_color = BallColor::Gray;
        self.ball_sizes = BALL_SIZES;
        self.runaway_pos = Vec2::new(HOME_X, HOME_Y);
        self.rhythm_pulse = false;
        self.wait_visible = false;
        self.multi_active = [true; MULTI_SLOTS];
        self.tilt_pos = Vec2::new(HOME_X, HOME_Y);
        self.pinch_scale = 1.0;

        self.sub_mechanic = if level.mechanic == Mechanic::SuperMix {
            *Mechanic::DELEGATES
                .choose(&mut self.rng)
                .unwrap_or(&Mechanic::Static)
        } else {
            level.mechanic
        };

        self.arm_mechanic(&level);
        self.relocate_target();
        self.timers.countdown = Some(Repeating::new(COUNTDOWN_PERIOD));

        log::info!(
            "Level {} started ({:?}, {} hits in {}s)",
            level.id,
            level.mechanic,
            level.required_hits,
            level.time_limit_secs
        );
        self.active_level = Some(level);
    }

    /// Arm the periodic work and color setup for the effective mechanic.
    fn arm_mechanic(&mut self, level: &LevelDefinition) {
        let blink = level.blink_interval_secs.unwrap_or(DEFAULT_BLINK_PERIOD);
        match self.sub_mechanic {
            Mechanic::Static => {
                self.color_choices = vec![BallColor::Red];
                self.target_color = BallColor::Red;
            }
            Mechanic::Moving => {
                self.timers.relocate = Some(Repeating::new(MOVE_PERIOD));
            }
            Mechanic::Disappearing | Mechanic::Blink | Mechanic::Flash => {
                self.timers.toggle = Some(Repeating::new(blink));
            }
            Mechanic::ColorPick => {
                self.color_choices = vec![
                    BallColor::Red,
                    BallColor::Green,
                    BallColor::Blue,
                    BallColor::Yellow,
                ];
                self.target_color = level.target_color.unwrap_or(BallColor::Yellow);
            }
            Mechanic::AvoidColor => {
                self.color_choices = vec![
                    BallColor::Red,
                    BallColor::Green,
                    BallColor::Blue,
                    BallColor::Black,
                ];
                self.redraw_target_color();
            }
            Mechanic::ChangingColor => {
                self.timers.recolor = Some(Repeating::new(RECOLOR_PERIOD));
            }
            Mechanic::Runaway => {
                self.timers.runaway = Some(Repeating::new(RUNAWAY_PERIOD));
            }
            Mechanic::Rhythm => {
                self.timers.pulse = Some(Repeating::new(PULSE_PERIOD));
            }
            Mechanic::Wait => {
                self.timers.reveal = Some(OneShot::new(REVEAL_DELAY));
            }
            _ => {}
        }
    }

    /// Pause input dispatch and all timers. Only meaningful while running.
    pub fn pause(&mut self) {
        if self.active {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.active {
            self.paused = false;
        }
    }

    /// End the round, freezing score and clock for display. Idempotent; a
    /// second call changes nothing. Ties favor a win. Winning the frontier
    /// level advances the unlock count by exactly one.
    pub fn end(&mut self) {
        if !self.active {
            return;
        }
        let Some(level) = &self.active_level else {
            return;
        };

        let outcome = if self.score >= level.required_hits {
            Outcome::Won
        } else {
            Outcome::Lost
        };
        self.active = false;
        self.outcome = Some(outcome);
        self.timers.cancel_all();

        if outcome == Outcome::Won && level.id == self.unlock.count() && self.unlock.advance() {
            self.events.push(SessionEvent::FrontierAdvanced {
                unlocked: self.unlock.count(),
            });
        }
        self.events.push(SessionEvent::Ended { outcome });
        log::info!(
            "Level {} ended: {:?} with score {} and {}s left",
            level.id,
            outcome,
            self.score,
            self.time_remaining
        );
    }

    /// Restart the active level from scratch.
    pub fn retry(&mut self) {
        if let Some(level) = self.active_level.clone() {
            self.start(level, false);
        }
    }

    /// Start the level after the active one. Returns false, leaving the
    /// session untouched, when there is no next level to advance to.
    pub fn advance_to_next_level(&mut self, catalog: &LevelCatalog) -> bool {
        let Some(current) = &self.active_level else {
            return false;
        };
        let Some(next) = catalog.get(current.id + 1) else {
            return false;
        };
        self.start(next.clone(), false);
        true
    }

    /// Current unlock frontier (for rebuilding the catalog after a win).
    pub fn unlock_state(&self) -> &UnlockState {
        &self.unlock
    }

    /// Drain pending outbound events.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// The mechanic input is dispatched against: the level's own, or the
    /// session-fixed delegate for super-mix.
    pub fn effective_mechanic(&self) -> Mechanic {
        match self.active_level.as_ref().map(|l| l.mechanic) {
            Some(Mechanic::SuperMix) | None => self.sub_mechanic,
            Some(mechanic) => mechanic,
        }
    }

    /// Copy of the published fields.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            level_id: self.active_level.as_ref().map(|l| l.id),
            score: self.score,
            time_remaining: self.time_remaining,
            active: self.active,
            paused: self.paused,
            outcome: self.outcome,
            target_pos: self.target_pos,
            target_visible: self.target_visible,
            target_color: self.target_color,
            sequence_cursor: self.sequence_cursor,
            holding: self.holding,
            blink_visible: self.blink_visible,
            flash_visible: self.flash_visible,
            displayed_color: self.displayed_color,
            runaway_pos: self.runaway_pos,
            rhythm_pulse: self.rhythm_pulse,
            wait_visible: self.wait_visible,
            multi_active: self.multi_active,
            tilt_pos: self.tilt_pos,
            pinch_scale: self.pinch_scale,
        }
    }

    /// Move the primary target to a uniform-random point in the visible rect.
    pub(super) fn relocate_target(&mut self) {
        use rand::Rng;
        self.target_pos = Vec2::new(
            self.rng.random_range(TARGET_MIN_X..=TARGET_MAX_X),
            self.rng.random_range(TARGET_MIN_Y..=TARGET_MAX_Y),
        );
    }

    /// Draw a new target color from the current choices.
    pub(super) fn redraw_target_color(&mut self) {
        self.target_color = *self
            .color_choices
            .choose(&mut self.rng)
            .unwrap_or(&BallColor::Red);
    }

    /// Success cue plus one point. Callers apply any mechanic-specific
    /// follow-up state, then call `check_win`.
    pub(super) fn register_hit(&mut self) {
        self.events.push(SessionEvent::SuccessCue);
        self.score += 1;
    }

    /// End the round immediately once the score target is reached
    /// (mid-tick, not deferred to the next countdown tick).
    pub(super) fn check_win(&mut self) {
        let reached = self
            .active_level
            .as_ref()
            .is_some_and(|level| self.score >= level.required_hits);
        if reached {
            self.end();
        }
    }
}
