//! Session clock
//!
//! The host drives `tick` from the same serial context that delivers input
//! events, so a timer firing and a tap handler never race; both are ordinary
//! sequential calls. Within one `tick`, each firing runs to completion
//! before the next is processed.

use crate::catalog::{BallColor, Mechanic};
use crate::consts::*;

use super::state::GameSession;

/// Colors the changing-color ball cycles through
const CHANGING_COLORS: [BallColor; 4] = [
    BallColor::Pink,
    BallColor::Gray,
    BallColor::Yellow,
    BallColor::Blue,
];

impl GameSession {
    /// Advance session time by `dt` seconds.
    ///
    /// No-op while paused or after `end`; paused spans do not count toward
    /// the countdown, periodic toggles, or hold durations.
    pub fn tick(&mut self, dt: f32) {
        if !self.active || self.paused {
            return;
        }
        self.elapsed += dt;

        let relocations = self.timers.relocate.as_mut().map_or(0, |t| t.advance(dt));
        for _ in 0..relocations {
            self.relocate_target();
        }

        let toggles = self.timers.toggle.as_mut().map_or(0, |t| t.advance(dt));
        if toggles % 2 == 1 {
            match self.effective_mechanic() {
                Mechanic::Disappearing => self.target_visible = !self.target_visible,
                Mechanic::Blink => self.blink_visible = !self.blink_visible,
                Mechanic::Flash => self.flash_visible = !self.flash_visible,
                _ => {}
            }
        }

        let recolors = self.timers.recolor.as_mut().map_or(0, |t| t.advance(dt));
        for _ in 0..recolors {
            self.redraw_displayed_color();
        }

        let pulses = self.timers.pulse.as_mut().map_or(0, |t| t.advance(dt));
        if pulses % 2 == 1 {
            self.rhythm_pulse = !self.rhythm_pulse;
        }

        let hops = self.timers.runaway.as_mut().map_or(0, |t| t.advance(dt));
        for _ in 0..hops {
            self.hop_runaway();
        }

        if self.timers.reveal.as_mut().is_some_and(|t| t.advance(dt)) {
            self.wait_visible = true;
        }

        // Countdown last; reaching zero ends the round with the current
        // score. `end` cancels the countdown, so stop once inactive.
        let seconds = self.timers.countdown.as_mut().map_or(0, |t| t.advance(dt));
        for _ in 0..seconds {
            if !self.active {
                break;
            }
            self.time_remaining = self.time_remaining.saturating_sub(1);
            if self.time_remaining == 0 {
                self.end();
            }
        }
    }

    /// New displayed color for the changing-color ball.
    fn redraw_displayed_color(&mut self) {
        use rand::seq::IndexedRandom;
        self.displayed_color = *CHANGING_COLORS
            .choose(&mut self.rng)
            .unwrap_or(&BallColor::Gray);
    }

    /// Runaway ball hops inside its tighter rect on the periodic timer.
    fn hop_runaway(&mut self) {
        use rand::Rng;
        self.runaway_pos = glam::Vec2::new(
            self.rng.random_range(RUNAWAY_MIN_X..=RUNAWAY_MAX_X),
            self.rng.random_range(RUNAWAY_MIN_Y..=RUNAWAY_MAX_Y),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LevelCatalog;
    use crate::progress::UnlockState;
    use crate::session::state::Outcome;

    fn running(id: u32) -> GameSession {
        let mut s = GameSession::new(42, UnlockState::new(20));
        s.start(LevelCatalog::build(20).get(id).cloned().unwrap(), false);
        s
    }

    #[test]
    fn test_countdown_reaching_zero_ends_lost() {
        // Level 1: 30 second limit
        let mut s = running(1);
        for _ in 0..29 {
            s.tick(1.0);
        }
        assert!(s.active);
        assert_eq!(s.time_remaining, 1);
        s.tick(1.0);
        assert!(!s.active);
        assert_eq!(s.time_remaining, 0);
        assert_eq!(s.outcome, Some(Outcome::Lost));
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_tick_is_a_no_op_while_paused() {
        let mut s = running(1);
        s.pause();
        let before = s.snapshot();
        s.tick(10.0);
        assert_eq!(s.snapshot(), before);
        assert_eq!(s.time_remaining, 30);
    }

    #[test]
    fn test_tick_after_end_mutates_nothing() {
        let mut s = running(1);
        s.end();
        let before = s.snapshot();
        s.tick(100.0);
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_moving_target_relocates_on_schedule() {
        let mut s = running(2);
        let initial = s.target_pos;
        s.tick(0.5);
        assert_eq!(s.target_pos, initial);
        s.tick(0.3);
        assert_ne!(s.target_pos, initial);
    }

    #[test]
    fn test_blink_visibility_toggles() {
        // Level 19: blink interval 0.4s
        let mut s = running(19);
        assert!(s.blink_visible);
        s.tick(0.4);
        assert!(!s.blink_visible);
        s.tick(0.4);
        assert!(s.blink_visible);
        // Two intervals in one tick cancel out
        s.tick(0.8);
        assert!(s.blink_visible);
    }

    #[test]
    fn test_disappearing_toggles_target_visibility() {
        // Level 3: 0.7s toggle
        let mut s = running(3);
        assert!(s.target_visible);
        s.tick(0.7);
        assert!(!s.target_visible);
        s.tick(0.7);
        assert!(s.target_visible);
    }

    #[test]
    fn test_wait_reveal_fires_exactly_once() {
        let mut s = running(7);
        assert!(!s.wait_visible);
        s.tick(1.0);
        assert!(!s.wait_visible);
        s.tick(0.5);
        assert!(s.wait_visible);
        // Still visible, not re-toggled, after further time
        s.tick(3.0);
        assert!(s.wait_visible);
    }

    #[test]
    fn test_rhythm_pulse_toggles() {
        let mut s = running(6);
        assert!(!s.rhythm_pulse);
        s.tick(0.7);
        assert!(s.rhythm_pulse);
        s.tick(0.7);
        assert!(!s.rhythm_pulse);
    }

    #[test]
    fn test_runaway_hops_on_schedule() {
        let mut s = running(5);
        let home = s.runaway_pos;
        s.tick(1.0);
        assert_eq!(s.runaway_pos, home);
        s.tick(0.2);
        assert_ne!(s.runaway_pos, home);
        let hopped = s.runaway_pos;
        assert!((RUNAWAY_MIN_X..=RUNAWAY_MAX_X).contains(&hopped.x));
        assert!((RUNAWAY_MIN_Y..=RUNAWAY_MAX_Y).contains(&hopped.y));
    }

    #[test]
    fn test_changing_color_redraws_from_cycle() {
        let mut s = running(12);
        s.tick(0.7);
        assert!(CHANGING_COLORS.contains(&s.displayed_color));
    }

    #[test]
    fn test_pause_freezes_mechanic_timers() {
        let mut s = running(19);
        s.pause();
        s.tick(5.0);
        assert!(s.blink_visible);
        s.resume();
        s.tick(0.4);
        assert!(!s.blink_visible);
    }

    #[test]
    fn test_stale_timers_never_fire_into_a_new_level() {
        // Run a blink level almost to a toggle, then restart into a static
        // level; the old toggle must not fire.
        let mut s = running(19);
        s.tick(0.39);
        s.start(LevelCatalog::build(20).get(1).cloned().unwrap(), false);
        s.tick(0.01);
        assert!(s.blink_visible);
        assert_eq!(s.time_remaining, 30);
    }
}
