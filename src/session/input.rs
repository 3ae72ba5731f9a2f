//! Input dispatch
//!
//! One entry point, [`GameSession::handle_input`], routes every raw gesture
//! to the handler for the effective mechanic. All handlers share the same
//! guard: nothing happens unless the session is running, unpaused, and has
//! an active level. A mismatched event for the current mechanic is a silent
//! no-op.

use glam::Vec2;

use crate::catalog::{BallColor, Mechanic, TargetShape};
use crate::consts::*;

use super::state::GameSession;

/// Raw input forwarded by the host. Variants carry exactly what the gesture
/// recognizer knows; matching them against the level's mechanic is the
/// session's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Direct tap on the primary target. `color` is the tapped ball's color
    /// where the layout shows several; `None` means the single main target.
    Tap { color: Option<BallColor> },
    /// Color-matched tap on the palette row (levels 11 and up only).
    PaletteTap { color: BallColor },
    /// Tap on a numbered ball (sequence mechanic).
    Digit(u8),
    /// Simultaneous multi-touch selection of `count` balls.
    Pair { count: u8 },
    /// Press began on the hold target.
    HoldBegin,
    /// Press released on the hold target.
    HoldEnd,
    /// Tap on one of the size-sorted balls.
    SizedBall { index: usize },
    /// Tap on a shape.
    ShapeTap { shape: TargetShape },
    /// Tap on one of the multi-simultaneous slots.
    Slot { index: usize },
    /// Completed drag gesture of the given length.
    Swipe { distance: f32 },
    /// Accumulated device-orientation delta.
    TiltDelta { dx: f32, dy: f32 },
    /// Pinch gesture at the given scale.
    Pinch { scale: f32 },
}

impl GameSession {
    /// Route one input event through the effective mechanic's handler.
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.active || self.paused || self.active_level.is_none() {
            return;
        }

        // Palette taps bypass mechanic branching entirely; they are their
        // own mode, gated on the level id.
        if let InputEvent::PaletteTap { color } = event {
            self.on_palette_tap(color);
            return;
        }

        match self.effective_mechanic() {
            Mechanic::Static | Mechanic::Moving | Mechanic::Disappearing => {
                self.on_target_tap(event)
            }
            Mechanic::ColorPick => self.on_color_pick(event),
            Mechanic::AvoidColor => self.on_avoid_color(event),
            Mechanic::Sequence => self.on_sequence(event),
            Mechanic::Pair => self.on_pair(event),
            Mechanic::Hold => self.on_hold(event),
            Mechanic::Blink => self.on_blink(event),
            Mechanic::Smallest => self.on_smallest(event),
            Mechanic::Biggest => self.on_biggest(event),
            Mechanic::ChangingColor => self.on_changing_color(event),
            Mechanic::Shape => self.on_shape(event),
            Mechanic::Flash => self.on_flash(event),
            Mechanic::Runaway => self.on_runaway(event),
            Mechanic::Rhythm => self.on_rhythm(event),
            Mechanic::Wait => self.on_wait(event),
            Mechanic::MultiSimultaneous => self.on_multi(event),
            Mechanic::Swipe => self.on_swipe(event),
            Mechanic::Tilt => self.on_tilt(event),
            Mechanic::Pinch => self.on_pinch(event),
            // Unreachable: effective_mechanic substitutes the delegate
            Mechanic::SuperMix => {}
        }
    }

    /// Static/moving/disappearing share one rule: the tapped color must
    /// match the mechanic's fixed expected color (a colorless tap on the
    /// main target also counts), and a disappearing target must currently
    /// be visible.
    fn on_target_tap(&mut self, event: InputEvent) {
        let InputEvent::Tap { color } = event else {
            return;
        };
        let mechanic = self.effective_mechanic();
        let expected = match mechanic {
            Mechanic::Static => BallColor::Red,
            Mechanic::Moving => BallColor::Blue,
            _ => BallColor::Green,
        };
        if !color.map_or(true, |c| c == expected) {
            return;
        }
        if mechanic == Mechanic::Disappearing && !self.target_visible {
            return;
        }
        self.register_hit();
        self.relocate_target();
        self.check_win();
    }

    fn on_color_pick(&mut self, event: InputEvent) {
        let InputEvent::Tap { color: Some(color) } = event else {
            return;
        };
        if color == self.target_color {
            self.register_hit();
            self.redraw_target_color();
            self.check_win();
        }
    }

    /// Tapping the forbidden color is a harsh penalty: the whole score
    /// resets, not just a missed point.
    fn on_avoid_color(&mut self, event: InputEvent) {
        let InputEvent::Tap { color: Some(color) } = event else {
            return;
        };
        let avoid = self.active_level.as_ref().and_then(|l| l.avoid_color);
        if avoid == Some(color) {
            self.score = 0;
        } else {
            self.register_hit();
            self.check_win();
        }
    }

    /// Any mismatch resets both score and cursor to the start.
    fn on_sequence(&mut self, event: InputEvent) {
        let InputEvent::Digit(digit) = event else {
            return;
        };
        let Some(sequence) = self.active_level.as_ref().and_then(|l| l.sequence) else {
            return;
        };
        if sequence.get(self.sequence_cursor) == Some(&digit) {
            self.sequence_cursor += 1;
            self.register_hit();
            self.check_win();
        } else {
            self.score = 0;
            self.sequence_cursor = 0;
        }
    }

    /// Exactly two simultaneous selections count.
    fn on_pair(&mut self, event: InputEvent) {
        let InputEvent::Pair { count } = event else {
            return;
        };
        if count == 2 {
            self.register_hit();
            self.check_win();
        }
    }

    /// Press-and-release must span the level's hold duration in unpaused
    /// time. The start stamp is cleared on release regardless of outcome.
    fn on_hold(&mut self, event: InputEvent) {
        match event {
            InputEvent::HoldBegin => {
                self.holding = true;
                self.hold_started_at = Some(self.elapsed);
            }
            InputEvent::HoldEnd => {
                self.holding = false;
                let Some(started) = self.hold_started_at.take() else {
                    return;
                };
                let required = self
                    .active_level
                    .as_ref()
                    .and_then(|l| l.hold_duration_secs)
                    .unwrap_or(1.0);
                if self.elapsed - started >= required {
                    self.register_hit();
                    self.check_win();
                }
            }
            _ => {}
        }
    }

    fn on_blink(&mut self, event: InputEvent) {
        let InputEvent::Tap { .. } = event else {
            return;
        };
        if self.blink_visible {
            self.register_hit();
            self.check_win();
        }
    }

    fn on_flash(&mut self, event: InputEvent) {
        let InputEvent::Tap { .. } = event else {
            return;
        };
        if self.flash_visible {
            self.register_hit();
            self.check_win();
        }
    }

    fn on_smallest(&mut self, event: InputEvent) {
        let InputEvent::SizedBall { index } = event else {
            return;
        };
        if index == 0 {
            self.register_hit();
            self.check_win();
        }
    }

    fn on_biggest(&mut self, event: InputEvent) {
        let InputEvent::SizedBall { index } = event else {
            return;
        };
        if index == self.ball_sizes.len() - 1 {
            self.register_hit();
            self.check_win();
        }
    }

    fn on_changing_color(&mut self, event: InputEvent) {
        let InputEvent::Tap { .. } = event else {
            return;
        };
        let wanted = self
            .active_level
            .as_ref()
            .and_then(|l| l.target_color)
            .unwrap_or(BallColor::Pink);
        if self.displayed_color == wanted {
            self.register_hit();
            self.check_win();
        }
    }

    fn on_shape(&mut self, event: InputEvent) {
        let InputEvent::ShapeTap { shape } = event else {
            return;
        };
        let wanted = self
            .active_level
            .as_ref()
            .and_then(|l| l.shape)
            .unwrap_or(TargetShape::Triangle);
        if shape == wanted {
            self.register_hit();
            self.check_win();
        }
    }

    /// Any hit counts; the ball immediately flees to a new spot.
    fn on_runaway(&mut self, event: InputEvent) {
        let InputEvent::Tap { .. } = event else {
            return;
        };
        use rand::Rng;
        self.register_hit();
        self.runaway_pos = Vec2::new(
            self.rng.random_range(TARGET_MIN_X..=TARGET_MAX_X),
            self.rng.random_range(TARGET_MIN_Y..=TARGET_MAX_Y),
        );
        self.check_win();
    }

    fn on_rhythm(&mut self, event: InputEvent) {
        let InputEvent::Tap { .. } = event else {
            return;
        };
        if self.rhythm_pulse {
            self.register_hit();
            self.check_win();
        }
    }

    fn on_wait(&mut self, event: InputEvent) {
        let InputEvent::Tap { .. } = event else {
            return;
        };
        if self.wait_visible {
            self.register_hit();
            self.check_win();
        }
    }

    /// A slot tap deactivates that slot; the point lands only when all
    /// slots are inactive at once, which also re-arms them all.
    fn on_multi(&mut self, event: InputEvent) {
        let InputEvent::Slot { index } = event else {
            return;
        };
        let Some(slot) = self.multi_active.get_mut(index) else {
            return;
        };
        *slot = false;
        if self.multi_active.iter().all(|active| !active) {
            self.register_hit();
            self.multi_active = [true; MULTI_SLOTS];
            self.check_win();
        }
    }

    fn on_swipe(&mut self, event: InputEvent) {
        let InputEvent::Swipe { distance } = event else {
            return;
        };
        if distance >= SWIPE_MIN_DISTANCE {
            self.register_hit();
            self.check_win();
        }
    }

    /// Decorative: the tilt cursor accumulates deltas, unclamped. No score.
    fn on_tilt(&mut self, event: InputEvent) {
        let InputEvent::TiltDelta { dx, dy } = event else {
            return;
        };
        self.tilt_pos += Vec2::new(dx, dy);
    }

    fn on_pinch(&mut self, event: InputEvent) {
        let InputEvent::Pinch { scale } = event else {
            return;
        };
        self.pinch_scale = scale;
        if scale > PINCH_OUT_THRESHOLD || scale < PINCH_IN_THRESHOLD {
            self.register_hit();
            self.pinch_scale = 1.0;
            self.check_win();
        }
    }

    /// Palette mode for levels 11+: match purely by color, no mechanic
    /// branching, and redraw the announced color on every hit.
    fn on_palette_tap(&mut self, color: BallColor) {
        let premium = self
            .active_level
            .as_ref()
            .is_some_and(|l| l.id >= PALETTE_MIN_LEVEL);
        if !premium {
            return;
        }
        if color == self.target_color {
            self.register_hit();
            self.redraw_target_color();
            self.check_win();
        }
    }
}
