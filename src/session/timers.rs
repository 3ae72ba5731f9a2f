//! Scheduled tasks owned by the session
//!
//! Accumulator-based timers advanced by `GameSession::tick`. Each slot is
//! independently cancellable; `cancel_all` is the single sweep run on every
//! start and end so a stale timer can never fire into a new level's state.

/// Repeating timer slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Repeating {
    period: f32,
    elapsed: f32,
}

impl Repeating {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds; returns how many times the timer fired.
    /// A large `dt` catches up with multiple firings.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// One-shot delayed timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct OneShot {
    delay: f32,
    elapsed: f32,
    fired: bool,
}

impl OneShot {
    pub fn new(delay: f32) -> Self {
        Self {
            delay,
            elapsed: 0.0,
            fired: false,
        }
    }

    /// Advance by `dt` seconds; returns true exactly once, when the delay
    /// first elapses.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.fired {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.delay {
            self.fired = true;
            return true;
        }
        false
    }
}

/// Every scheduled task a session can own. Unarmed slots are `None`; which
/// slots get armed depends on the level's effective mechanic.
#[derive(Debug, Default, Clone, PartialEq)]
pub(super) struct Timers {
    /// One-second countdown, armed while a level is running
    pub countdown: Option<Repeating>,
    /// Moving-target relocation
    pub relocate: Option<Repeating>,
    /// Visibility toggle for disappearing/blink/flash
    pub toggle: Option<Repeating>,
    /// Changing-color redraw
    pub recolor: Option<Repeating>,
    /// Rhythm pulse
    pub pulse: Option<Repeating>,
    /// Runaway-ball hop
    pub runaway: Option<Repeating>,
    /// Wait-mechanic reveal
    pub reveal: Option<OneShot>,
}

impl Timers {
    /// Cancel every outstanding timer.
    pub fn cancel_all(&mut self) {
        *self = Self::default();
    }
}
