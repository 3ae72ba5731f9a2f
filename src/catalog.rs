//! Level catalog: the fixed 20-level progression
//!
//! The catalog is a pure function of the persisted unlock count. Every call
//! to [`LevelCatalog::build`] yields the same 20 definitions; only the
//! `unlocked` flags vary.

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_COUNT;

/// The tap/gesture challenge a level runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mechanic {
    /// Tap a stationary ball
    Static,
    /// Ball relocates on a timer
    Moving,
    /// Ball blinks in and out; only visible taps count
    Disappearing,
    /// Tap the ball matching the announced color
    ColorPick,
    /// Tap anything except the forbidden color
    AvoidColor,
    /// Tap numbered balls in order
    Sequence,
    /// Two simultaneous taps
    Pair,
    /// Press and hold for a minimum duration
    Hold,
    /// Tap while the blinking ball is visible
    Blink,
    /// Tap the smallest of three balls
    Smallest,
    /// Tap the biggest of three balls
    Biggest,
    /// Tap when the cycling color matches the target color
    ChangingColor,
    /// Tap the named shape
    Shape,
    /// Fast blink; tap while visible
    Flash,
    /// Ball hops away on its own timer; any hit counts
    Runaway,
    /// Tap on the beat pulse
    Rhythm,
    /// Target appears once after a delay; taps before that are wasted
    Wait,
    /// Tap all three slots before any reset
    MultiSimultaneous,
    /// Drag gesture past a distance threshold
    Swipe,
    /// Device tilt moves a cursor (decorative, no scoring)
    Tilt,
    /// Pinch gesture past a scale threshold
    Pinch,
    /// Delegates to a randomly chosen mechanic, fixed per session
    SuperMix,
}

impl Mechanic {
    /// Mechanics a super-mix round can delegate to (everything but itself).
    pub const DELEGATES: [Mechanic; 21] = [
        Mechanic::Static,
        Mechanic::Moving,
        Mechanic::Disappearing,
        Mechanic::ColorPick,
        Mechanic::AvoidColor,
        Mechanic::Sequence,
        Mechanic::Pair,
        Mechanic::Hold,
        Mechanic::Blink,
        Mechanic::Smallest,
        Mechanic::Biggest,
        Mechanic::ChangingColor,
        Mechanic::Shape,
        Mechanic::Flash,
        Mechanic::Runaway,
        Mechanic::Rhythm,
        Mechanic::Wait,
        Mechanic::MultiSimultaneous,
        Mechanic::Swipe,
        Mechanic::Tilt,
        Mechanic::Pinch,
    ];
}

/// Ball palette shared by the catalog and the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallColor {
    Red,
    Blue,
    Green,
    Yellow,
    Black,
    Purple,
    Orange,
    Cyan,
    Mint,
    Pink,
    Gray,
}

/// Target shapes for the shape mechanic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetShape {
    Circle,
    Square,
    Triangle,
    Star,
}

/// One fully parameterized level.
///
/// Mechanic-specific parameters are `Some` exactly for the mechanics that
/// consume them: colors for the color-driven mechanics, `sequence` for
/// Sequence, `hold_duration_secs` for Hold, `blink_interval_secs` for
/// Disappearing/Flash/Blink, `min_taps`/`max_taps` for Pair and
/// MultiSimultaneous.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDefinition {
    pub id: u32,
    pub mechanic: Mechanic,
    /// Score target to win
    pub required_hits: u32,
    pub time_limit_secs: u32,
    pub description: &'static str,
    /// Derived at build time: `id <= unlocked_count`
    pub unlocked: bool,
    pub target_color: Option<BallColor>,
    pub avoid_color: Option<BallColor>,
    pub shape: Option<TargetShape>,
    pub sequence: Option<&'static [u8]>,
    pub hold_duration_secs: Option<f32>,
    pub blink_interval_secs: Option<f32>,
    pub min_taps: Option<u8>,
    pub max_taps: Option<u8>,
}

/// Base definition with no mechanic parameters set.
fn level(
    id: u32,
    mechanic: Mechanic,
    required_hits: u32,
    time_limit_secs: u32,
    description: &'static str,
) -> LevelDefinition {
    LevelDefinition {
        id,
        mechanic,
        required_hits,
        time_limit_secs,
        description,
        unlocked: false,
        target_color: None,
        avoid_color: None,
        shape: None,
        sequence: None,
        hold_duration_secs: None,
        blink_interval_secs: None,
        min_taps: None,
        max_taps: None,
    }
}

/// Immutable, ordered list of level definitions
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    /// Build the catalog for a given unlock count.
    ///
    /// `unlocked_count` is clamped to `[1, LEVEL_COUNT]`; out-of-range
    /// persisted values are accepted, never rejected.
    pub fn build(unlocked_count: u32) -> Self {
        let unlocked_count = unlocked_count.clamp(1, LEVEL_COUNT);

        use BallColor::*;
        use Mechanic::*;
        let mut levels = vec![
            LevelDefinition {
                target_color: Some(Red),
                ..level(1, Static, 5, 30, "Tap the static red ball 5 times")
            },
            LevelDefinition {
                target_color: Some(Blue),
                ..level(2, Moving, 7, 25, "Tap the moving blue ball 7 times")
            },
            LevelDefinition {
                target_color: Some(Green),
                blink_interval_secs: Some(0.7),
                ..level(3, Disappearing, 8, 20, "Tap the ball before it disappears!")
            },
            LevelDefinition {
                target_color: Some(Cyan),
                blink_interval_secs: Some(0.2),
                ..level(4, Flash, 8, 15, "Quick! Tap the flashing ball!")
            },
            LevelDefinition {
                target_color: Some(Mint),
                ..level(5, Runaway, 6, 30, "Catch the slow-moving ball!")
            },
            LevelDefinition {
                target_color: Some(Red),
                ..level(6, Rhythm, 10, 15, "Tap to the beat!")
            },
            LevelDefinition {
                target_color: Some(Blue),
                ..level(7, Wait, 6, 18, "Wait for the ball to appear!")
            },
            LevelDefinition {
                min_taps: Some(3),
                max_taps: Some(3),
                ..level(8, MultiSimultaneous, 8, 30, "Tap all three balls at once!")
            },
            LevelDefinition {
                target_color: Some(Orange),
                ..level(9, Swipe, 8, 15, "Swipe the ball!")
            },
            LevelDefinition {
                target_color: Some(Purple),
                ..level(10, Static, 5, 20, "Tap the purple ball 5 times")
            },
            LevelDefinition {
                target_color: Some(Yellow),
                ..level(11, Static, 5, 20, "Tap the yellow ball 5 times")
            },
            LevelDefinition {
                target_color: Some(Pink),
                ..level(12, ChangingColor, 12, 15, "Tap the ball when it turns pink!")
            },
            LevelDefinition {
                shape: Some(TargetShape::Triangle),
                ..level(13, Shape, 8, 18, "Tap the triangle!")
            },
            level(14, Biggest, 10, 15, "Tap the biggest ball!"),
            LevelDefinition {
                avoid_color: Some(Black),
                ..level(15, AvoidColor, 12, 18, "Tap any ball except black!")
            },
            LevelDefinition {
                sequence: Some(&[1, 2, 3, 4, 5]),
                ..level(16, Sequence, 5, 20, "Tap balls in order: 1-2-3-4-5")
            },
            LevelDefinition {
                min_taps: Some(2),
                max_taps: Some(2),
                ..level(17, Pair, 6, 18, "Tap two balls at the same time!")
            },
            LevelDefinition {
                target_color: Some(Purple),
                hold_duration_secs: Some(1.0),
                ..level(18, Hold, 4, 20, "Hold the ball for 1 second!")
            },
            LevelDefinition {
                target_color: Some(Orange),
                blink_interval_secs: Some(0.4),
                ..level(19, Blink, 8, 18, "Tap the blinking ball!")
            },
            level(20, SuperMix, 20, 20, "Ultimate challenge: all mechanics!"),
        ];

        for entry in &mut levels {
            entry.unlocked = entry.id <= unlocked_count;
        }

        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Look up a level by id. `None` past the catalog end.
    pub fn get(&self, id: u32) -> Option<&LevelDefinition> {
        self.levels.iter().find(|l| l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }

    /// Highest-id unlocked entry, for auto-resume.
    pub fn last_unlocked(&self) -> Option<&LevelDefinition> {
        self.levels.iter().rev().find(|l| l.unlocked)
    }
}
