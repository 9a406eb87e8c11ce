//! All game entity types: pure data, no simulation logic.

use serde::{Deserialize, Serialize};

use crate::consts::{END_CAP_WIDTH, MAP_HEIGHT};

// ── Colours ───────────────────────────────────────────────────────────────────

/// The eight basic terminal colours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    #[default]
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Colour {
    /// The colour that stands out most against `self` as a background.
    pub fn opposite(self) -> Colour {
        match self {
            Colour::Black => Colour::White,
            Colour::White => Colour::Black,
            Colour::Red => Colour::Cyan,
            Colour::Cyan => Colour::Red,
            Colour::Green => Colour::Magenta,
            Colour::Magenta => Colour::Green,
            Colour::Yellow => Colour::Blue,
            Colour::Blue => Colour::Yellow,
        }
    }
}

// ── Level definition ──────────────────────────────────────────────────────────

/// Static tunables for one level. Immutable for the duration of a run.
///
/// Speeds are in meters per second and get scaled to cells by
/// `METERS_TO_CELLS`. Every `min_*`/`max_*` pair satisfies `min <= max` once
/// the level has gone through the loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDef {
    /// Level number the definition was loaded for.
    #[serde(skip)]
    pub number: u32,
    pub name: String,

    pub background: Colour,
    pub obstacle_border: Colour,
    pub obstacle_body: Colour,

    /// Initial scroll speed.
    pub start_speed: f32,
    /// Scroll speed gained per minute of play. Zero means "use the default".
    pub speed_increase: f32,

    /// Gap height between the two arms.
    pub min_gap: i32,
    pub max_gap: i32,
    /// Obstacle body width.
    pub min_width: i32,
    pub max_width: i32,
    /// Horizontal spacing between consecutive obstacles.
    pub min_spacing: i32,
    pub max_spacing: i32,
    /// How far the upper arm height may move between consecutive obstacles.
    pub min_gap_shift: i32,
    pub max_gap_shift: i32,

    /// Multiplier on the global gravity constant. Zero means "use the default".
    pub gravity_multiplier: f32,
    pub jump_speed: f32,
    pub max_lives: u32,

    /// False when the level file could not be read. Check before starting a run.
    #[serde(skip)]
    pub loaded: bool,
}

impl Default for LevelDef {
    fn default() -> Self {
        Self {
            number: 0,
            name: String::from("Unnamed"),
            background: Colour::Black,
            obstacle_border: Colour::Green,
            obstacle_body: Colour::Green,
            start_speed: 20.0,
            speed_increase: 0.0,
            min_gap: 7,
            max_gap: 10,
            min_width: 3,
            max_width: 5,
            min_spacing: 20,
            max_spacing: 35,
            min_gap_shift: 1,
            max_gap_shift: 5,
            gravity_multiplier: 0.0,
            jump_speed: 12.0,
            max_lives: 3,
            loaded: false,
        }
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// The controlled actor. Recreated at the start of every life.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Global gravity constant times the level multiplier.
    pub gravity: f32,
    pub jump_speed: f32,
    /// Vertical velocity. Negative is upward.
    pub velocity: f32,
    /// Row of the entity's centre, continuous, in `[0, MAP_HEIGHT - 1]`.
    pub position: f32,
    /// Last wall-clock sample. `None` until the first integration step.
    pub last_sample_ms: Option<u64>,
    pub colour: Colour,
}

impl Entity {
    /// Integer row the entity's centre occupies.
    pub fn row(&self) -> i32 {
        self.position as i32
    }

    pub fn on_floor(&self) -> bool {
        self.position >= (MAP_HEIGHT - 1) as f32
    }
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

/// One obstacle slot: two solid arms flanking a single gap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Obstacle {
    pub width: i32,
    /// Column of the left border.
    pub position: i32,
    /// Height of the arm hanging from the ceiling.
    pub upper: i32,
    /// Height of the arm standing on the floor.
    pub lower: i32,
    pub last_moved_ms: Option<u64>,
    pub enabled: bool,
}

impl Obstacle {
    /// Rightmost occupied column, end cap included.
    pub fn trailing_edge(&self) -> i32 {
        self.position + 1 + self.width + END_CAP_WIDTH
    }

    /// Leftmost occupied column, end cap included.
    pub fn leading_edge(&self) -> i32 {
        self.position - END_CAP_WIDTH
    }
}

// ── Run bookkeeping ───────────────────────────────────────────────────────────

/// Where a run stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Continuing,
    /// The player pressed the end key.
    UserEnded,
    /// All lives were lost.
    Exhausted,
}

/// Counters collected over one run, handed to the statistics store at the end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub jumps: u32,
    pub pauses: u32,
    pub collisions: u32,
    pub obstacles_passed: u32,
    pub highest_streak: u32,
    pub highest_multiplier: u32,
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self {
            jumps: 0,
            pauses: 0,
            collisions: 0,
            obstacles_passed: 0,
            highest_streak: 0,
            highest_multiplier: 1,
        }
    }
}

/// What a finished run reports back to its caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    pub score: u32,
    pub status: RunStatus,
    pub metrics: RunMetrics,
}
