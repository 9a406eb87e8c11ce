//! Terminal side-scrolling obstacle game.
//!
//! Library modules:
//! - `entities`: pure data (level definition, entity, obstacle, run metrics)
//! - `physics`, `generator`, `pool`, `collision`, `speed`: the simulation pieces
//! - `run`: the per-run state machine that drives them
//! - `host`: traits the run uses to reach the clock, keyboard, audio and screen
//! - `config`, `stats`, `audio`: settings/levels, persisted records, terminal bell

pub mod audio;
pub mod collision;
pub mod config;
pub mod entities;
pub mod generator;
pub mod host;
pub mod physics;
pub mod pool;
pub mod run;
pub mod speed;
pub mod stats;

/// Playfield geometry and physical scale.
pub mod consts {
    /// Playfield columns.
    pub const MAP_WIDTH: i32 = 130;
    /// Playfield rows. The floor bound is `MAP_HEIGHT - 1`.
    pub const MAP_HEIGHT: i32 = 28;

    /// Horizontal overhang of an obstacle end cap on each side.
    pub const END_CAP_WIDTH: i32 = 2;
    /// Height of the end-cap lip.
    pub const END_CAP_HEIGHT: i32 = 1;

    /// Fixed column of the entity's centre.
    pub const ENTITY_OFFSET_X: i32 = 30;

    /// Meters to character cells.
    pub const METERS_TO_CELLS: f32 = 0.5;

    /// Number of obstacle slots.
    pub const POOL_CAPACITY: usize = 30;

    /// Highest score multiplier a streak can reach.
    pub const MAX_MULTIPLIER: u32 = 4;
    /// Obstacles in a row needed per multiplier step.
    pub const STREAK_STEP: u32 = 5;
}
