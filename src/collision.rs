//! Analytic collision detection between the entity and obstacle geometry.
//!
//! Obstacle shape, per arm (shown for the upper one; the lower arm mirrors
//! it from the floor):
//!
//! ```text
//!   |###|        rows 0 .. upper-1, columns position ..= position+width+1
//! __|###|__      lip row upper-1 widens to the end caps
//! |#######|      row upper
//! *********      row upper+1
//! ```
//!
//! Solid cells in any single row form one contiguous span, which is what
//! `row_span` reports. The renderer draws from the same spans.

use crate::consts::{END_CAP_HEIGHT, MAP_HEIGHT, MAP_WIDTH};
use crate::entities::{Entity, Obstacle};
use crate::pool::ObstaclePool;

/// Cells the entity occupies, as `(row, column)` offsets from its centre.
pub const HITBOX: [(i32, i32); 5] = [(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)];

/// Solid span of one arm at `depth` rows in from the arm's own edge
/// (row 0 for the upper arm, the floor row for the lower one).
fn arm_span(obstacle: &Obstacle, height: i32, depth: i32) -> Option<(i32, i32)> {
    let cap_rows = (height - END_CAP_HEIGHT)..=(height + END_CAP_HEIGHT);
    if cap_rows.contains(&depth) {
        Some((obstacle.leading_edge(), obstacle.trailing_edge()))
    } else if depth < height {
        Some((obstacle.position, obstacle.position + obstacle.width + 1))
    } else {
        None
    }
}

/// Inclusive column range of solid cells in `row`, before clipping to the
/// playfield width.
pub fn row_span(obstacle: &Obstacle, row: i32) -> Option<(i32, i32)> {
    if !obstacle.enabled || !(0..MAP_HEIGHT).contains(&row) {
        return None;
    }
    arm_span(obstacle, obstacle.upper, row)
        .or_else(|| arm_span(obstacle, obstacle.lower, MAP_HEIGHT - 1 - row))
}

/// Whether the playfield cell at `(row, col)` is part of `obstacle`.
pub fn is_solid(obstacle: &Obstacle, row: i32, col: i32) -> bool {
    if !(0..MAP_WIDTH).contains(&col) {
        return false;
    }
    row_span(obstacle, row).is_some_and(|(from, to)| (from..=to).contains(&col))
}

/// Whether the entity, centred on column `offset_x`, overlaps any enabled
/// obstacle. Hitbox cells outside the playfield rows are ignored.
pub fn collides(entity: &Entity, pool: &ObstaclePool, offset_x: i32) -> bool {
    let centre = entity.row();
    HITBOX
        .iter()
        .map(|&(dy, dx)| (centre + dy, offset_x + dx))
        .filter(|(row, _)| (0..MAP_HEIGHT).contains(row))
        .any(|(row, col)| pool.enabled().any(|o| is_solid(o, row, col)))
}
