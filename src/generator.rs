//! Procedural obstacle generation.
//!
//! Each obstacle is drawn at random within the level's ranges. Consecutive
//! obstacles are chained: the new upper arm stays within the level's gap-shift
//! window of the previous one, so the gap never jumps further than the level
//! designer allowed.

use rand::Rng;

use crate::consts::{END_CAP_HEIGHT, MAP_HEIGHT};
use crate::entities::{LevelDef, Obstacle};

/// Rows left for the two arms once the caps and the gap are taken out.
pub fn total_arm_span(gap: i32) -> i32 {
    MAP_HEIGHT - 2 * (END_CAP_HEIGHT + 1) - gap
}

/// Uniform draw from `[min, max]`. An inverted or empty range collapses to `min`.
pub fn draw<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

/// Window of allowed upper-arm heights given the previous obstacle's.
fn chained_window<R: Rng + ?Sized>(
    rng: &mut R,
    level: &LevelDef,
    previous: i32,
    ceiling: i32,
) -> (i32, i32) {
    // Coin flip between raising and lowering the gap, unless one direction
    // has no room left.
    let mut shrink = rng.gen_bool(0.5);
    if shrink {
        if previous - level.max_gap_shift <= 0 {
            shrink = false;
        }
    } else if previous + level.min_gap_shift >= ceiling {
        shrink = true;
    }

    let (mut lo, mut hi) = if shrink {
        (previous - level.max_gap_shift, previous - level.min_gap_shift)
    } else {
        (previous + level.min_gap_shift, previous + level.max_gap_shift)
    };

    if lo <= 0 {
        lo = 1;
    } else if lo >= ceiling {
        lo = ceiling;
    }

    if hi >= ceiling {
        hi = ceiling;
    } else if hi <= 0 {
        hi = lo;
    }

    (lo, hi)
}

/// Generate one obstacle at column `position`.
///
/// `previous_upper` is the upper-arm height of the obstacle this one follows,
/// or `None` for the first obstacle of a life.
///
/// The lower arm is floored at 1, which at extreme gap settings leaves the
/// realised gap smaller than the drawn one.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    position: i32,
    level: &LevelDef,
    enabled: bool,
    previous_upper: Option<i32>,
    now_ms: u64,
) -> Obstacle {
    let width = draw(rng, level.min_width, level.max_width);
    let gap = draw(rng, level.min_gap, level.max_gap);
    let span = total_arm_span(gap);
    let ceiling = span - 1;

    let (lo, hi) = match previous_upper {
        Some(previous) if previous > 0 => chained_window(rng, level, previous, ceiling),
        _ => (1, ceiling),
    };
    let upper = draw(rng, lo, hi).max(1);

    let lower = (span - upper).max(1);

    log::debug!(
        "generated obstacle at {position}: width {width}, gap {gap}, arms {upper}/{lower}"
    );

    Obstacle {
        width,
        position,
        upper,
        lower,
        last_moved_ms: Some(now_ms),
        enabled,
    }
}
