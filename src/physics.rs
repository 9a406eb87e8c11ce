//! Vertical motion of the entity.
//!
//! Motion is integrated from wall-clock deltas, so frame cadence has no effect
//! on how far the entity falls. Jumps are instantaneous velocity changes.

use crate::consts::{MAP_HEIGHT, METERS_TO_CELLS};
use crate::entities::{Entity, LevelDef};

/// Upward speed cap, as a multiple of the jump impulse.
const JUMP_CAP_FACTOR: f32 = 1.5;

/// Build a fresh entity for a new life, centred vertically and at rest.
///
/// The entity carries no timestamp yet, so the first `integrate` call only
/// records the time.
pub fn spawn_entity(level: &LevelDef, gravity_constant: f32) -> Entity {
    Entity {
        gravity: gravity_constant * level.gravity_multiplier,
        jump_speed: level.jump_speed,
        velocity: 0.0,
        position: (MAP_HEIGHT / 2) as f32,
        last_sample_ms: None,
        colour: level.background.opposite(),
    }
}

/// Advance the entity to `now_ms`.
///
/// Hitting the floor parks the entity there at rest. Hitting the ceiling pins
/// it to row 0 with the velocity gravity built up over this step, so it starts
/// falling again straight away.
pub fn integrate(entity: &mut Entity, now_ms: u64) {
    let Some(last) = entity.last_sample_ms else {
        entity.last_sample_ms = Some(now_ms);
        return;
    };

    let seconds = now_ms.saturating_sub(last) as f32 / 1000.0;
    let next = entity.position + entity.velocity * METERS_TO_CELLS * seconds;
    let floor = (MAP_HEIGHT - 1) as f32;

    entity.last_sample_ms = Some(now_ms);

    if next >= floor {
        entity.position = floor;
        entity.velocity = 0.0;
        return;
    }
    if next <= 0.0 {
        entity.position = 0.0;
        entity.velocity = entity.gravity * seconds;
        return;
    }

    entity.position = next;
    entity.velocity += entity.gravity * seconds;
}

/// Apply one jump impulse.
///
/// While already rising the impulse stacks, but never past
/// `JUMP_CAP_FACTOR` times the impulse, so key spam cannot launch the entity.
pub fn jump(entity: &mut Entity) {
    let impulse = entity.jump_speed;
    if entity.velocity < 0.0 {
        entity.velocity = (entity.velocity - impulse).max(-JUMP_CAP_FACTOR * impulse);
    } else {
        entity.velocity = -impulse;
    }
}
