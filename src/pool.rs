//! Fixed-capacity obstacle pool and the scroller that drives it.
//!
//! Slots live in a plain array and are found by linear scan; a slot is in use
//! while its `enabled` flag is set. Nothing is allocated once the pool exists.

use rand::Rng;

use crate::consts::{END_CAP_WIDTH, ENTITY_OFFSET_X, MAP_WIDTH, POOL_CAPACITY};
use crate::entities::{LevelDef, Obstacle};
use crate::generator::{draw, generate};

#[derive(Clone, Debug, PartialEq)]
pub struct ObstaclePool {
    slots: [Obstacle; POOL_CAPACITY],
}

impl Default for ObstaclePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstaclePool {
    pub fn new() -> Self {
        Self {
            slots: [Obstacle::default(); POOL_CAPACITY],
        }
    }

    pub fn slots(&self) -> &[Obstacle] {
        &self.slots
    }

    /// Mutable access to a single slot. Lets tests lay out obstacles by hand.
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Obstacle> {
        self.slots.get_mut(index)
    }

    pub fn enabled(&self) -> impl Iterator<Item = &Obstacle> {
        self.slots.iter().filter(|o| o.enabled)
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled().count()
    }

    /// Index of the enabled obstacle furthest to the right.
    pub fn most_distant(&self) -> Option<usize> {
        self.enabled_indices().max_by_key(|&i| self.slots[i].position)
    }

    /// Index of the enabled obstacle furthest to the left.
    pub fn least_distant(&self) -> Option<usize> {
        self.enabled_indices().min_by_key(|&i| self.slots[i].position)
    }

    /// First slot not in use.
    pub fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(|o| !o.enabled)
    }

    fn enabled_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.slots.len()).filter(move |&i| self.slots[i].enabled)
    }

    /// Scroll every enabled obstacle left by the whole cells earned since it
    /// last moved at `speed` cells per second.
    ///
    /// Returns how many obstacles had their trailing edge cross the entity's
    /// column during this step. An obstacle counts once: only on the step
    /// where its edge goes from right of the entity to at-or-left of it.
    pub fn advance(&mut self, speed: f32, now_ms: u64) -> u32 {
        let mut passed = 0;

        for obstacle in self.slots.iter_mut().filter(|o| o.enabled) {
            let Some(last) = obstacle.last_moved_ms else {
                obstacle.last_moved_ms = Some(now_ms);
                continue;
            };

            let before = obstacle.trailing_edge();
            let cells = speed * (now_ms.saturating_sub(last) as f32 / 1000.0);
            if cells >= 1.0 {
                obstacle.position -= cells as i32;
                obstacle.last_moved_ms = Some(now_ms);
            }
            let after = obstacle.trailing_edge();

            if before > ENTITY_OFFSET_X && after <= ENTITY_OFFSET_X {
                passed += 1;
            }
        }

        passed
    }

    /// Retire the leftmost obstacle once it has fully left the playfield, then
    /// fill one free slot if the rightmost obstacle has left room behind it.
    ///
    /// Returns the index of the slot that was filled, if any.
    pub fn recycle_and_spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        level: &LevelDef,
        now_ms: u64,
    ) -> Option<usize> {
        if let Some(i) = self.least_distant() {
            if self.slots[i].trailing_edge() < 0 {
                self.slots[i].enabled = false;
                log::debug!("obstacle slot {i} retired");
            }
        }

        let free = self.free_slot()?;

        let (position, previous_upper) = match self.most_distant() {
            None => (MAP_WIDTH - 1 + END_CAP_WIDTH, None),
            Some(i) => {
                let last = self.slots[i];
                if last.position + END_CAP_WIDTH >= MAP_WIDTH {
                    return None;
                }
                let spacing = draw(rng, level.min_spacing, level.max_spacing);
                (last.trailing_edge() + spacing, Some(last.upper))
            }
        };

        self.slots[free] = generate(rng, position, level, true, previous_upper, now_ms);
        Some(free)
    }

    /// Re-stamp every enabled obstacle, so time spent in a dialog does not
    /// turn into one large scroll step.
    pub fn restamp(&mut self, now_ms: u64) {
        for obstacle in self.slots.iter_mut().filter(|o| o.enabled) {
            obstacle.last_moved_ms = Some(now_ms);
        }
    }

    /// Disable every slot.
    pub fn reset(&mut self) {
        for obstacle in self.slots.iter_mut() {
            obstacle.enabled = false;
        }
    }
}
