//! Scroll speed ramp.

use crate::consts::METERS_TO_CELLS;
use crate::entities::LevelDef;

/// Horizontal scroll speed, growing with elapsed play time.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedRamp {
    /// Current speed in cells per second.
    cells_per_sec: f32,
    last_tick_ms: Option<u64>,
}

impl SpeedRamp {
    pub fn new(level: &LevelDef) -> Self {
        Self {
            cells_per_sec: level.start_speed * METERS_TO_CELLS,
            last_tick_ms: None,
        }
    }

    pub fn speed(&self) -> f32 {
        self.cells_per_sec
    }

    /// Add the speed earned since the previous tick.
    ///
    /// The first tick after construction or `rebaseline` only stamps the time.
    pub fn tick(&mut self, level: &LevelDef, now_ms: u64) {
        if let Some(last) = self.last_tick_ms {
            let seconds = now_ms.saturating_sub(last) as f32 / 1000.0;
            self.cells_per_sec += METERS_TO_CELLS * (level.speed_increase / 60.0) * seconds;
        }
        self.last_tick_ms = Some(now_ms);
    }

    /// Forget the last tick, so time spent outside of flight (countdowns,
    /// dialogs) does not count toward the ramp.
    pub fn rebaseline(&mut self) {
        self.last_tick_ms = None;
    }
}
