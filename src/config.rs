//! Settings, level definitions and the JSON files behind them.
//!
//! Loading never fails outward. A missing or broken settings file yields the
//! defaults; a missing or broken level yields a definition with
//! `loaded == false`. Failures are logged and the caller carries on.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::SoundMode;
use crate::entities::{Colour, LevelDef};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// True when the file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::Io { source, .. } if source.kind() == ErrorKind::NotFound)
    }
}

// ── Asset layout ──────────────────────────────────────────────────────────────

/// Where every file lives, relative to one assets directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    pub fn level(&self, number: u32) -> PathBuf {
        self.root.join("levels").join(format!("level_{number}.json"))
    }

    pub fn stats(&self) -> PathBuf {
        self.root.join("game_stats.json")
    }

    pub fn hall_of_fame(&self) -> PathBuf {
        self.root.join("hall_of_fame.json")
    }

    pub fn saves(&self) -> PathBuf {
        self.root.join("saves.json")
    }

    pub fn log(&self) -> PathBuf {
        self.root.join("flappy.log")
    }
}

// ── JSON helpers ──────────────────────────────────────────────────────────────

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` to a temporary sibling file, then rename it over `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}

/// Read `path`, falling back to `T::default()` on any failure.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match read_json(path) {
        Ok(value) => value,
        Err(e) if e.is_not_found() => {
            log::info!("{} not found, using defaults", path.display());
            T::default()
        }
        Err(e) => {
            log::warn!("{e}; using defaults");
            T::default()
        }
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Colours for the parts of the screen that do not belong to a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub border: Colour,
    pub header: Colour,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Colour::Blue,
            header: Colour::Yellow,
        }
    }
}

/// Process-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target frames per second of the simulation loop.
    pub fps: u32,
    /// Gravity acceleration in m/s², before the level multiplier.
    pub gravity_constant: f32,
    /// Used by levels that leave their gravity multiplier unset.
    pub default_gravity_multiplier: f32,
    /// Used by levels that leave their speed increase unset.
    pub default_speed_increase_per_minute: f32,

    pub sound_enabled: bool,
    pub sound_mode: SoundMode,

    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 30,
            gravity_constant: 9.8,
            default_gravity_multiplier: 1.0,
            default_speed_increase_per_minute: 0.125,
            sound_enabled: true,
            sound_mode: SoundMode::Bell,
            theme: Theme::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Self {
        let mut settings: Settings = load_or_default(path);
        if settings.fps == 0 {
            log::warn!("fps of 0 in {}, using 1", path.display());
            settings.fps = 1;
        }
        settings
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        write_json(path, self)
    }

    /// Sleep between frames.
    pub fn frame_ms(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }
}

// ── Levels ────────────────────────────────────────────────────────────────────

fn ordered(min: &mut i32, max: &mut i32) {
    if *min > *max {
        std::mem::swap(min, max);
    }
}

/// Fill unset tunables from `settings` and put every range in order.
pub fn finish_level(level: &mut LevelDef, settings: &Settings) {
    if level.gravity_multiplier == 0.0 {
        level.gravity_multiplier = settings.default_gravity_multiplier;
    }
    if level.speed_increase == 0.0 {
        level.speed_increase = settings.default_speed_increase_per_minute;
    }
    ordered(&mut level.min_gap, &mut level.max_gap);
    ordered(&mut level.min_width, &mut level.max_width);
    ordered(&mut level.min_spacing, &mut level.max_spacing);
    ordered(&mut level.min_gap_shift, &mut level.max_gap_shift);
}

/// Load level `number`. On failure the result has `loaded == false`.
pub fn load_level(paths: &AssetPaths, number: u32, settings: &Settings) -> LevelDef {
    let path = paths.level(number);
    match read_json::<LevelDef>(&path) {
        Ok(mut level) => {
            level.number = number;
            level.loaded = true;
            finish_level(&mut level, settings);
            log::info!("loaded level {number} ({})", level.name);
            level
        }
        Err(e) => {
            if e.is_not_found() {
                log::debug!("level {number} does not exist");
            } else {
                log::warn!("level {number} not loaded: {e}");
            }
            LevelDef {
                number,
                loaded: false,
                ..LevelDef::default()
            }
        }
    }
}
