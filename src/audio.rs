//! Sound cues, played on the terminal bell.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::host::AudioSink;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Menu cursor moved or item chosen
    MenuMove,
    Jump,
    /// Entity cleared an obstacle
    ObstaclePassed,
    Collision,
    /// One countdown step
    Countdown,
    /// New hall-of-fame entry
    HighScore,
}

impl Cue {
    /// Bell rings per cue.
    pub fn rings(self) -> usize {
        match self {
            Cue::Collision => 2,
            Cue::HighScore => 3,
            Cue::MenuMove | Cue::Jump | Cue::ObstaclePassed | Cue::Countdown => 1,
        }
    }
}

/// How cues reach the speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundMode {
    #[default]
    #[serde(alias = "beep")]
    Bell,
    Off,
}

/// Audio sink that rings the terminal bell.
pub struct BellAudio<W: Write> {
    out: W,
    enabled: bool,
}

impl<W: Write> BellAudio<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    pub fn from_settings(out: W, settings: &Settings) -> Self {
        Self::new(out, settings.sound_enabled && settings.sound_mode != SoundMode::Off)
    }
}

impl<W: Write> AudioSink for BellAudio<W> {
    fn play(&mut self, cue: Cue) {
        if !self.enabled {
            return;
        }
        let bells = "\x07".repeat(cue.rings());
        if let Err(e) = self
            .out
            .write_all(bells.as_bytes())
            .and_then(|_| self.out.flush())
        {
            log::warn!("bell failed: {e}");
        }
    }
}
