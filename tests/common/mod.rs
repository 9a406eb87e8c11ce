#![allow(dead_code)]

use std::collections::VecDeque;

use flappy_term::audio::Cue;
use flappy_term::config::Settings;
use flappy_term::entities::LevelDef;
use flappy_term::host::{AudioSink, Clock, Key, KeySource, Presenter};
use flappy_term::run::FrameView;

/// A level that is ready to play, with every default filled in.
pub fn make_level() -> LevelDef {
    LevelDef {
        number: 1,
        name: String::from("Test"),
        gravity_multiplier: 1.0,
        speed_increase: 0.125,
        loaded: true,
        ..LevelDef::default()
    }
}

pub fn make_settings() -> Settings {
    Settings::default()
}

/// Host with a manual clock and scripted keyboard.
///
/// `polls` feeds `poll_key` one entry per call (a `None` entry is a frame with
/// no key). `answers` feeds `wait_key`; once it runs dry the input is treated
/// as closed. Every blocking wait advances the clock by `wait_ms`.
#[derive(Default)]
pub struct ScriptedHost {
    pub now: u64,
    pub wait_ms: u64,
    pub polls: VecDeque<Option<Key>>,
    pub answers: VecDeque<Key>,
    pub cues: Vec<Cue>,
    pub countdown_labels: Vec<String>,
    pub frames: usize,
    pub paused: usize,
    pub life_lost: usize,
    pub hints: Vec<String>,
    pub flushes: usize,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_polls(keys: impl IntoIterator<Item = Option<Key>>) -> Self {
        Self {
            polls: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn answer(&mut self, key: Key) {
        self.answers.push_back(key);
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }
}

impl Clock for ScriptedHost {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl KeySource for ScriptedHost {
    fn poll_key(&mut self) -> Option<Key> {
        self.polls.pop_front().flatten()
    }

    fn wait_key(&mut self) -> Key {
        self.now += self.wait_ms;
        self.answers.pop_front().unwrap_or(Key::Closed)
    }

    fn flush_keys(&mut self) {
        self.flushes += 1;
    }
}

impl AudioSink for ScriptedHost {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

impl Presenter for ScriptedHost {
    fn countdown(&mut self, _view: &FrameView<'_>, label: &str) {
        self.countdown_labels.push(label.to_string());
    }

    fn frame(&mut self, _view: &FrameView<'_>) {
        self.frames += 1;
    }

    fn paused(&mut self, _view: &FrameView<'_>) {
        self.paused += 1;
    }

    fn life_lost(&mut self, _view: &FrameView<'_>) {
        self.life_lost += 1;
    }

    fn hint(&mut self, text: &str) {
        self.hints.push(text.to_string());
    }
}
