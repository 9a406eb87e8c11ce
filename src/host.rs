//! Everything the run state machine needs from the outside world.
//!
//! A run never touches the terminal, the keyboard or the system clock
//! directly. The binary supplies a terminal-backed host; tests supply a
//! scripted one with a manual clock.

use std::time::{Duration, Instant};

use crate::audio::Cue;
use crate::run::FrameView;

// ── Keys ──────────────────────────────────────────────────────────────────────

/// A key press, independent of the input device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Any key with no character.
    Other,
    /// The input source is gone; treated like the end key.
    Closed,
}

/// What a key means to a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Jump,
    Pause,
    End,
    Retry,
    Hint,
}

impl Key {
    pub fn action(self) -> Option<Action> {
        match self {
            Key::Char(' ') => Some(Action::Jump),
            Key::Char(c) => match c.to_ascii_lowercase() {
                'p' => Some(Action::Pause),
                'e' => Some(Action::End),
                't' => Some(Action::Retry),
                'h' => Some(Action::Hint),
                _ => None,
            },
            Key::Closed => Some(Action::End),
            Key::Other => None,
        }
    }
}

// ── Collaborator traits ───────────────────────────────────────────────────────

/// Wall-clock time in milliseconds, plus the frame sleep.
pub trait Clock {
    fn now_ms(&self) -> u64;
    fn sleep_ms(&mut self, ms: u64);
}

pub trait KeySource {
    /// Next queued key, without blocking.
    fn poll_key(&mut self) -> Option<Key>;
    /// Block until a key arrives.
    fn wait_key(&mut self) -> Key;
    /// Drop any keys still queued.
    fn flush_keys(&mut self) {}
}

/// Fire-and-forget sound cues.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Read-only view of the run for drawing. Implementations must not block.
pub trait Presenter {
    fn countdown(&mut self, view: &FrameView<'_>, label: &str);
    fn frame(&mut self, view: &FrameView<'_>);
    fn paused(&mut self, view: &FrameView<'_>);
    fn life_lost(&mut self, view: &FrameView<'_>);
    fn hint(&mut self, text: &str);
}

/// The full set of collaborators a run is driven with.
pub trait Host: Clock + KeySource + AudioSink + Presenter {}

impl<T: Clock + KeySource + AudioSink + Presenter> Host for T {}

// ── System clock ──────────────────────────────────────────────────────────────

/// Monotonic clock counting from its creation.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}
