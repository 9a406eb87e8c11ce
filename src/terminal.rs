//! Terminal-backed host: crossterm output, channel-fed keyboard input,
//! bell audio and the system clock.

use std::io::{self, Stdout, Write};
use std::sync::mpsc::{Receiver, TryRecvError};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use flappy_term::audio::{BellAudio, Cue};
use flappy_term::config::{Settings, Theme};
use flappy_term::host::{AudioSink, Clock, Key, KeySource, Presenter, SystemClock};
use flappy_term::run::FrameView;

use crate::display;

/// Translate a terminal event into a key. Releases and non-key events are dropped.
fn to_key(event: Event) -> Option<Key> {
    let Event::Key(KeyEvent {
        code,
        kind,
        modifiers,
        ..
    }) = event
    else {
        return None;
    };
    if kind == KeyEventKind::Release {
        return None;
    }

    Some(match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::Closed,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Esc => Key::Char('e'),
        KeyCode::Enter => Key::Char('\n'),
        _ => Key::Other,
    })
}

pub struct TerminalHost<'a, W: Write> {
    out: &'a mut W,
    rx: &'a Receiver<Event>,
    audio: BellAudio<Stdout>,
    clock: SystemClock,
    theme: Theme,
    /// Banner lines shown on the next frame.
    banner: Vec<String>,
}

impl<'a, W: Write> TerminalHost<'a, W> {
    pub fn new(out: &'a mut W, rx: &'a Receiver<Event>, settings: &Settings) -> Self {
        Self {
            out,
            rx,
            audio: BellAudio::from_settings(io::stdout(), settings),
            clock: SystemClock::new(),
            theme: settings.theme,
            banner: Vec::new(),
        }
    }

    pub fn out(&mut self) -> &mut W {
        &mut *self.out
    }

    fn draw(&mut self, view: &FrameView<'_>) {
        let banner: Vec<&str> = self.banner.iter().map(String::as_str).collect();
        if let Err(e) = display::render(&mut *self.out, &self.theme, view, &banner) {
            log::warn!("render failed: {e}");
        }
    }

    fn set_banner<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.banner = lines.into_iter().map(Into::into).collect();
    }
}

impl<W: Write> Clock for TerminalHost<'_, W> {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.clock.sleep_ms(ms);
    }
}

impl<W: Write> KeySource for TerminalHost<'_, W> {
    fn poll_key(&mut self) -> Option<Key> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    if let Some(key) = to_key(event) {
                        return Some(key);
                    }
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => return Some(Key::Closed),
            }
        }
    }

    fn wait_key(&mut self) -> Key {
        loop {
            match self.rx.recv() {
                Ok(event) => {
                    if let Some(key) = to_key(event) {
                        return key;
                    }
                }
                Err(_) => return Key::Closed,
            }
        }
    }

    fn flush_keys(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}

impl<W: Write> AudioSink for TerminalHost<'_, W> {
    fn play(&mut self, cue: Cue) {
        self.audio.play(cue);
    }
}

impl<W: Write> Presenter for TerminalHost<'_, W> {
    fn countdown(&mut self, view: &FrameView<'_>, label: &str) {
        self.set_banner([label]);
        self.draw(view);
    }

    fn frame(&mut self, view: &FrameView<'_>) {
        self.banner.clear();
        self.draw(view);
    }

    fn paused(&mut self, view: &FrameView<'_>) {
        self.set_banner(["GAME PAUSED - PRESS 'p' TO CONTINUE OR 'e' TO END GAME"]);
        self.draw(view);
    }

    fn life_lost(&mut self, view: &FrameView<'_>) {
        self.set_banner([
            format!(
                "BANG! You crashed into an obstacle or fell down, you have {} more lives left.",
                view.lives
            ),
            format!("YOUR ACTUAL SCORE IS: {}", view.score),
            "Do you want to try again (press 't') or end the game (press 'e')?".to_string(),
        ]);
        self.draw(view);
    }

    fn hint(&mut self, text: &str) {
        if let Err(e) = display::render_banner(&mut *self.out, &self.theme, &[text]) {
            log::warn!("render failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn translates_terminal_events() {
        assert_eq!(to_key(press(KeyCode::Char(' '), KeyModifiers::NONE)), Some(Key::Char(' ')));
        assert_eq!(to_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Key::Char('e')));
        assert_eq!(
            to_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Closed)
        );
        assert_eq!(to_key(press(KeyCode::Left, KeyModifiers::NONE)), Some(Key::Other));
        assert_eq!(to_key(Event::FocusGained), None);
    }
}
