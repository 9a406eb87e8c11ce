//! One play session, from the first countdown to termination.
//!
//! Phases and transitions:
//!
//! ```text
//! Countdown ──► Flying ──► Colliding ──► LifeLost ──► Countdown   (retry)
//!                 │ ▲                       │    └──► UserEnded   (end)
//!                 ▼ │                       └───────► Exhausted   (no lives)
//!                Paused ──► UserEnded
//!   Flying ──► UserEnded
//! ```
//!
//! Each call to `Run::step` performs the work of the current phase once: a
//! whole countdown, one flight frame, or one key read inside a dialog.

use rand::Rng;

use crate::audio::Cue;
use crate::collision;
use crate::config::Settings;
use crate::consts::{ENTITY_OFFSET_X, MAX_MULTIPLIER, STREAK_STEP};
use crate::entities::{Entity, LevelDef, RunMetrics, RunOutcome, RunStatus};
use crate::host::{Action, Host};
use crate::physics;
use crate::pool::ObstaclePool;
use crate::speed::SpeedRamp;

/// Countdown labels and the pause after each.
pub const COUNTDOWN: [(&str, u64); 5] = [
    ("Get Ready", 450),
    ("3", 300),
    ("2", 300),
    ("1", 300),
    ("GO!", 300),
];

pub const HINT_TEXT: &str = "Tip: maintain streaks to increase score multiplier.";
const HINT_MS: u64 = 650;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    Countdown,
    Flying,
    Paused,
    Colliding,
    /// Waiting for retry or end after losing a life.
    LifeLost,
    UserEnded,
    Exhausted,
}

impl RunPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunPhase::UserEnded | RunPhase::Exhausted)
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Score weight for a streak: one more per `STREAK_STEP` obstacles, capped.
pub fn multiplier_for(streak: u32) -> u32 {
    (1 + streak / STREAK_STEP).min(MAX_MULTIPLIER)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scoring {
    pub score: u32,
    pub streak: u32,
    pub multiplier: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            score: 0,
            streak: 0,
            multiplier: 1,
        }
    }
}

impl Scoring {
    /// Credit `passed` obstacles. The multiplier is recomputed from the new
    /// streak before the points are added.
    pub fn credit(&mut self, passed: u32, metrics: &mut RunMetrics) {
        if passed == 0 {
            return;
        }
        self.streak += passed;
        self.multiplier = multiplier_for(self.streak);
        self.score += passed * self.multiplier;

        metrics.obstacles_passed += passed;
        metrics.highest_streak = metrics.highest_streak.max(self.streak);
        metrics.highest_multiplier = metrics.highest_multiplier.max(self.multiplier);
    }

    pub fn break_streak(&mut self) {
        self.streak = 0;
        self.multiplier = 1;
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Simulation state owned by a run.
#[derive(Clone, Debug)]
pub struct Session {
    pub entity: Entity,
    pub pool: ObstaclePool,
    pub ramp: SpeedRamp,
}

/// Read-only snapshot handed to the presenter.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub level: &'a LevelDef,
    pub entity: &'a Entity,
    pub pool: &'a ObstaclePool,
    pub lives: u32,
    pub score: u32,
    pub streak: u32,
    pub multiplier: u32,
    /// Scroll speed in cells per second.
    pub speed: f32,
    /// Set while the entity is crashed.
    pub crashed: bool,
}

// ── Run ───────────────────────────────────────────────────────────────────────

pub struct Run<'a, R: Rng> {
    level: &'a LevelDef,
    settings: &'a Settings,
    rng: R,
    session: Session,
    phase: RunPhase,
    lives: u32,
    scoring: Scoring,
    metrics: RunMetrics,
}

impl<'a, R: Rng> Run<'a, R> {
    /// Start a run on `level`. Returns `None` for a level that was not loaded.
    pub fn new(level: &'a LevelDef, settings: &'a Settings, rng: R) -> Option<Self> {
        if !level.loaded {
            log::warn!("level {} is not loaded, refusing to start", level.number);
            return None;
        }

        let phase = if level.max_lives == 0 {
            RunPhase::Exhausted
        } else {
            RunPhase::Countdown
        };

        Some(Self {
            level,
            settings,
            rng,
            session: Session {
                entity: physics::spawn_entity(level, settings.gravity_constant),
                pool: ObstaclePool::new(),
                ramp: SpeedRamp::new(level),
            },
            phase,
            lives: level.max_lives,
            scoring: Scoring::default(),
            metrics: RunMetrics::default(),
        })
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Direct access to the simulation state, for setting up scenarios in tests.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn status(&self) -> RunStatus {
        match self.phase {
            RunPhase::UserEnded => RunStatus::UserEnded,
            RunPhase::Exhausted => RunStatus::Exhausted,
            _ => RunStatus::Continuing,
        }
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            level: self.level,
            entity: &self.session.entity,
            pool: &self.session.pool,
            lives: self.lives,
            score: self.scoring.score,
            streak: self.scoring.streak,
            multiplier: self.scoring.multiplier,
            speed: self.session.ramp.speed(),
            crashed: matches!(self.phase, RunPhase::Colliding | RunPhase::LifeLost),
        }
    }

    pub fn outcome(&self) -> RunOutcome {
        RunOutcome {
            score: self.scoring.score,
            status: self.status(),
            metrics: self.metrics,
        }
    }

    /// Drive the run to a terminal phase.
    pub fn play<H: Host>(mut self, host: &mut H) -> RunOutcome {
        log::info!(
            "run started on level {} ({}) with {} lives",
            self.level.number,
            self.level.name,
            self.lives
        );

        while !self.phase.is_terminal() {
            self.step(host);
        }

        let outcome = self.outcome();
        log::info!(
            "run ended ({:?}) with score {}, {} obstacles passed",
            outcome.status,
            outcome.score,
            outcome.metrics.obstacles_passed
        );
        outcome
    }

    /// Perform the current phase's work once and move to the next phase.
    pub fn step<H: Host>(&mut self, host: &mut H) {
        match self.phase {
            RunPhase::Countdown => self.countdown(host),
            RunPhase::Flying => self.fly(host),
            RunPhase::Paused => self.pause_dialog(host),
            RunPhase::Colliding => self.crash(host),
            RunPhase::LifeLost => self.life_lost_dialog(host),
            RunPhase::UserEnded | RunPhase::Exhausted => {}
        }
    }

    // ── Phases ────────────────────────────────────────────────────────────────

    fn countdown<H: Host>(&mut self, host: &mut H) {
        self.session.pool.reset();
        self.session.entity = physics::spawn_entity(self.level, self.settings.gravity_constant);
        self.session.ramp.rebaseline();

        for (label, pause_ms) in COUNTDOWN {
            host.countdown(&self.view(), label);
            host.play(Cue::Countdown);
            host.sleep_ms(pause_ms);
        }
        host.flush_keys();
        self.phase = RunPhase::Flying;
    }

    fn fly<H: Host>(&mut self, host: &mut H) {
        if let Some(key) = host.poll_key() {
            match key.action() {
                Some(Action::Jump) => {
                    physics::jump(&mut self.session.entity);
                    self.metrics.jumps += 1;
                    host.play(Cue::Jump);
                }
                Some(Action::End) => {
                    self.phase = RunPhase::UserEnded;
                    return;
                }
                Some(Action::Pause) => {
                    self.metrics.pauses += 1;
                    self.phase = RunPhase::Paused;
                    return;
                }
                Some(Action::Hint) => {
                    host.hint(HINT_TEXT);
                    host.sleep_ms(HINT_MS);
                }
                Some(Action::Retry) | None => {}
            }
            host.flush_keys();
        }

        let now = host.now_ms();
        let session = &mut self.session;
        physics::integrate(&mut session.entity, now);

        if session.entity.on_floor()
            || collision::collides(&session.entity, &session.pool, ENTITY_OFFSET_X)
        {
            self.phase = RunPhase::Colliding;
            return;
        }

        let passed = session.pool.advance(session.ramp.speed(), now);
        session.pool.recycle_and_spawn(&mut self.rng, self.level, now);
        session.ramp.tick(self.level, now);
        if passed > 0 {
            self.scoring.credit(passed, &mut self.metrics);
            host.play(Cue::ObstaclePassed);
        }

        host.frame(&self.view());
        host.sleep_ms(self.settings.frame_ms());
    }

    fn pause_dialog<H: Host>(&mut self, host: &mut H) {
        host.paused(&self.view());
        match host.wait_key().action() {
            Some(Action::Pause) => {
                // Dialog time must not reach the physics or the scroller.
                let now = host.now_ms();
                self.session.entity.last_sample_ms = Some(now);
                self.session.pool.restamp(now);
                self.session.ramp.rebaseline();
                host.flush_keys();
                self.phase = RunPhase::Flying;
            }
            Some(Action::End) => self.phase = RunPhase::UserEnded,
            _ => {}
        }
    }

    fn crash<H: Host>(&mut self, host: &mut H) {
        self.metrics.collisions += 1;
        self.scoring.break_streak();
        self.lives = self.lives.saturating_sub(1);
        host.play(Cue::Collision);
        log::debug!(
            "collision at row {:.2}, {} lives left",
            self.session.entity.position,
            self.lives
        );

        self.phase = if self.lives == 0 {
            RunPhase::Exhausted
        } else {
            RunPhase::LifeLost
        };
    }

    fn life_lost_dialog<H: Host>(&mut self, host: &mut H) {
        host.life_lost(&self.view());
        match host.wait_key().action() {
            Some(Action::Retry) => self.phase = RunPhase::Countdown,
            Some(Action::End) => self.phase = RunPhase::UserEnded,
            _ => {}
        }
    }
}
