mod display;
mod terminal;

use std::fs::{self, File};
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use crossterm::{cursor, event, terminal as term, ExecutableCommand};
use rand::thread_rng;

use flappy_term::audio::Cue;
use flappy_term::config::{load_level, AssetPaths, Settings};
use flappy_term::entities::LevelDef;
use flappy_term::host::{AudioSink, Clock, Key, KeySource};
use flappy_term::run::Run;
use flappy_term::stats::{GameStats, HallOfFame, Saves};

use crate::terminal::TerminalHost;

/// Highest level number looked for in the assets folder.
const MAX_LEVELS: u32 = 9;

/// How long a "level missing" notice stays up.
const NOTICE_MS: u64 = 1500;

#[derive(Parser, Debug)]
#[command(name = "flappy-term", about = "Side-scrolling obstacle game for the terminal")]
struct Cli {
    /// Folder holding settings, levels and saved records
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Name used for saves and the hall of fame (defaults to $USER)
    #[arg(long)]
    nickname: Option<String>,

    /// Start this level straight away instead of showing the menu first
    #[arg(long)]
    level: Option<u32>,
}

/// Everything persisted between runs.
struct Records {
    stats: GameStats,
    hall_of_fame: HallOfFame,
    saves: Saves,
}

impl Records {
    fn load(paths: &AssetPaths) -> Self {
        Self {
            stats: GameStats::load(&paths.stats()),
            hall_of_fame: HallOfFame::load(&paths.hall_of_fame()),
            saves: Saves::load(&paths.saves()),
        }
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(u32),
    Stats,
    Quit,
}

fn show_menu<W: Write>(
    host: &mut TerminalHost<'_, W>,
    nickname: &str,
    levels: &[LevelDef],
    records: &Records,
) -> std::io::Result<MenuResult> {
    let last_level = records.saves.last_level(nickname);
    display::draw_menu(host.out(), nickname, levels, last_level, &records.hall_of_fame)?;

    // Block until the user makes a choice
    loop {
        let choice = match host.wait_key() {
            Key::Char(c) if c.is_ascii_digit() => {
                let n = c.to_digit(10).unwrap_or(0);
                levels.iter().any(|l| l.number == n).then_some(MenuResult::Start(n))
            }
            Key::Char('c') | Key::Char('C') => last_level.map(MenuResult::Start),
            Key::Char('s') | Key::Char('S') => Some(MenuResult::Stats),
            Key::Char('q') | Key::Char('Q') | Key::Char('e') | Key::Closed => Some(MenuResult::Quit),
            _ => None,
        };
        if let Some(choice) = choice {
            host.play(Cue::MenuMove);
            return Ok(choice);
        }
    }
}

fn show_stats<W: Write>(
    host: &mut TerminalHost<'_, W>,
    nickname: &str,
    levels: &[LevelDef],
    records: &Records,
) -> std::io::Result<()> {
    let level = records
        .saves
        .last_level(nickname)
        .and_then(|n| levels.iter().find(|l| l.number == n))
        .or_else(|| levels.first());
    display::draw_stats(host.out(), nickname, &records.stats, &records.hall_of_fame, level)?;
    host.wait_key();
    Ok(())
}

// ── Playing a level ───────────────────────────────────────────────────────────

fn play_level<W: Write>(
    host: &mut TerminalHost<'_, W>,
    paths: &AssetPaths,
    settings: &Settings,
    nickname: &str,
    number: u32,
    records: &mut Records,
) -> std::io::Result<()> {
    let level = load_level(paths, number, settings);
    let Some(run) = Run::new(&level, settings, thread_rng()) else {
        display::draw_message(host.out(), &format!("The level {number} does not exist!"))?;
        if records.saves.reset_missing(nickname, number) {
            log::info!("saved level {number} for {nickname} is gone, back to level 1");
            if let Err(e) = records.saves.save(&paths.saves()) {
                log::warn!("could not save progress: {e}");
            }
        }
        host.sleep_ms(NOTICE_MS);
        host.flush_keys();
        return Ok(());
    };

    records.saves.set_last_level(nickname, number);
    if let Err(e) = records.saves.save(&paths.saves()) {
        log::warn!("could not save progress: {e}");
    }

    let outcome = run.play(host);

    records.stats.record_run(outcome.score, &outcome.metrics);
    if let Err(e) = records.stats.save(&paths.stats()) {
        log::warn!("could not save statistics: {e}");
    }

    let new_best = records.hall_of_fame.submit(nickname, number, outcome.score);
    if new_best {
        host.play(Cue::HighScore);
        if let Err(e) = records.hall_of_fame.save(&paths.hall_of_fame()) {
            log::warn!("could not save hall of fame: {e}");
        }
    }

    host.flush_keys();
    display::draw_summary(host.out(), nickname, &level, &outcome, new_best)?;
    host.wait_key();
    Ok(())
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<event::Event>,
    paths: &AssetPaths,
    nickname: &str,
    start_level: Option<u32>,
) -> std::io::Result<()> {
    let settings = Settings::load(&paths.settings());
    if !paths.settings().exists() {
        // Leave an editable copy of the defaults behind.
        if let Err(e) = settings.save(&paths.settings()) {
            log::warn!("could not write default settings: {e}");
        }
    }
    let mut records = Records::load(paths);
    let levels: Vec<LevelDef> = (1..=MAX_LEVELS)
        .map(|n| load_level(paths, n, &settings))
        .filter(|l| l.loaded)
        .collect();
    log::info!("{} levels available, player {nickname}", levels.len());

    let mut host = TerminalHost::new(out, rx, &settings);

    if let Some(n) = start_level {
        play_level(&mut host, paths, &settings, nickname, n, &mut records)?;
    }

    loop {
        match show_menu(&mut host, nickname, &levels, &records)? {
            MenuResult::Quit => break,
            MenuResult::Stats => show_stats(&mut host, nickname, &levels, &records)?,
            MenuResult::Start(n) => {
                play_level(&mut host, paths, &settings, nickname, n, &mut records)?
            }
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Log to a file; stdout and stderr belong to the game screen.
fn init_logging(paths: &AssetPaths) -> anyhow::Result<()> {
    fs::create_dir_all(paths.root())
        .with_context(|| format!("cannot create {}", paths.root().display()))?;
    let file = File::create(paths.log())
        .with_context(|| format!("cannot open {}", paths.log().display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let paths = AssetPaths::new(&cli.assets);
    init_logging(&paths)?;

    let nickname = cli
        .nickname
        .or_else(|| std::env::var("USER").ok())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "player".to_string());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    term::enable_raw_mode().context("cannot enter raw mode")?;
    out.execute(term::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<event::Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &paths, &nickname, cli.level);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(term::LeaveAlternateScreen);
    let _ = term::disable_raw_mode();

    result.context("game loop failed")
}
