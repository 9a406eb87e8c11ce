//! Rendering layer: all terminal output lives here.
//!
//! Each function receives a writer and an immutable view of the run. No game
//! logic is performed; this module only translates state into terminal
//! commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use flappy_term::collision::row_span;
use flappy_term::config::Theme;
use flappy_term::consts::{ENTITY_OFFSET_X, MAP_HEIGHT, MAP_WIDTH};
use flappy_term::entities::{Colour, Entity, LevelDef, Obstacle, RunOutcome, RunStatus};
use flappy_term::run::FrameView;
use flappy_term::stats::{GameStats, HallOfFame};

// ── Layout ────────────────────────────────────────────────────────────────────

/// Rows above the playfield border.
const HEADER_HEIGHT: u16 = 6;
/// First row of banner text inside the header.
const BANNER_ROW: u16 = 3;
const MAP_TOP: u16 = HEADER_HEIGHT + 1;
const MAP_LEFT: u16 = 1;

const C_HINT: Color = Color::DarkGrey;

pub fn term_colour(colour: Colour) -> Color {
    match colour {
        Colour::Black => Color::Black,
        Colour::Red => Color::Red,
        Colour::Green => Color::Green,
        Colour::Yellow => Color::Yellow,
        Colour::Blue => Color::Blue,
        Colour::Magenta => Color::Magenta,
        Colour::Cyan => Color::Cyan,
        Colour::White => Color::White,
    }
}

fn move_to_cell<W: Write>(out: &mut W, row: i32, col: i32) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(MAP_LEFT + col as u16, MAP_TOP + row as u16))?;
    Ok(())
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame with optional banner lines in the header.
pub fn render<W: Write>(
    out: &mut W,
    theme: &Theme,
    view: &FrameView<'_>,
    banner: &[&str],
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, theme)?;
    draw_details(out, theme, view)?;
    draw_banner(out, theme, banner)?;
    draw_background(out, view.level)?;

    for obstacle in view.pool.enabled() {
        draw_obstacle(out, obstacle, view.level)?;
    }
    draw_entity(out, view.entity, view.level, view.crashed)?;

    finish(out)
}

/// Overwrite the banner lines only, leaving the playfield alone.
pub fn render_banner<W: Write>(out: &mut W, theme: &Theme, banner: &[&str]) -> std::io::Result<()> {
    draw_banner(out, theme, banner)?;
    finish(out)
}

fn finish<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, MAP_TOP + MAP_HEIGHT as u16 + 1))?;
    out.flush()
}

// ── Frame pieces ──────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, theme: &Theme) -> std::io::Result<()> {
    let w = MAP_WIDTH as usize;
    let bottom = MAP_TOP + MAP_HEIGHT as u16;

    out.queue(style::SetForegroundColor(term_colour(theme.border)))?;

    out.queue(cursor::MoveTo(0, HEADER_HEIGHT))?;
    out.queue(Print(format!("#{}#", "-".repeat(w))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("#{}#", "-".repeat(w))))?;

    for row in MAP_TOP..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("|"))?;
        out.queue(cursor::MoveTo(MAP_LEFT + MAP_WIDTH as u16, row))?;
        out.queue(Print("|"))?;
    }
    Ok(())
}

fn draw_details<W: Write>(out: &mut W, theme: &Theme, view: &FrameView<'_>) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(term_colour(theme.header)))?;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print(format!(
        "Level: {:<20} Score: {:>6}   Lives [Actual / Max]: {} / {}",
        view.level.name, view.score, view.lives, view.level.max_lives
    )))?;

    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(Print(format!(
        "Speed: {:>7.3} [char/s]   Fall speed: {:>7.3}   Streak: {} | Multiplier: x{}",
        view.speed, view.entity.velocity, view.streak, view.multiplier
    )))?;

    out.queue(cursor::MoveTo(1, 2))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Jump: space | Pause: p | End game: e | Hint: h"))?;
    Ok(())
}

fn draw_banner<W: Write>(out: &mut W, theme: &Theme, banner: &[&str]) -> std::io::Result<()> {
    let rows = usize::from(HEADER_HEIGHT - BANNER_ROW);
    out.queue(style::SetForegroundColor(term_colour(theme.header)))?;
    for i in 0..rows {
        out.queue(cursor::MoveTo(1, BANNER_ROW + i as u16))?;
        out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        if let Some(line) = banner.get(i) {
            out.queue(Print(*line))?;
        }
    }
    Ok(())
}

fn draw_background<W: Write>(out: &mut W, level: &LevelDef) -> std::io::Result<()> {
    let blank = " ".repeat(MAP_WIDTH as usize);
    out.queue(style::SetBackgroundColor(term_colour(level.background)))?;
    for row in 0..MAP_HEIGHT {
        move_to_cell(out, row, 0)?;
        out.queue(Print(&blank))?;
    }
    Ok(())
}

/// Draw an obstacle row by row from its solid spans, clipped to the playfield.
fn draw_obstacle<W: Write>(out: &mut W, obstacle: &Obstacle, level: &LevelDef) -> std::io::Result<()> {
    let border = term_colour(level.obstacle_border);
    let body = term_colour(level.obstacle_body);

    for row in 0..MAP_HEIGHT {
        let Some((from, to)) = row_span(obstacle, row) else {
            continue;
        };
        let (left, right) = (from.max(0), to.min(MAP_WIDTH - 1));
        if left > right {
            continue;
        }

        move_to_cell(out, row, left)?;
        for col in left..=right {
            if col == from || col == to {
                out.queue(style::SetForegroundColor(border))?;
                out.queue(Print("|"))?;
            } else {
                out.queue(style::SetForegroundColor(body))?;
                out.queue(Print("#"))?;
            }
        }
    }
    Ok(())
}

fn draw_entity<W: Write>(
    out: &mut W,
    entity: &Entity,
    level: &LevelDef,
    crashed: bool,
) -> std::io::Result<()> {
    // Sprite:
    //     \       ← row y-1
    //   |###*|    ← row y (centre on the middle '#')
    //     /       ← row y+1
    let (mut fg, mut bg) = (term_colour(entity.colour), term_colour(level.background));
    if crashed {
        std::mem::swap(&mut fg, &mut bg);
    }
    out.queue(style::SetForegroundColor(fg))?;
    out.queue(style::SetBackgroundColor(bg))?;

    let row = entity.row();
    let x = ENTITY_OFFSET_X;
    let parts: [(i32, i32, &str); 3] = [(row - 1, x, "\\"), (row, x - 2, "|###*|"), (row + 1, x, "/")];
    for (y, col, glyph) in parts {
        if (0..MAP_HEIGHT).contains(&y) {
            move_to_cell(out, y, col)?;
            out.queue(Print(glyph))?;
        }
    }
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

// ── Full-screen pages ─────────────────────────────────────────────────────────

fn draw_centred<W: Write>(
    out: &mut W,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (text, colour)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*colour))?;
        out.queue(Print(text))?;
    }
    out.queue(style::ResetColor)?;
    out.flush()
}

/// One-line notice on an otherwise empty screen.
pub fn draw_message<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    draw_centred(out, &[(text.to_string(), Color::Yellow)])
}

pub fn draw_menu<W: Write>(
    out: &mut W,
    nickname: &str,
    levels: &[LevelDef],
    last_level: Option<u32>,
    hall_of_fame: &HallOfFame,
) -> std::io::Result<()> {
    let mut lines = vec![
        ("#  F L A P P Y   T E R M  #".to_string(), Color::Cyan),
        (format!("Player: {nickname}"), Color::White),
        (String::new(), Color::Reset),
        ("Select level:".to_string(), Color::White),
    ];

    for level in levels {
        let best = hall_of_fame.best(nickname, level.number);
        let best = if best > 0 {
            format!("best {best}")
        } else {
            String::from("not played")
        };
        lines.push((
            format!("[{}] {:<20} {:>12}", level.number, level.name, best),
            term_colour(level.obstacle_body),
        ));
    }
    if levels.is_empty() {
        lines.push(("No levels found in the assets folder".to_string(), Color::Red));
    }

    lines.push((String::new(), Color::Reset));
    if let Some(n) = last_level {
        lines.push((format!("[C] Continue (level {n})"), Color::Green));
    }
    lines.push(("[S] Statistics   [Q] Quit".to_string(), C_HINT));

    draw_centred(out, &lines)
}

pub fn draw_summary<W: Write>(
    out: &mut W,
    nickname: &str,
    level: &LevelDef,
    outcome: &RunOutcome,
    new_best: bool,
) -> std::io::Result<()> {
    let headline = match outcome.status {
        RunStatus::Exhausted => "GAME OVER! No lives left.",
        RunStatus::UserEnded | RunStatus::Continuing => "GAME OVER!",
    };
    let score_line = if new_best {
        (
            format!("NEW HIGH SCORE! {nickname} scored {} (level {})", outcome.score, level.number),
            Color::Yellow,
        )
    } else {
        (format!("{nickname} score: {}", outcome.score), Color::White)
    };
    let m = &outcome.metrics;

    let lines = [
        (headline.to_string(), Color::Red),
        score_line,
        (
            format!(
                "Obstacles: {}  Jumps: {}  Pauses: {}  Collisions: {}",
                m.obstacles_passed, m.jumps, m.pauses, m.collisions
            ),
            C_HINT,
        ),
        (
            format!("Best streak: {}  Best multiplier: x{}", m.highest_streak, m.highest_multiplier),
            C_HINT,
        ),
        (String::new(), Color::Reset),
        ("Press any key".to_string(), Color::White),
    ];
    draw_centred(out, &lines)
}

pub fn draw_stats<W: Write>(
    out: &mut W,
    nickname: &str,
    stats: &GameStats,
    hall_of_fame: &HallOfFame,
    level: Option<&LevelDef>,
) -> std::io::Result<()> {
    let mut lines = vec![
        ("Statistics".to_string(), Color::Cyan),
        (format!("Runs played:      {}", stats.total_runs), Color::White),
        (format!("Total score:      {}", stats.total_score), Color::White),
        (format!("Average score:    {:.1}", stats.average_score()), Color::White),
        (format!("Best score:       {}", stats.best_score), Color::White),
        (format!("Best streak:      {}", stats.best_streak), Color::White),
        (format!("Obstacles passed: {}", stats.total_obstacles_passed), Color::White),
        (format!("Jumps:            {}", stats.total_jumps), Color::White),
        (format!("Collisions:       {}", stats.total_collisions), Color::White),
    ];

    if let Some(level) = level {
        lines.push((String::new(), Color::Reset));
        lines.push((format!("Hall of fame: {}", level.name), Color::Yellow));
        for (rank, (name, score)) in hall_of_fame.ranking(level.number).iter().take(10).enumerate() {
            let colour = if *name == nickname { Color::Green } else { Color::White };
            lines.push((format!("{:>2}. {:<16} {:>6}", rank + 1, name, score), colour));
        }
    }

    lines.push((String::new(), Color::Reset));
    lines.push(("Press any key".to_string(), C_HINT));
    draw_centred(out, &lines)
}
