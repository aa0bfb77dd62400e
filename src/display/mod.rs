//! Terminal mirror. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! frame buffer and HUD facts.  No game logic is performed; this module only
//! translates the LED wall into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use led_invaders::difficulty::Level;
use led_invaders::frame::{FrameBuffer, Rgb, LED_SIZE, PANEL_COLS, PANEL_COUNT, PANEL_ROWS};
use led_invaders::link::PanelLinks;
use led_invaders::session::{Phase, Session};
use rand::Rng;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_FRAME: Color = Color::DarkGrey;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_LINK_UP: Color = Color::Green;
const C_LINK_DOWN: Color = Color::Red;

/// Terminal columns per LED.
const CELL_WIDTH: u16 = 2;
/// First terminal row of the LED wall.
const TOP: u16 = 1;

/// Facts shown around the mirrored wall.
pub struct Hud {
    pub level: Level,
    pub phase: Phase,
    pub score: u32,
    pub lives: u32,
    pub countdown: u32,
    pub paused: bool,
    pub game_over: bool,
    pub overlay_open: bool,
    pub panels: [bool; PANEL_COUNT],
}

impl Hud {
    pub fn new<R: Rng>(session: &Session<R>, links: &PanelLinks) -> Self {
        let state = session.state();
        let mut panels = [false; PANEL_COUNT];
        for (index, up) in panels.iter_mut().enumerate() {
            *up = links.is_connected(index);
        }
        Hud {
            level: state.level,
            phase: session.phase(),
            score: state.score,
            lives: state.player.lives,
            countdown: state.countdown,
            paused: state.paused,
            game_over: state.is_over(),
            overlay_open: session.overlay_open(),
            panels,
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &FrameBuffer, hud: &Hud) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_title(out, hud)?;
    draw_wall(out, frame)?;
    let below = wall_height() + TOP + 1;
    draw_status(out, hud, below)?;
    if hud.overlay_open {
        draw_overlay(out, hud, below + 2)?;
    } else {
        draw_controls_hint(out, below + 2)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, below + 6))?;
    out.flush()?;
    Ok(())
}

fn wall_height() -> u16 {
    (PANEL_ROWS * LED_SIZE + PANEL_ROWS - 1) as u16
}

// ── Title (row 0) ─────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, hud: &Hud) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "LED INVADERS  [ {} ]  alien speed {:.1}",
        hud.level.label(),
        hud.level.profile().alien_speed
    )))?;
    Ok(())
}

// ── LED wall ──────────────────────────────────────────────────────────────────

/// One `██` per LED, a blank column and row between panels.
fn draw_wall<W: Write>(out: &mut W, frame: &FrameBuffer) -> std::io::Result<()> {
    for prow in 0..PANEL_ROWS {
        for ly in 0..LED_SIZE {
            let term_y = TOP + (prow * (LED_SIZE + 1) + ly) as u16;
            for pcol in 0..PANEL_COLS {
                let term_x = (pcol * (LED_SIZE * CELL_WIDTH as usize + 1)) as u16;
                out.queue(cursor::MoveTo(term_x, term_y))?;
                for lx in 0..LED_SIZE {
                    let Rgb { r, g, b } = frame.panel_pixel(prow, pcol, lx, ly).unwrap_or_default();
                    out.queue(style::SetForegroundColor(Color::Rgb { r, g, b }))?;
                    out.queue(Print("██"))?;
                }
            }
        }
    }
    Ok(())
}

// ── Status line ───────────────────────────────────────────────────────────────

fn draw_status<W: Write>(out: &mut W, hud: &Hud, row: u16) -> std::io::Result<()> {
    let phase = match hud.phase {
        Phase::Idle => "READY".to_string(),
        Phase::Starting { remaining, .. } => format!("STARTING {remaining}"),
        Phase::Running if hud.game_over => "GAME OVER".to_string(),
        Phase::Running if hud.paused => "PAUSED".to_string(),
        Phase::Running => "PLAYING".to_string(),
    };
    let connected = hud.panels.iter().filter(|up| **up).count();

    out.queue(cursor::MoveTo(0, row))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "{phase:<10} Score: {:>3}  Lives: {}  Time: {:>2}s  ",
        hud.score, hud.lives, hud.countdown
    )))?;
    out.queue(style::SetForegroundColor(if connected == PANEL_COUNT {
        C_LINK_UP
    } else {
        C_FRAME
    }))?;
    out.queue(Print(format!("Links: {connected}/{PANEL_COUNT}")))?;
    Ok(())
}

// ── Link overlay ──────────────────────────────────────────────────────────────

const PANEL_KEYS: [char; PANEL_COUNT] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '-', '='];

fn draw_overlay<W: Write>(out: &mut W, hud: &Hud, row: u16) -> std::io::Result<()> {
    for prow in 0..PANEL_ROWS {
        out.queue(cursor::MoveTo(0, row + prow as u16))?;
        for pcol in 0..PANEL_COLS {
            let index = prow * PANEL_COLS + pcol;
            let up = hud.panels[index];
            out.queue(style::SetForegroundColor(C_HINT))?;
            out.queue(Print(format!("[{}] ", PANEL_KEYS[index])))?;
            out.queue(style::SetForegroundColor(if up { C_LINK_UP } else { C_LINK_DOWN }))?;
            out.queue(Print(format!("panel {:>2} {:<5}  ", index + 1, if up { "up" } else { "down" })))?;
        }
    }
    out.queue(cursor::MoveTo(0, row + PANEL_ROWS as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("T : Test panels   C : Close (resumes sending)"))?;
    Ok(())
}

// ── Controls hint ─────────────────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   SPACE : Shoot   P : Pause   R / Enter : Start/Reset",
    ))?;
    out.queue(cursor::MoveTo(0, row + 1))?;
    out.queue(Print("1 2 3 : Difficulty (before start)   C : Links   Q : Quit"))?;
    Ok(())
}

/// Overlay key → panel slot.
pub fn panel_for_key(key: char) -> Option<usize> {
    PANEL_KEYS.iter().position(|k| *k == key)
}
