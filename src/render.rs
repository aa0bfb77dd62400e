//! Projects the round state onto the frame buffer.
//!
//! Draw order matters: later layers overwrite earlier ones at the same cell.
//! Play-field layers are clipped to the game area; HUD layers address their
//! panel directly.

use crate::entities::{ExplosionKind, GameState, SHIELD_MAX_HEALTH};
use crate::frame::{FrameBuffer, Rgb, BOARD_HEIGHT, BOARD_WIDTH, GAME_WIDTH, LED_SIZE};
use crate::glyphs::{self, Glyph};

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_BACKGROUND: Rgb = Rgb::new(30, 30, 30);
const C_PLAYER: Rgb = Rgb::GREEN;
const C_BULLET_PLAYER: Rgb = Rgb::WHITE;
const C_BULLET_ALIEN: Rgb = Rgb::RED;
/// Full-health shield colour; scaled down as segments take damage.
const C_SHIELD: Rgb = Rgb::new(0, 180, 0);
const C_EXPLOSION: Rgb = Rgb::WHITE;
const C_GAME_OVER: Rgb = Rgb::RED;
const C_PAUSE: Rgb = Rgb::WHITE;

// ── HUD panels (row, col) ─────────────────────────────────────────────────────

const SCORE_PANEL: (usize, usize) = (0, 3);
const LIVES_PANEL: (usize, usize) = (1, 3);
const COUNTDOWN_PANEL: (usize, usize) = (2, 3);

/// Origin of the ×3 start-countdown digit inside the game area.
const START_DIGIT_ORIGIN: (i32, i32) = (6, 0);
const START_DIGIT_SCALE: i32 = 3;

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render(frame: &mut FrameBuffer, state: &GameState) {
    frame.fill(C_BACKGROUND);

    draw_two_digits(frame, SCORE_PANEL, state.score.min(99), Rgb::BLUE, Rgb::GREEN);
    draw_two_digits(frame, COUNTDOWN_PANEL, state.countdown.min(99), Rgb::RED, Rgb::YELLOW);
    draw_lives(frame, state.player.lives);

    set_led(frame, state.player.x, state.player.y, C_PLAYER);
    for bullet in &state.player.bullets {
        set_led(frame, bullet.x, bullet.y, C_BULLET_PLAYER);
    }
    for alien in state.alive_aliens() {
        set_led(frame, alien.x, alien.y, alien.tier.color());
    }
    for bullet in &state.alien_bullets {
        set_led(frame, bullet.x, bullet.y, C_BULLET_ALIEN);
    }
    for shield in state.shields.iter().filter(|s| s.health > 0) {
        set_led(frame, shield.x, shield.y, shield_color(shield.health));
    }
    for explosion in state.explosions.iter().filter(|e| !e.flashed) {
        let reach = match explosion.kind {
            ExplosionKind::Alien => 1,
            ExplosionKind::Bullet => 0,
        };
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                set_led(frame, explosion.x + dx, explosion.y + dy, C_EXPLOSION);
            }
        }
    }

    let (cx, cy) = (BOARD_WIDTH / 2, BOARD_HEIGHT / 2);
    if state.is_over() {
        for (x, y) in [(cx - 1, cy), (cx + 1, cy), (cx, cy - 1), (cx, cy + 1)] {
            set_led(frame, x, y, C_GAME_OVER);
        }
    }
    if state.paused {
        for dy in -2..=2 {
            set_led(frame, cx - 2, cy + dy, C_PAUSE);
            set_led(frame, cx + 2, cy + dy, C_PAUSE);
        }
    }
}

/// Black out the game area and draw `value` three times enlarged.
pub fn render_start_countdown(frame: &mut FrameBuffer, value: u32) {
    for y in 0..BOARD_HEIGHT {
        for x in 0..GAME_WIDTH {
            frame.set(x, y, Rgb::BLACK);
        }
    }
    let (ox, oy) = START_DIGIT_ORIGIN;
    for (gx, gy) in glyphs::digit(value).lit() {
        for dy in 0..START_DIGIT_SCALE {
            for dx in 0..START_DIGIT_SCALE {
                let x = ox + gx as i32 * START_DIGIT_SCALE + dx;
                let y = oy + gy as i32 * START_DIGIT_SCALE + dy;
                set_led(frame, x, y, Rgb::WHITE);
            }
        }
    }
}

pub fn shield_color(health: u8) -> Rgb {
    let scale = |c: u8| (c as u32 * health as u32 / SHIELD_MAX_HEALTH as u32) as u8;
    Rgb::new(scale(C_SHIELD.r), scale(C_SHIELD.g), scale(C_SHIELD.b))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Play-field write: dropped outside the game area.
fn set_led(frame: &mut FrameBuffer, x: i32, y: i32, color: Rgb) {
    if (0..GAME_WIDTH).contains(&x) && (0..BOARD_HEIGHT).contains(&y) {
        frame.set(x, y, color);
    }
}

fn draw_glyph(
    frame: &mut FrameBuffer,
    (row, col): (usize, usize),
    glyph: Glyph,
    (ox, oy): (usize, usize),
    color: Rgb,
) {
    for (x, y) in glyph.lit() {
        let (lx, ly) = (x + ox, y + oy);
        if lx < LED_SIZE && ly < LED_SIZE {
            frame.set_panel_pixel(row, col, lx, ly, color);
        }
    }
}

/// Zero-padded two-digit number: tens on the left half, ones on the right.
fn draw_two_digits(
    frame: &mut FrameBuffer,
    panel: (usize, usize),
    value: u32,
    tens_color: Rgb,
    ones_color: Rgb,
) {
    draw_glyph(frame, panel, glyphs::digit(value / 10), (0, 0), tens_color);
    draw_glyph(frame, panel, glyphs::digit(value % 10), (4, 0), ones_color);
}

fn draw_lives(frame: &mut FrameBuffer, lives: u32) {
    match lives {
        0 => draw_glyph(frame, LIVES_PANEL, glyphs::SKULL, (0, 0), Rgb::WHITE),
        1 => draw_glyph(frame, LIVES_PANEL, glyphs::SMALL_HEART, (1, 1), Rgb::YELLOW),
        _ => draw_glyph(frame, LIVES_PANEL, glyphs::BIG_HEART, (1, 0), Rgb::RED),
    }
}
