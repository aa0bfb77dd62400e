//! All game entity types: pure data, no logic.

use crate::difficulty::{DifficultyProfile, Level, RoundSettings};
use crate::frame::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Alien,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    /// Row before this tick's step, used for tolerant bullet-vs-bullet hits.
    pub prev_y: i32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(x: i32, y: i32, owner: BulletOwner) -> Self {
        Bullet { x, y, prev_y: y, owner }
    }
}

// ── Aliens ────────────────────────────────────────────────────────────────────

/// Row tier of an alien; fixes its colour and score value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienTier {
    Low,
    Mid,
    High,
}

impl AlienTier {
    /// Every two formation rows share a tier.
    pub fn from_row(row: usize) -> Self {
        match row / 2 {
            0 => AlienTier::Low,
            1 => AlienTier::Mid,
            _ => AlienTier::High,
        }
    }

    pub fn score(self) -> u32 {
        match self {
            AlienTier::Low => 1,
            AlienTier::Mid => 2,
            AlienTier::High => 4,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            AlienTier::Low => Rgb::new(255, 0, 0),
            AlienTier::Mid => Rgb::new(255, 128, 0),
            AlienTier::High => Rgb::new(255, 255, 0),
        }
    }
}

/// Aliens are never removed from the formation, only marked dead.
#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: i32,
    pub y: i32,
    pub tier: AlienTier,
    pub alive: bool,
}

// ── Shields ───────────────────────────────────────────────────────────────────

pub const SHIELD_MAX_HEALTH: u8 = 2;

/// Which of a cluster's two stacked rows a segment belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShieldRow {
    /// Upper row, nearer the aliens.
    Back,
    /// Lower row, nearer the player.
    Front,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shield {
    pub x: i32,
    pub y: i32,
    pub row: ShieldRow,
    pub health: u8,
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionKind {
    /// 3×3 flash where an alien died.
    Alien,
    /// 1×1 flash where two bullets met.
    Bullet,
}

/// Visible on the frame it was created, purged on the one after.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
    pub kind: ExplosionKind,
    pub flashed: bool,
}

/// Sound cues handed to the audio boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PlayerShot,
    AlienShot,
    Explosion(ExplosionKind),
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub lives: u32,
    pub bullets: Vec<Bullet>,
    /// Time of the last accepted shot, in session milliseconds.
    pub last_shot_ms: Option<u64>,
}

// ── Round context ─────────────────────────────────────────────────────────────

/// The entire round state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub level: Level,
    pub profile: DifficultyProfile,
    pub settings: RoundSettings,
    pub player: Player,
    pub aliens: Vec<Alien>,
    pub alien_bullets: Vec<Bullet>,
    pub shields: Vec<Shield>,
    pub explosions: Vec<Explosion>,
    /// +1 (right) or -1 (left).
    pub alien_direction: i32,
    /// Ticks since the last formation step.
    pub move_timer: u32,
    pub last_alien_shot_ms: Option<u64>,
    pub score: u32,
    /// Seconds left in the round.
    pub countdown: u32,
    pub last_countdown_ms: u64,
    pub paused: bool,
    pub status: GameStatus,
    /// Pending sound cues, drained by the session.
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn alive_aliens(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter().filter(|a| a.alive)
    }

    /// True while any shield segment in column `x` still has health.
    pub fn column_shielded(&self, x: i32) -> bool {
        self.shields.iter().any(|s| s.x == x && s.health > 0)
    }
}
