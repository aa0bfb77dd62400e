//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the session clock and, where needed, an RNG handle)
//! and returns a brand-new `GameState`.  Side effects are limited to the
//! injected RNG.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::difficulty::{DifficultyProfile, Level, RoundSettings};
use crate::entities::{
    Alien, AlienTier, Bullet, BulletOwner, Direction, Explosion, ExplosionKind, GameEvent,
    GameState, GameStatus, Player, Shield, ShieldRow, SHIELD_MAX_HEALTH,
};
use crate::frame::{BOARD_HEIGHT, BOARD_WIDTH, GAME_WIDTH};

/// Minimum gap between two accepted player shots.
pub const PLAYER_SHOT_COOLDOWN_MS: u64 = 500;
const COUNTDOWN_STEP_MS: u64 = 1000;

const ALIEN_ORIGIN_X: i32 = 4;
const ALIEN_ORIGIN_Y: i32 = 2;
const ALIEN_SPACING_X: i32 = 3;
const ALIEN_SPACING_Y: i32 = 2;
/// The formation stops firing once fewer aliens than this are alive.
const MIN_ALIENS_TO_FIRE: usize = 4;
/// Aliens this close to the bottom edge end the round.
const LOSE_MARGIN: i32 = 3;

const SHIELD_CLUSTERS: i32 = 5;
const SHIELD_WIDTH: i32 = 3;
const SHIELD_ORIGIN_X: i32 = 3;
const SHIELD_SPACING_X: i32 = 6;
pub const SHIELD_BACK_Y: i32 = BOARD_HEIGHT - 5;
pub const SHIELD_FRONT_Y: i32 = BOARD_HEIGHT - 4;

// ── Constructors ─────────────────────────────────────────────────────────────

fn new_player(lives: u32) -> Player {
    Player {
        x: BOARD_WIDTH / 2,
        y: BOARD_HEIGHT - 2,
        lives,
        bullets: Vec::new(),
        last_shot_ms: None,
    }
}

/// Lay out a full formation for the given profile.
pub fn spawn_wave(profile: &DifficultyProfile) -> Vec<Alien> {
    let mut aliens = Vec::with_capacity(profile.alien_count());
    for row in 0..profile.alien_rows {
        for col in 0..profile.alien_cols {
            aliens.push(Alien {
                x: col as i32 * ALIEN_SPACING_X + ALIEN_ORIGIN_X,
                y: row as i32 * ALIEN_SPACING_Y + ALIEN_ORIGIN_Y,
                tier: AlienTier::from_row(row),
                alive: true,
            });
        }
    }
    aliens
}

/// Five 3-wide clusters, each a back row stacked over a front row.
pub fn build_shields() -> Vec<Shield> {
    let mut shields = Vec::new();
    for cluster in 0..SHIELD_CLUSTERS {
        let base_x = cluster * SHIELD_SPACING_X + SHIELD_ORIGIN_X;
        for (row, y) in [(ShieldRow::Back, SHIELD_BACK_Y), (ShieldRow::Front, SHIELD_FRONT_Y)] {
            for dx in 0..SHIELD_WIDTH {
                shields.push(Shield {
                    x: base_x + dx,
                    y,
                    row,
                    health: SHIELD_MAX_HEALTH,
                });
            }
        }
    }
    shields
}

/// Build the initial round state for a level.
pub fn init_state(level: Level, settings: RoundSettings, now_ms: u64) -> GameState {
    let profile = level.profile();
    GameState {
        player: new_player(settings.starting_lives),
        aliens: spawn_wave(&profile),
        alien_bullets: Vec::new(),
        shields: build_shields(),
        explosions: Vec::new(),
        alien_direction: 1,
        move_timer: 0,
        last_alien_shot_ms: None,
        score: 0,
        countdown: settings.round_seconds,
        last_countdown_ms: now_ms,
        paused: false,
        status: GameStatus::Playing,
        events: Vec::new(),
        level,
        profile,
        settings,
    }
}

/// Replace the round wholesale, keeping its level and settings.
pub fn reset(state: &GameState, now_ms: u64) -> GameState {
    init_state(state.level, state.settings.clone(), now_ms)
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player(state: &GameState, direction: Direction) -> GameState {
    let mut next = state.clone();
    if state.is_over() {
        return next;
    }
    let step = match direction {
        Direction::Left => -1,
        Direction::Right => 1,
    };
    next.player.x = (state.player.x + step).clamp(0, BOARD_WIDTH - 1);
    next
}

/// Fire a bullet from the player, rate-limited by `PLAYER_SHOT_COOLDOWN_MS`.
pub fn player_shoot(state: &GameState, now_ms: u64) -> GameState {
    let mut next = state.clone();
    if state.is_over() {
        return next;
    }
    let cooling = state
        .player
        .last_shot_ms
        .is_some_and(|last| now_ms.saturating_sub(last) < PLAYER_SHOT_COOLDOWN_MS);
    if cooling {
        return next;
    }
    next.player.bullets.push(Bullet::new(
        state.player.x,
        state.player.y - 1,
        BulletOwner::Player,
    ));
    next.player.last_shot_ms = Some(now_ms);
    next.events.push(GameEvent::PlayerShot);
    next
}

pub fn toggle_pause(state: &GameState) -> GameState {
    GameState {
        paused: !state.paused,
        ..state.clone()
    }
}

/// One formation step: sideways, or down-and-reverse at the edge.
pub fn move_aliens(state: &GameState) -> GameState {
    let mut next = state.clone();
    step_aliens(&mut next);
    next
}

// ── Per-tick update (RNG injected) ──────────────────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// and all time through `now_ms`, so callers control determinism.
pub fn tick(state: &GameState, now_ms: u64, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    if state.is_over() || state.paused {
        return next;
    }
    advance(&mut next, now_ms, rng);
    next
}

fn advance(s: &mut GameState, now_ms: u64, rng: &mut impl Rng) {
    // ── 1. Round countdown ───────────────────────────────────────────────────
    if now_ms.saturating_sub(s.last_countdown_ms) >= COUNTDOWN_STEP_MS {
        s.countdown = s.countdown.saturating_sub(1);
        s.last_countdown_ms = now_ms;
        if s.countdown == 0 {
            s.status = GameStatus::GameOver;
            return;
        }
    }

    // ── 2. Formation step on its interval ────────────────────────────────────
    s.move_timer += 1;
    if s.move_timer >= s.profile.alien_move_interval {
        s.move_timer = 0;
        step_aliens(s);
    }

    // ── 3. Explosions: one visible frame, then purge ─────────────────────────
    s.explosions.retain_mut(|e| {
        if e.flashed {
            false
        } else {
            e.flashed = true;
            true
        }
    });

    // ── 4. Snapshot rows before anything moves ───────────────────────────────
    for bullet in s.player.bullets.iter_mut().chain(s.alien_bullets.iter_mut()) {
        bullet.prev_y = bullet.y;
    }

    // ── 5/6. Bullets ─────────────────────────────────────────────────────────
    update_player_bullets(s);
    update_alien_bullets(s);
    if s.is_over() {
        return;
    }

    // ── 7. Formation fires ───────────────────────────────────────────────────
    alien_fire(s, now_ms, rng);

    // ── 8. Wave cleared → next wave, score and shields carry over ────────────
    if s.aliens.iter().all(|a| !a.alive) {
        s.aliens = spawn_wave(&s.profile);
    }

    // ── 9. Formation reached the bottom ──────────────────────────────────────
    if s.alive_aliens().any(|a| a.y >= BOARD_HEIGHT - LOSE_MARGIN) {
        s.status = GameStatus::GameOver;
    }
}

fn step_aliens(s: &mut GameState) {
    let dir = s.alien_direction;
    let at_edge = s
        .alive_aliens()
        .any(|a| (dir > 0 && a.x >= GAME_WIDTH - 2) || (dir < 0 && a.x <= 1));

    if at_edge {
        s.alien_direction = -dir;
    }
    for alien in s.aliens.iter_mut().filter(|a| a.alive) {
        if at_edge {
            alien.y += 1;
        } else {
            alien.x += dir;
        }
    }
}

/// Same column and rows overlapping within one step, counting the rows
/// both bullets occupied before this tick.
fn bullets_meet(player: &Bullet, alien: &Bullet) -> bool {
    player.x == alien.x
        && (player.y == alien.y
            || player.y == alien.prev_y
            || player.prev_y == alien.y
            || (player.y - alien.y).abs() <= 1)
}

/// The shield row a bullet from `owner` reaches first.
fn near_row(owner: BulletOwner) -> ShieldRow {
    match owner {
        BulletOwner::Player => ShieldRow::Front,
        BulletOwner::Alien => ShieldRow::Back,
    }
}

/// Consumes the bullet if it touches a live shield segment.  Damage goes to
/// the near row of that column while it has health, then to the far row.
fn absorb_by_shield(shields: &mut [Shield], bullet: &Bullet) -> bool {
    let Some(touched) = shields
        .iter()
        .position(|s| s.health > 0 && s.x == bullet.x && s.y == bullet.y)
    else {
        return false;
    };
    let near = near_row(bullet.owner);
    let target = if shields[touched].row == near {
        touched
    } else {
        shields
            .iter()
            .position(|s| s.x == bullet.x && s.row == near && s.health > 0)
            .unwrap_or(touched)
    };
    shields[target].health -= 1;
    true
}

fn spawn_explosion(s: &mut GameState, x: i32, y: i32, kind: ExplosionKind) {
    s.explosions.push(Explosion {
        x,
        y,
        kind,
        flashed: false,
    });
    s.events.push(GameEvent::Explosion(kind));
}

fn update_player_bullets(s: &mut GameState) {
    let bullets = std::mem::take(&mut s.player.bullets);
    for mut bullet in bullets {
        bullet.y -= 1;

        // a. Bullet ↔ bullet
        if let Some(j) = s.alien_bullets.iter().position(|a| bullets_meet(&bullet, a)) {
            let other = s.alien_bullets.remove(j);
            spawn_explosion(s, bullet.x, bullet.y.min(other.y), ExplosionKind::Bullet);
            continue;
        }

        // b. Bullet ↔ shield
        if absorb_by_shield(&mut s.shields, &bullet) {
            continue;
        }

        // c. Bullet ↔ alien, locked out by any live shield in the column
        if !s.column_shielded(bullet.x) {
            let killed = s
                .aliens
                .iter_mut()
                .find(|a| a.alive && a.x == bullet.x && a.y == bullet.y)
                .map(|a| {
                    a.alive = false;
                    (a.x, a.y, a.tier)
                });
            if let Some((x, y, tier)) = killed {
                s.score += tier.score();
                spawn_explosion(s, x, y, ExplosionKind::Alien);
                continue;
            }
        }

        // d. Off the top
        if bullet.y < 0 {
            continue;
        }
        s.player.bullets.push(bullet);
    }
}

fn update_alien_bullets(s: &mut GameState) {
    let bullets = std::mem::take(&mut s.alien_bullets);
    for mut bullet in bullets {
        bullet.y += 1;

        if let Some(j) = s.player.bullets.iter().position(|p| bullets_meet(p, &bullet)) {
            let other = s.player.bullets.remove(j);
            spawn_explosion(s, bullet.x, bullet.y.min(other.y), ExplosionKind::Bullet);
            continue;
        }

        if absorb_by_shield(&mut s.shields, &bullet) {
            continue;
        }

        if bullet.x == s.player.x && bullet.y == s.player.y && !s.column_shielded(bullet.x) {
            s.player.lives = s.player.lives.saturating_sub(1);
            if s.player.lives == 0 {
                s.status = GameStatus::GameOver;
            }
            continue;
        }

        if bullet.y >= BOARD_HEIGHT {
            continue;
        }
        s.alien_bullets.push(bullet);
    }
}

fn alien_fire(s: &mut GameState, now_ms: u64, rng: &mut impl Rng) {
    let due = s
        .last_alien_shot_ms
        .map_or(true, |last| now_ms.saturating_sub(last) > s.profile.alien_shoot_interval_ms);
    if !due {
        return;
    }

    let muzzle = {
        let alive: Vec<&Alien> = s.alive_aliens().collect();
        if alive.len() < MIN_ALIENS_TO_FIRE {
            return;
        }
        let (in_column, elsewhere): (Vec<&Alien>, Vec<&Alien>) =
            alive.iter().copied().partition(|a| a.x == s.player.x);
        let chance = s.profile.player_column_shoot_chance.clamp(0.0, 1.0);
        let pool = if rng.gen_bool(chance) {
            &in_column
        } else {
            &elsewhere
        };
        pool.choose(rng)
            .or_else(|| alive.choose(rng))
            .map(|a| (a.x, a.y + 1))
    };

    if let Some((x, y)) = muzzle {
        s.alien_bullets.push(Bullet::new(x, y, BulletOwner::Alien));
        s.last_alien_shot_ms = Some(now_ms);
        s.events.push(GameEvent::AlienShot);
    }
}
