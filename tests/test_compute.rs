use led_invaders::compute::*;
use led_invaders::difficulty::{Level, RoundSettings};
use led_invaders::entities::*;
use led_invaders::frame::{BOARD_WIDTH, GAME_WIDTH};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    init_state(Level::Normal, RoundSettings::default(), 0)
}

/// A round with one far-away alien (so no wave clear and no alien fire)
/// and no shields, for isolated collision checks.
fn quiet_state() -> GameState {
    let mut s = make_state();
    s.aliens = vec![Alien { x: 0, y: 0, tier: AlienTier::Low, alive: true }];
    s.shields.clear();
    s
}

fn column_shield(x: i32) -> Vec<Shield> {
    vec![
        Shield { x, y: SHIELD_BACK_Y, row: ShieldRow::Back, health: 2 },
        Shield { x, y: SHIELD_FRONT_Y, row: ShieldRow::Front, health: 2 },
    ]
}

fn health(s: &GameState, x: i32, row: ShieldRow) -> u8 {
    s.shields.iter().find(|sh| sh.x == x && sh.row == row).unwrap().health
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── init_state / reset ────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = make_state();
    assert_eq!(s.player.x, 16); // board width / 2
    assert_eq!(s.player.y, 22); // board height - 2
    assert_eq!(s.player.lives, 2);
    assert!(s.player.bullets.is_empty());
    assert_eq!(s.player.last_shot_ms, None);
}

#[test]
fn init_state_builds_normal_formation() {
    let s = make_state();
    assert_eq!(s.aliens.len(), 24); // 4 rows × 6 cols
    assert!(s.aliens.iter().all(|a| a.alive));
    assert_eq!((s.aliens[0].x, s.aliens[0].y), (4, 2));
    let last = s.aliens.last().unwrap();
    assert_eq!((last.x, last.y), (19, 8));
    // Two rows per tier
    assert_eq!(s.aliens[0].tier, AlienTier::Low);
    assert_eq!(s.aliens[6].tier, AlienTier::Low);
    assert_eq!(s.aliens[12].tier, AlienTier::Mid);
    assert_eq!(s.aliens[23].tier, AlienTier::Mid);
}

#[test]
fn init_state_builds_shield_clusters() {
    let s = make_state();
    assert_eq!(s.shields.len(), 5 * 3 * 2);
    assert!(s.shields.iter().all(|sh| sh.health == SHIELD_MAX_HEALTH));
    let back: Vec<i32> = s
        .shields
        .iter()
        .filter(|sh| sh.row == ShieldRow::Back)
        .map(|sh| sh.x)
        .collect();
    assert_eq!(&back[..6], &[3, 4, 5, 9, 10, 11]);
    assert!(s.shields.iter().all(|sh| match sh.row {
        ShieldRow::Back => sh.y == 19,
        ShieldRow::Front => sh.y == 20,
    }));
}

#[test]
fn init_state_round_fields() {
    let s = init_state(Level::Hard, RoundSettings::default(), 1234);
    assert_eq!(s.aliens.len(), 35);
    assert_eq!(s.aliens[34].tier, AlienTier::High);
    assert_eq!(s.alien_direction, 1);
    assert_eq!(s.score, 0);
    assert_eq!(s.countdown, 60);
    assert_eq!(s.last_countdown_ms, 1234);
    assert_eq!(s.status, GameStatus::Playing);
    assert!(!s.paused);
}

#[test]
fn reset_rebuilds_everything() {
    let mut s = make_state();
    s.score = 40;
    s.status = GameStatus::GameOver;
    s.player.lives = 0;
    s.aliens[0].alive = false;
    s.shields[0].health = 0;
    s.alien_direction = -1;
    s.paused = true;
    s.explosions.push(Explosion { x: 1, y: 1, kind: ExplosionKind::Bullet, flashed: false });

    let r = reset(&s, 9000);
    assert_eq!(r, init_state(Level::Normal, RoundSettings::default(), 9000));
}

// ── move_player ───────────────────────────────────────────────────────────────

#[test]
fn move_left_and_right_step_one_cell() {
    let s = make_state();
    assert_eq!(move_player(&s, Direction::Left).player.x, 15);
    assert_eq!(move_player(&s, Direction::Right).player.x, 17);
}

#[test]
fn move_clamps_to_board() {
    let mut s = make_state();
    for _ in 0..100 {
        s = move_player(&s, Direction::Left);
    }
    assert_eq!(s.player.x, 0);
    for _ in 0..100 {
        s = move_player(&s, Direction::Right);
    }
    assert_eq!(s.player.x, BOARD_WIDTH - 1);
}

#[test]
fn move_is_noop_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    assert_eq!(move_player(&s, Direction::Left), s);
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let _ = move_player(&s, Direction::Left);
    assert_eq!(s.player.x, 16);
}

// ── player_shoot ──────────────────────────────────────────────────────────────

#[test]
fn shoot_adds_bullet_above_player() {
    let s = make_state();
    let s2 = player_shoot(&s, 100);
    assert_eq!(s2.player.bullets.len(), 1);
    let b = &s2.player.bullets[0];
    assert_eq!((b.x, b.y), (16, 21));
    assert_eq!(b.owner, BulletOwner::Player);
    assert_eq!(s2.player.last_shot_ms, Some(100));
    assert_eq!(s2.events, vec![GameEvent::PlayerShot]);
}

#[test]
fn shoot_respects_cooldown() {
    let s = player_shoot(&make_state(), 1000);
    let blocked = player_shoot(&s, 1499);
    assert_eq!(blocked.player.bullets.len(), 1);
    assert_eq!(blocked.player.last_shot_ms, Some(1000));

    let allowed = player_shoot(&s, 1500);
    assert_eq!(allowed.player.bullets.len(), 2);
}

#[test]
fn shoot_is_noop_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    assert_eq!(player_shoot(&s, 0), s);
}

// ── tick: terminal and paused states ────────────────────────────────────────

#[test]
fn tick_after_game_over_changes_nothing() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.player.bullets.push(Bullet::new(10, 10, BulletOwner::Player));
    s.alien_bullets.push(Bullet::new(3, 3, BulletOwner::Alien));
    s.move_timer = 4;
    let s2 = tick(&s, 60_000, &mut seeded_rng());
    assert_eq!(s2, s);
}

#[test]
fn tick_while_paused_changes_nothing() {
    let mut s = make_state();
    s.paused = true;
    s.player.bullets.push(Bullet::new(10, 10, BulletOwner::Player));
    let s2 = tick(&s, 5000, &mut seeded_rng());
    assert_eq!(s2, s);
}

// ── tick: countdown ─────────────────────────────────────────────────────────

#[test]
fn tick_countdown_steps_once_per_second() {
    let s = quiet_state();
    let s2 = tick(&s, 999, &mut seeded_rng());
    assert_eq!(s2.countdown, 60);
    let s3 = tick(&s2, 1000, &mut seeded_rng());
    assert_eq!(s3.countdown, 59);
    assert_eq!(s3.last_countdown_ms, 1000);
    let s4 = tick(&s3, 1500, &mut seeded_rng());
    assert_eq!(s4.countdown, 59);
}

#[test]
fn tick_countdown_expiry_ends_round_before_anything_moves() {
    let mut s = quiet_state();
    s.countdown = 1;
    s.player.bullets.push(Bullet::new(10, 10, BulletOwner::Player));
    let s2 = tick(&s, 1000, &mut seeded_rng());
    assert_eq!(s2.countdown, 0);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.player.bullets[0].y, 10);
}

// ── formation movement ───────────────────────────────────────────────────────

#[test]
fn tick_moves_formation_on_interval() {
    let mut s = quiet_state();
    s.aliens = make_state().aliens;
    s.move_timer = 3; // normal interval = 5
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert_eq!(s2.move_timer, 4);
    assert_eq!(s2.aliens[0].x, 4);

    let s3 = tick(&s2, 0, &mut seeded_rng());
    assert_eq!(s3.move_timer, 0);
    assert_eq!(s3.aliens[0].x, 5);
}

#[test]
fn move_aliens_steps_sideways() {
    let s = make_state();
    let s2 = move_aliens(&s);
    for (before, after) in s.aliens.iter().zip(&s2.aliens) {
        assert_eq!(after.x, before.x + 1);
        assert_eq!(after.y, before.y);
    }
}

#[test]
fn move_aliens_reverses_and_drops_at_right_edge() {
    let mut s = quiet_state();
    s.aliens = vec![
        Alien { x: GAME_WIDTH - 2, y: 4, tier: AlienTier::Low, alive: true },
        Alien { x: 10, y: 4, tier: AlienTier::Low, alive: true },
    ];
    let s2 = move_aliens(&s);
    assert_eq!(s2.alien_direction, -1);
    assert_eq!((s2.aliens[0].x, s2.aliens[0].y), (GAME_WIDTH - 2, 5));
    assert_eq!((s2.aliens[1].x, s2.aliens[1].y), (10, 5));
}

#[test]
fn move_aliens_reverses_at_left_edge() {
    let mut s = quiet_state();
    s.alien_direction = -1;
    s.aliens = vec![Alien { x: 1, y: 4, tier: AlienTier::Low, alive: true }];
    let s2 = move_aliens(&s);
    assert_eq!(s2.alien_direction, 1);
    assert_eq!((s2.aliens[0].x, s2.aliens[0].y), (1, 5));
}

#[test]
fn move_aliens_ignores_dead_aliens() {
    let mut s = quiet_state();
    s.aliens = vec![
        Alien { x: GAME_WIDTH - 1, y: 4, tier: AlienTier::Low, alive: false },
        Alien { x: 10, y: 4, tier: AlienTier::Low, alive: true },
    ];
    let s2 = move_aliens(&s);
    // The dead alien past the edge neither triggers the turn nor moves.
    assert_eq!(s2.alien_direction, 1);
    assert_eq!((s2.aliens[0].x, s2.aliens[0].y), (GAME_WIDTH - 1, 4));
    assert_eq!(s2.aliens[1].x, 11);
}

// ── tick: player bullets ────────────────────────────────────────────────────

#[test]
fn tick_player_bullet_moves_up() {
    let mut s = quiet_state();
    s.player.bullets.push(Bullet::new(10, 10, BulletOwner::Player));
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert_eq!(s2.player.bullets[0].y, 9);
    assert_eq!(s2.player.bullets[0].prev_y, 10);
}

#[test]
fn tick_player_bullet_discarded_above_board() {
    let mut s = quiet_state();
    s.player.bullets.push(Bullet::new(10, 0, BulletOwner::Player));
    s.player.bullets.push(Bullet::new(12, 1, BulletOwner::Player));
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert_eq!(s2.player.bullets.len(), 1);
    assert_eq!((s2.player.bullets[0].x, s2.player.bullets[0].y), (12, 0));
}

#[test]
fn tick_kills_alien_directly_above() {
    // Normal formation: column 16 holds rows at y = 2, 4, 6, 8.
    let mut s = make_state();
    s.shields.clear();
    s.player.bullets.push(Bullet::new(16, 9, BulletOwner::Player));
    let s2 = tick(&s, 0, &mut seeded_rng());

    assert_eq!(s2.alive_aliens().count(), 23);
    let dead = s2.aliens.iter().find(|a| !a.alive).unwrap();
    assert_eq!((dead.x, dead.y, dead.tier), (16, 8, AlienTier::Mid));
    assert_eq!(s2.score, 2);
    assert!(s2.player.bullets.is_empty());
    assert_eq!(
        s2.explosions,
        vec![Explosion { x: 16, y: 8, kind: ExplosionKind::Alien, flashed: false }]
    );
    assert!(s2.events.contains(&GameEvent::Explosion(ExplosionKind::Alien)));
}

#[test]
fn tick_scores_by_tier() {
    for (tier, points) in [(AlienTier::Low, 1), (AlienTier::Mid, 2), (AlienTier::High, 4)] {
        let mut s = quiet_state();
        s.aliens.push(Alien { x: 10, y: 5, tier, alive: true });
        s.player.bullets.push(Bullet::new(10, 6, BulletOwner::Player));
        let s2 = tick(&s, 0, &mut seeded_rng());
        assert_eq!(s2.score, points, "{tier:?}");
        assert!(!s2.aliens[1].alive);
    }
}

#[test]
fn tick_explosion_visible_for_exactly_one_tick() {
    let mut s = quiet_state();
    s.aliens.push(Alien { x: 10, y: 5, tier: AlienTier::Low, alive: true });
    s.player.bullets.push(Bullet::new(10, 6, BulletOwner::Player));

    let s1 = tick(&s, 0, &mut seeded_rng());
    assert_eq!(s1.explosions.len(), 1);
    assert!(!s1.explosions[0].flashed);

    let s2 = tick(&s1, 100, &mut seeded_rng());
    assert_eq!(s2.explosions.len(), 1);
    assert!(s2.explosions[0].flashed);

    let s3 = tick(&s2, 200, &mut seeded_rng());
    assert!(s3.explosions.is_empty());
}

#[test]
fn tick_shield_column_locks_out_alien_hits() {
    let mut s = quiet_state();
    s.aliens.push(Alien { x: 10, y: 5, tier: AlienTier::High, alive: true });
    s.shields = vec![Shield { x: 10, y: SHIELD_BACK_Y, row: ShieldRow::Back, health: 1 }];
    s.player.bullets.push(Bullet::new(10, 6, BulletOwner::Player));
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert!(s2.aliens[1].alive);
    assert_eq!(s2.score, 0);
    // The bullet flies on through the lane.
    assert_eq!(s2.player.bullets[0].y, 5);
}

#[test]
fn tick_destroyed_shield_column_no_longer_locks_out() {
    let mut s = quiet_state();
    s.aliens.push(Alien { x: 10, y: 5, tier: AlienTier::Low, alive: true });
    s.shields = column_shield(10);
    s.shields.iter_mut().for_each(|sh| sh.health = 0);
    s.player.bullets.push(Bullet::new(10, 6, BulletOwner::Player));
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert!(!s2.aliens[1].alive);
}

// ── tick: shields ───────────────────────────────────────────────────────────

#[test]
fn tick_player_bullets_wear_front_row_first() {
    let mut s = quiet_state();
    s.shields = column_shield(10);
    let rng = &mut seeded_rng();

    for expected in [1, 0] {
        s.player.bullets.push(Bullet::new(10, 21, BulletOwner::Player));
        s = tick(&s, 0, rng);
        assert_eq!(health(&s, 10, ShieldRow::Front), expected);
        assert_eq!(health(&s, 10, ShieldRow::Back), 2);
        assert!(s.player.bullets.is_empty());
    }

    // Front row gone: the next bullet passes it and hits the back row.
    s.player.bullets.push(Bullet::new(10, 21, BulletOwner::Player));
    s = tick(&s, 0, rng);
    assert_eq!(s.player.bullets[0].y, 20);
    assert_eq!(health(&s, 10, ShieldRow::Back), 2);
    s = tick(&s, 0, rng);
    assert!(s.player.bullets.is_empty());
    assert_eq!(health(&s, 10, ShieldRow::Back), 1);
}

#[test]
fn tick_near_row_absorbs_when_far_row_is_touched() {
    let mut s = quiet_state();
    s.shields = column_shield(10);
    s.player.bullets.push(Bullet::new(10, 20, BulletOwner::Player)); // steps onto the back row
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert!(s2.player.bullets.is_empty());
    assert_eq!(health(&s2, 10, ShieldRow::Front), 1);
    assert_eq!(health(&s2, 10, ShieldRow::Back), 2);
}

#[test]
fn tick_alien_bullets_wear_back_row_first() {
    let mut s = quiet_state();
    s.shields = column_shield(10);
    let rng = &mut seeded_rng();

    for expected in [1, 0] {
        s.alien_bullets.push(Bullet::new(10, 18, BulletOwner::Alien));
        s = tick(&s, 0, rng);
        assert_eq!(health(&s, 10, ShieldRow::Back), expected);
        assert_eq!(health(&s, 10, ShieldRow::Front), 2);
        assert!(s.alien_bullets.is_empty());
    }

    s.alien_bullets.push(Bullet::new(10, 18, BulletOwner::Alien));
    s = tick(&s, 0, rng);
    assert_eq!(s.alien_bullets[0].y, 19);
    s = tick(&s, 0, rng);
    assert!(s.alien_bullets.is_empty());
    assert_eq!(health(&s, 10, ShieldRow::Front), 1);
}

// ── tick: bullet ↔ bullet ───────────────────────────────────────────────────

#[test]
fn tick_bullets_within_one_row_annihilate() {
    let mut s = quiet_state();
    s.player.bullets.push(Bullet::new(10, 12, BulletOwner::Player)); // → 11
    s.alien_bullets.push(Bullet::new(10, 10, BulletOwner::Alien));
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert!(s2.player.bullets.is_empty());
    assert!(s2.alien_bullets.is_empty());
    assert_eq!(
        s2.explosions,
        vec![Explosion { x: 10, y: 10, kind: ExplosionKind::Bullet, flashed: false }]
    );
}

#[test]
fn tick_bullet_collision_preempts_alien_hit() {
    let mut s = quiet_state();
    s.aliens.push(Alien { x: 10, y: 5, tier: AlienTier::High, alive: true });
    s.player.bullets.push(Bullet::new(10, 6, BulletOwner::Player)); // → 5, on the alien
    s.alien_bullets.push(Bullet::new(10, 5, BulletOwner::Alien));
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert!(s2.aliens[1].alive);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.explosions.len(), 1);
    assert_eq!(s2.explosions[0].kind, ExplosionKind::Bullet);
}

#[test]
fn tick_bullets_meet_after_alien_bullet_moves() {
    let mut s = quiet_state();
    s.player.bullets.push(Bullet::new(10, 12, BulletOwner::Player)); // → 11
    s.alien_bullets.push(Bullet::new(10, 9, BulletOwner::Alien)); // → 10
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert!(s2.player.bullets.is_empty());
    assert!(s2.alien_bullets.is_empty());
    assert_eq!(
        s2.explosions,
        vec![Explosion { x: 10, y: 10, kind: ExplosionKind::Bullet, flashed: false }]
    );
    assert_eq!(s2.events, vec![GameEvent::Explosion(ExplosionKind::Bullet)]);
}

#[test]
fn tick_bullets_in_different_columns_pass() {
    let mut s = quiet_state();
    s.player.bullets.push(Bullet::new(10, 12, BulletOwner::Player));
    s.alien_bullets.push(Bullet::new(11, 11, BulletOwner::Alien));
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert_eq!(s2.player.bullets.len(), 1);
    assert_eq!(s2.alien_bullets.len(), 1);
    assert!(s2.explosions.is_empty());
}

// ── tick: alien bullets ─────────────────────────────────────────────────────

#[test]
fn tick_alien_bullet_moves_down_and_leaves_board() {
    let mut s = quiet_state();
    s.alien_bullets.push(Bullet::new(10, 10, BulletOwner::Alien));
    s.alien_bullets.push(Bullet::new(12, 23, BulletOwner::Alien));
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert_eq!(s2.alien_bullets.len(), 1);
    assert_eq!(s2.alien_bullets[0].y, 11);
}

#[test]
fn tick_alien_bullet_hits_player() {
    let mut s = quiet_state(); // player at (16, 22)
    s.alien_bullets.push(Bullet::new(16, 21, BulletOwner::Alien));
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert_eq!(s2.player.lives, 1);
    assert!(s2.alien_bullets.is_empty());
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn tick_last_life_ends_round() {
    let mut s = quiet_state();
    s.player.lives = 1;
    s.alien_bullets.push(Bullet::new(16, 21, BulletOwner::Alien));
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert_eq!(s2.player.lives, 0);
    assert_eq!(s2.status, GameStatus::GameOver);
}

#[test]
fn tick_shield_column_protects_player() {
    let mut s = quiet_state();
    s.shields = column_shield(16);
    s.alien_bullets.push(Bullet::new(16, 21, BulletOwner::Alien));
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert_eq!(s2.player.lives, 2);
}

// ── tick: alien fire ────────────────────────────────────────────────────────

#[test]
fn tick_alien_fires_when_due() {
    let s = make_state();
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert_eq!(s2.alien_bullets.len(), 1);
    assert_eq!(s2.last_alien_shot_ms, Some(0));
    assert!(s2.events.contains(&GameEvent::AlienShot));
    let b = &s2.alien_bullets[0];
    assert!(s2.alive_aliens().any(|a| a.x == b.x && a.y + 1 == b.y));
}

#[test]
fn tick_alien_fire_waits_for_interval() {
    let rng = &mut seeded_rng();
    let s1 = tick(&make_state(), 0, rng);
    let s2 = tick(&s1, 1000, rng); // normal interval 1000 ms, must be exceeded
    assert_eq!(s2.alien_bullets.len(), 1);
    let s3 = tick(&s2, 1001, rng);
    assert_eq!(s3.alien_bullets.len(), 2);
}

#[test]
fn tick_alien_fire_prefers_player_column() {
    let mut s = make_state();
    s.profile.player_column_shoot_chance = 1.0;
    for seed in 0..20 {
        let s2 = tick(&s, 0, &mut StdRng::seed_from_u64(seed));
        assert_eq!(s2.alien_bullets[0].x, s.player.x);
    }

    s.profile.player_column_shoot_chance = 0.0;
    for seed in 0..20 {
        let s2 = tick(&s, 0, &mut StdRng::seed_from_u64(seed));
        assert_ne!(s2.alien_bullets[0].x, s.player.x);
    }
}

#[test]
fn tick_alien_fire_falls_back_to_any_alien() {
    let mut s = make_state();
    s.profile.player_column_shoot_chance = 1.0;
    s.player.x = 0; // no alien in column 0
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert_eq!(s2.alien_bullets.len(), 1);
}

#[test]
fn tick_alien_fire_needs_four_aliens() {
    let mut s = make_state();
    for alien in s.aliens.iter_mut().skip(3) {
        alien.alive = false;
    }
    let s2 = tick(&s, 0, &mut seeded_rng());
    assert!(s2.alien_bullets.is_empty());
    assert_eq!(s2.last_alien_shot_ms, None);
}

// ── tick: wave clear and lose condition ─────────────────────────────────────

#[test]
fn tick_wave_clear_spawns_new_wave_keeping_score() {
    let mut s = quiet_state();
    s.aliens = vec![Alien { x: 10, y: 5, tier: AlienTier::Mid, alive: true }];
    s.shields = column_shield(3);
    s.shields[0].health = 1;
    s.player.lives = 1;
    s.player.bullets.push(Bullet::new(10, 6, BulletOwner::Player));
    let s2 = tick(&s, 0, &mut seeded_rng());

    assert_eq!(s2.aliens.len(), 24);
    assert!(s2.aliens.iter().all(|a| a.alive));
    assert_eq!(s2.score, 2);
    assert_eq!(s2.player.lives, 1);
    assert_eq!(s2.shields, s.shields);
}

#[test]
fn tick_aliens_reaching_bottom_end_round() {
    let mut s = quiet_state();
    s.aliens.push(Alien { x: 5, y: 20, tier: AlienTier::Low, alive: true });
    assert_eq!(tick(&s, 0, &mut seeded_rng()).status, GameStatus::Playing);

    s.aliens[1].y = 21;
    assert_eq!(tick(&s, 0, &mut seeded_rng()).status, GameStatus::GameOver);

    s.aliens[1].alive = false;
    assert_eq!(tick(&s, 0, &mut seeded_rng()).status, GameStatus::Playing);
}

// ── toggle_pause ─────────────────────────────────────────────────────────────

#[test]
fn toggle_pause_flips_flag() {
    let s = make_state();
    let paused = toggle_pause(&s);
    assert!(paused.paused);
    assert!(!toggle_pause(&paused).paused);
}
