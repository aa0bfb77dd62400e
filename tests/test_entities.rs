use led_invaders::compute::init_state;
use led_invaders::difficulty::{Level, RoundSettings};
use led_invaders::entities::*;
use led_invaders::frame::Rgb;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(AlienTier::Low, AlienTier::Low);
    assert_ne!(AlienTier::Low, AlienTier::High);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_eq!(BulletOwner::Player, BulletOwner::Player);
    assert_ne!(BulletOwner::Player, BulletOwner::Alien);
    assert_ne!(ShieldRow::Back, ShieldRow::Front);
    assert_ne!(
        GameEvent::Explosion(ExplosionKind::Alien),
        GameEvent::Explosion(ExplosionKind::Bullet)
    );
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(Level::Easy, RoundSettings::default(), 0);
    let mut cloned = original.clone();

    cloned.player.x = 3;
    cloned.score = 999;
    cloned.aliens[0].alive = false;
    cloned.shields[0].health = 0;
    cloned.player.bullets.push(Bullet::new(1, 1, BulletOwner::Player));

    assert_eq!(original.player.x, 16);
    assert_eq!(original.score, 0);
    assert!(original.aliens[0].alive);
    assert_eq!(original.shields[0].health, SHIELD_MAX_HEALTH);
    assert!(original.player.bullets.is_empty());
}

#[test]
fn new_bullet_remembers_its_row() {
    let b = Bullet::new(4, 9, BulletOwner::Alien);
    assert_eq!(b.prev_y, 9);
}

#[test]
fn tiers_follow_row_pairs() {
    let tiers: Vec<AlienTier> = (0..6).map(AlienTier::from_row).collect();
    assert_eq!(
        tiers,
        vec![
            AlienTier::Low,
            AlienTier::Low,
            AlienTier::Mid,
            AlienTier::Mid,
            AlienTier::High,
            AlienTier::High,
        ]
    );
}

#[test]
fn tier_scores_and_colours() {
    assert_eq!(AlienTier::Low.score(), 1);
    assert_eq!(AlienTier::Mid.score(), 2);
    assert_eq!(AlienTier::High.score(), 4);
    assert_eq!(AlienTier::Low.color(), Rgb::new(255, 0, 0));
    assert_eq!(AlienTier::Mid.color(), Rgb::new(255, 128, 0));
    assert_eq!(AlienTier::High.color(), Rgb::new(255, 255, 0));
}

#[test]
fn column_shielded_ignores_destroyed_segments() {
    let mut s = init_state(Level::Normal, RoundSettings::default(), 0);
    assert!(s.column_shielded(3));
    assert!(!s.column_shielded(6));
    for shield in s.shields.iter_mut().filter(|sh| sh.x == 3) {
        shield.health = 0;
    }
    assert!(!s.column_shielded(3));
}

#[test]
fn level_parses_case_insensitively() {
    assert_eq!("easy".parse::<Level>(), Ok(Level::Easy));
    assert_eq!("NORMAL".parse::<Level>(), Ok(Level::Normal));
    assert_eq!("Hard".parse::<Level>(), Ok(Level::Hard));
    assert!("insane".parse::<Level>().is_err());
}

#[test]
fn presets_get_harder() {
    let [easy, normal, hard] = [Level::Easy, Level::Normal, Level::Hard].map(Level::profile);
    assert!(easy.alien_move_interval > normal.alien_move_interval);
    assert!(normal.alien_move_interval > hard.alien_move_interval);
    assert!(easy.alien_shoot_interval_ms >= normal.alien_shoot_interval_ms);
    assert!(easy.player_column_shoot_chance < normal.player_column_shoot_chance);
    assert!(normal.player_column_shoot_chance < hard.player_column_shoot_chance);
    assert_eq!(
        [easy.alien_count(), normal.alien_count(), hard.alien_count()],
        [15, 24, 35]
    );
}
