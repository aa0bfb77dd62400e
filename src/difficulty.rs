//! Difficulty presets and per-round settings, read-only during a round.

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Normal,
    Hard,
}

impl Level {
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Level::Easy => DifficultyProfile {
                alien_speed: 0.5,
                alien_move_interval: 8,
                alien_shoot_interval_ms: 1500,
                player_column_shoot_chance: 0.5,
                alien_rows: 3,
                alien_cols: 5,
            },
            Level::Normal => DifficultyProfile {
                alien_speed: 1.0,
                alien_move_interval: 5,
                alien_shoot_interval_ms: 1000,
                player_column_shoot_chance: 0.7,
                alien_rows: 4,
                alien_cols: 6,
            },
            Level::Hard => DifficultyProfile {
                alien_speed: 1.5,
                alien_move_interval: 3,
                alien_shoot_interval_ms: 1000,
                player_column_shoot_chance: 0.9,
                alien_rows: 5,
                alien_cols: 7,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Easy => "EASY",
            Level::Normal => "NORMAL",
            Level::Hard => "HARD",
        }
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Level::Easy),
            "normal" => Ok(Level::Normal),
            "hard" => Ok(Level::Hard),
            other => Err(format!("unknown difficulty `{other}` (expected easy, normal or hard)")),
        }
    }
}

/// Tuning bundle for one difficulty tier.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyProfile {
    /// Nominal formation speed. Stepping itself is paced by `alien_move_interval`.
    pub alien_speed: f32,
    /// Ticks between formation steps.
    pub alien_move_interval: u32,
    pub alien_shoot_interval_ms: u64,
    /// Probability (0..1) that the shooter is picked from the player's column.
    pub player_column_shoot_chance: f64,
    pub alien_rows: usize,
    pub alien_cols: usize,
}

impl DifficultyProfile {
    pub fn alien_count(&self) -> usize {
        self.alien_rows * self.alien_cols
    }
}

/// Round-wide knobs that do not depend on the difficulty tier.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundSettings {
    pub starting_lives: u32,
    pub round_seconds: u32,
}

impl Default for RoundSettings {
    fn default() -> Self {
        RoundSettings {
            starting_lives: 2,
            round_seconds: 60,
        }
    }
}
