//! Configuration: an optional TOML file, then command-line overrides.
//!
//! ```toml
//! difficulty = "hard"
//! starting_lives = 2
//! round_seconds = 60
//! tick_ms = 100
//! mirror = true
//!
//! [[panels]]
//! index = 0
//! endpoint = "tcp://192.168.1.50:7000"
//!
//! [[panels]]
//! index = 1
//! endpoint = "/dev/ttyUSB1"
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::difficulty::{Level, RoundSettings};
use crate::error::ConfigError;
use crate::frame::PANEL_COUNT;
use crate::link::Endpoint;

#[derive(Parser, Debug, Default)]
#[command(name = "led_invaders")]
#[command(about = "Space invaders on a 4×3 wall of 8×8 LED panels")]
pub struct Cli {
    /// Config file (defaults to <config dir>/led_invaders/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// easy, normal or hard
    #[arg(long)]
    pub difficulty: Option<Level>,

    /// Panel link, repeatable: INDEX=ENDPOINT (index 0..12)
    #[arg(long = "panel", value_name = "INDEX=ENDPOINT")]
    pub panels: Vec<String>,

    /// Seed for alien fire decisions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not draw the terminal mirror
    #[arg(long)]
    pub no_mirror: bool,

    #[arg(long, default_value = "led_invaders.log")]
    pub log_file: PathBuf,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PanelConfig {
    pub index: usize,
    pub endpoint: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub difficulty: Level,
    pub starting_lives: u32,
    pub round_seconds: u32,
    pub tick_ms: u64,
    pub mirror: bool,
    pub panels: Vec<PanelConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let round = RoundSettings::default();
        Config {
            difficulty: Level::Normal,
            starting_lives: round.starting_lives,
            round_seconds: round.round_seconds,
            tick_ms: 100,
            mirror: true,
            panels: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("led_invaders").join("config.toml"))
    }

    /// Explicit path if given, else the default path if it exists, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(level) = cli.difficulty {
            self.difficulty = level;
        }
        for spec in &cli.panels {
            let panel = parse_panel_spec(spec)?;
            self.panels.retain(|p| p.index != panel.index);
            self.panels.push(panel);
        }
        if cli.no_mirror {
            self.mirror = false;
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be positive".into()));
        }
        if self.starting_lives == 0 || self.round_seconds == 0 {
            return Err(ConfigError::Invalid(
                "starting_lives and round_seconds must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn round_settings(&self) -> RoundSettings {
        RoundSettings {
            starting_lives: self.starting_lives,
            round_seconds: self.round_seconds,
        }
    }

    /// Parsed panel endpoints; later entries for the same index win.
    pub fn endpoints(&self) -> Result<Vec<(usize, Endpoint)>, ConfigError> {
        let mut out: Vec<(usize, Endpoint)> = Vec::new();
        for panel in &self.panels {
            let spec = format!("{}={}", panel.index, panel.endpoint);
            if panel.index >= PANEL_COUNT {
                return Err(ConfigError::InvalidPanel(spec));
            }
            let endpoint = panel
                .endpoint
                .parse::<Endpoint>()
                .map_err(|_| ConfigError::InvalidPanel(spec))?;
            out.retain(|(index, _)| *index != panel.index);
            out.push((panel.index, endpoint));
        }
        Ok(out)
    }
}

fn parse_panel_spec(spec: &str) -> Result<PanelConfig, ConfigError> {
    let invalid = || ConfigError::InvalidPanel(spec.to_string());
    let (index, endpoint) = spec.split_once('=').ok_or_else(invalid)?;
    let index: usize = index.trim().parse().map_err(|_| invalid())?;
    if index >= PANEL_COUNT || endpoint.trim().parse::<Endpoint>().is_err() {
        return Err(invalid());
    }
    Ok(PanelConfig {
        index,
        endpoint: endpoint.trim().to_string(),
    })
}
