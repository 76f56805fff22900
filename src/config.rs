//! Match configuration: board setup and the engine command lines.

use crate::{Color, ConfigError, EngineCommand};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Largest board the GTP coordinate scheme can address.
pub const MAX_BOARD_SIZE: u32 = 25;

/// Board set up sent to both engines before play.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct GameSettings {
    /// Board size (lines per side).
    #[serde(default = "default_board_size")]
    board_size: u32,

    /// Komi as a decimal string, passed to engines verbatim.
    #[serde(default = "default_komi")]
    komi: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            komi: default_komi(),
        }
    }
}

/// Everything needed to run one match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Board size and komi.
    #[serde(flatten)]
    settings: GameSettings,

    /// Command line for the Black engine.
    #[serde(default = "default_engine_command")]
    black: String,

    /// Command line for the White engine.
    #[serde(default = "default_engine_command")]
    white: String,
}

fn default_board_size() -> u32 {
    9
}

fn default_komi() -> String {
    "5.5".to_string()
}

fn default_engine_command() -> String {
    "gnugo --mode gtp".to_string()
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            settings: GameSettings::default(),
            black: default_engine_command(),
            white: default_engine_command(),
        }
    }
}

impl MatchConfig {
    /// Loads configuration from TOML file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            board_size = config.settings.board_size,
            komi = %config.settings.komi,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Applies explicit overrides on top of this configuration.
    pub fn with_overrides(
        mut self,
        black: Option<String>,
        white: Option<String>,
        board_size: Option<u32>,
        komi: Option<String>,
    ) -> Self {
        if let Some(black) = black {
            self.black = black;
        }
        if let Some(white) = white {
            self.white = white;
        }
        if let Some(board_size) = board_size {
            self.settings.board_size = board_size;
        }
        if let Some(komi) = komi {
            self.settings.komi = komi;
        }
        self
    }

    /// Checks board size, komi and both command lines.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.settings.board_size;
        if !(1..=MAX_BOARD_SIZE).contains(&size) {
            return Err(ConfigError::new(format!(
                "Board size {} is outside 1..={}",
                size, MAX_BOARD_SIZE
            )));
        }
        if self.settings.komi.trim().parse::<f64>().is_err() {
            return Err(ConfigError::new(format!(
                "Komi {:?} is not a decimal number",
                self.settings.komi
            )));
        }
        self.engine_command(Color::Black)?;
        self.engine_command(Color::White)?;
        Ok(())
    }

    /// Parsed command line for the engine playing `color`.
    pub fn engine_command(&self, color: Color) -> Result<EngineCommand, ConfigError> {
        let line = match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        };
        EngineCommand::parse(line)
    }
}
