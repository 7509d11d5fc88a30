//! Application configuration loaded from `pigpen.toml`.

use derive_getters::Getters;
use derive_more::{Display, Error};
use pigpen_advisor::{HttpAdvisor, LookaheadAdvisor, SharedAdvisor};
use pigpen_board::{BoardConfig, Game, GameError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable that overrides `advisor.url`.
pub const ADVISOR_URL_ENV: &str = "PIGPEN_ADVISOR_URL";

/// Top-level configuration. Every section and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Board shape, start cell and opening rules.
    board: BoardConfig,
    /// Where blocking advice comes from.
    advisor: AdvisorSettings,
    /// Bind address for `serve`.
    server: ServerSettings,
}

/// Advisor section.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorSettings {
    /// Remote advisory service; the built-in lookahead advisor when absent.
    url: Option<String>,
    /// Per-request timeout in milliseconds.
    timeout_ms: u64,
}

impl AdvisorSettings {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            url: None,
            timeout_ms: 5_000,
        }
    }
}

/// Server section.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind.
    host: String,
    /// Port to bind.
    port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text and validates it.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config
            .board
            .validate()
            .map_err(|e| ConfigError::new(format!("Invalid board: {}", e.message)))?;
        info!(start = %config.board.start(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies environment overrides (`PIGPEN_ADVISOR_URL`).
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(ADVISOR_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => self.with_advisor_url(url),
            _ => self,
        }
    }

    /// Points the advisor at a remote service.
    pub fn with_advisor_url(mut self, url: impl Into<String>) -> Self {
        self.advisor.url = Some(url.into());
        self
    }

    /// Drops any remote advisor URL, selecting the built-in advisor.
    pub fn without_advisor_url(mut self) -> Self {
        self.advisor.url = None;
        self
    }

    /// Creates a game on the configured board.
    ///
    /// A seed makes obstacles and pig tie-breaks reproducible.
    #[instrument(skip(self))]
    pub fn new_game(&self, seed: Option<u64>) -> Result<Game, GameError> {
        match seed {
            Some(seed) => Game::seeded(self.board.clone(), seed),
            None => Game::from_entropy(self.board.clone()),
        }
    }

    /// Builds the configured advisor: remote when a URL is set, otherwise
    /// the built-in lookahead search on this board.
    #[instrument(skip(self))]
    pub fn build_advisor(&self) -> Result<SharedAdvisor, ConfigError> {
        if let Some(url) = &self.advisor.url {
            info!(%url, "Using remote advisor");
            let advisor = HttpAdvisor::new(url, self.advisor.timeout())
                .map_err(|e| ConfigError::new(e.message))?;
            return Ok(Arc::new(advisor));
        }
        let grid = self
            .board
            .validate()
            .map_err(|e| ConfigError::new(format!("Invalid board: {}", e.message)))?;
        info!("Using built-in lookahead advisor");
        Ok(Arc::new(LookaheadAdvisor::new(Arc::new(grid))))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pigpen_board::{BoardShape, Coord};

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").expect("empty config");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server().port(), &5000);
        assert_eq!(config.advisor().timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [board]
            opening_blocks = 2
            start = { col = 3, row = 3 }
            shape = { kind = "rectangle", min_col = 0, max_col = 6, min_row = 0, max_row = 6 }

            [board.obstacles]
            min = 0
            max = 4

            [advisor]
            url = "http://localhost:5000"
            timeout_ms = 250

            [server]
            port = 8080
            "#,
        )
        .expect("valid config");
        assert_eq!(config.board().opening_blocks(), &2);
        assert_eq!(config.board().start(), &Coord::new(3, 3));
        assert_eq!(config.board().shape(), &BoardShape::rectangle(7, 7));
        assert_eq!(config.advisor().url().as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.advisor().timeout(), Duration::from_millis(250));
        assert_eq!(config.server().port(), &8080);
        assert_eq!(config.server().host(), "127.0.0.1");
    }

    #[test]
    fn test_invalid_board_rejected() {
        let err = AppConfig::from_toml("[board]\nstart = { col = 0, row = 0 }\n").unwrap_err();
        assert!(err.message.contains("Invalid board"));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(AppConfig::from_toml("board = 3").is_err());
    }
}
