//! Pigpen - trap-the-pig application
//!
//! Wires the board engine to its advisors for the `pigpen` binary.
//!
//! # Architecture
//!
//! - **Config**: `pigpen.toml` plus environment overrides
//! - **Play**: text-mode loop for a human blocker
//! - **Orchestrator**: auto-play with an advisor on the blocking side
//!
//! # Example
//!
//! ```no_run
//! use pigpen::{AppConfig, AutoPlayer};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load("pigpen.toml")?.with_env_overrides();
//! let game = config.new_game(Some(7))?;
//! let advisor = config.build_advisor()?;
//!
//! let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let summary = AutoPlayer::new(game, advisor, 100, tx).run().await?;
//! println!("{:?}", summary.stopped);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod orchestrator;
mod play;

// Crate-level exports - Configuration
pub use config::{ADVISOR_URL_ENV, AdvisorSettings, AppConfig, ConfigError, ServerSettings};

// Crate-level exports - Auto-play
pub use orchestrator::{AutoPlayer, AutoSummary, GameEvent, StopReason};

// Crate-level exports - Text play
pub use play::{CommandError, PlayCommand, run_text};
