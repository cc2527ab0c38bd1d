//! Runtime configuration for board-tui.
//!
//! Three layers, later ones winning: built-in defaults, the preferences file,
//! and command-line flags. Paths can additionally be overridden through
//! environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::board::{BoardConfig, Orientation, STARTING_FEN};
use crate::ui::ThemeName;

/// Default directory for rolling log files.
const DEFAULT_LOG_DIR: &str = "logs";

/// Default delay between replayed positions.
pub const DEFAULT_REPLAY_INTERVAL_MS: u64 = 1500;

const PREFERENCES_DIR: &str = ".board-tui";
const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access preferences file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed preferences file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode preferences for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    White,
    Black,
}

impl From<SideArg> for Orientation {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::White => Orientation::WhiteAtBottom,
            SideArg::Black => Orientation::BlackAtBottom,
        }
    }
}

/// Interactive chess board for the terminal.
#[derive(Debug, Parser)]
#[command(name = "board-tui", version, about)]
pub struct Cli {
    /// Starting position in FEN (four or six fields).
    #[arg(long)]
    pub fen: Option<String>,

    /// Which side is drawn at the bottom.
    #[arg(long, value_enum)]
    pub orientation: Option<SideArg>,

    /// Allow moving either side's pieces regardless of whose turn it is.
    #[arg(long)]
    pub practice: bool,

    /// Start with board input disabled.
    #[arg(long)]
    pub locked: bool,

    /// Replay positions from a file, one FEN per line.
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Delay between replayed positions.
    #[arg(long, default_value_t = DEFAULT_REPLAY_INTERVAL_MS)]
    pub replay_interval_ms: u64,

    /// Directory for log files.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Name shown for the local viewer.
    #[arg(long)]
    pub viewer: Option<String>,

    /// Colour theme.
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for ThemeName {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Dark => ThemeName::Dark,
            ThemeArg::Light => ThemeName::Light,
        }
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub orientation: Orientation,
    pub enforce_turn_ownership: bool,
    pub theme: ThemeName,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            enforce_turn_ownership: BoardConfig::default().enforce_turn_ownership,
            theme: ThemeName::default(),
        }
    }
}

impl Preferences {
    /// Load preferences from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No preferences file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write preferences to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }
}

/// Get the directory log files are written to.
///
/// Priority:
/// 1. `BOARD_TUI_LOG_DIR` env variable if set
/// 2. `logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BOARD_TUI_LOG_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}

/// Get the preferences file path.
///
/// Priority:
/// 1. `BOARD_TUI_PREFS` env variable if set
/// 2. `~/.board-tui/preferences.json` as fallback
pub fn get_preferences_path() -> PathBuf {
    if let Ok(path) = std::env::var("BOARD_TUI_PREFS") {
        return PathBuf::from(path);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PREFERENCES_DIR)
        .join(PREFERENCES_FILE)
}

/// Fully resolved start-up settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub fen: String,
    pub orientation: Orientation,
    pub board: BoardConfig,
    pub locked: bool,
    pub theme: ThemeName,
    pub replay: Option<PathBuf>,
    pub replay_interval: Duration,
    pub log_dir: PathBuf,
    pub viewer: Option<String>,
}

impl Settings {
    /// Merge `cli` over `prefs`. `log_dir` falls back to [`get_log_dir`].
    pub fn resolve(cli: Cli, prefs: Preferences) -> Self {
        Self {
            fen: cli.fen.unwrap_or_else(|| STARTING_FEN.to_string()),
            orientation: cli.orientation.map(Into::into).unwrap_or(prefs.orientation),
            board: BoardConfig {
                enforce_turn_ownership: !cli.practice && prefs.enforce_turn_ownership,
            },
            locked: cli.locked,
            theme: cli.theme.map(Into::into).unwrap_or(prefs.theme),
            replay: cli.replay,
            replay_interval: Duration::from_millis(cli.replay_interval_ms),
            log_dir: cli.log_dir.unwrap_or_else(get_log_dir),
            viewer: cli.viewer,
        }
    }
}
