//! Runtime configuration from environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TETRIS_SEED` | piece RNG seed (u32) | clock-derived |
//! | `TETRIS_LOG_FILE` | log output path | none (logging off) |
//! | `TETRIS_LOG` | `tracing` filter directive | `info` |
//! | `TETRIS_CELL_WIDTH` | terminal columns per board cell, 1..=4 | `2` |

use std::path::PathBuf;

use thiserror::Error;

pub const ENV_SEED: &str = "TETRIS_SEED";
pub const ENV_LOG_FILE: &str = "TETRIS_LOG_FILE";
pub const ENV_LOG: &str = "TETRIS_LOG";
pub const ENV_CELL_WIDTH: &str = "TETRIS_CELL_WIDTH";

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_CELL_WIDTH: u16 = 2;
const MAX_CELL_WIDTH: u16 = 4;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an unsigned 32-bit integer, got {value:?}")]
    InvalidSeed { var: &'static str, value: String },

    #[error("{var} must be between 1 and {max}, got {value:?}")]
    InvalidCellWidth {
        var: &'static str,
        value: String,
        max: u16,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fixed piece seed; `None` seeds from the clock
    pub seed: Option<u32>,
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
    pub cell_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            log_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            cell_width: DEFAULT_CELL_WIDTH,
        }
    }
}

impl Config {
    /// Read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();

        if let Some(value) = get(ENV_SEED) {
            let seed: u32 = value.parse().map_err(|_| ConfigError::InvalidSeed {
                var: ENV_SEED,
                value: value.clone(),
            })?;
            config.seed = Some(seed);
        }

        config.log_file = get(ENV_LOG_FILE).map(PathBuf::from);

        if let Some(filter) = get(ENV_LOG) {
            config.log_filter = filter;
        }

        if let Some(value) = get(ENV_CELL_WIDTH) {
            config.cell_width = value
                .parse::<u16>()
                .ok()
                .filter(|w| (1..=MAX_CELL_WIDTH).contains(w))
                .ok_or_else(|| ConfigError::InvalidCellWidth {
                    var: ENV_CELL_WIDTH,
                    value: value.clone(),
                    max: MAX_CELL_WIDTH,
                })?;
        }

        Ok(config)
    }
}
