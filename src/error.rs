use thiserror::Error;

use crate::geometry::Direction;

/// Startup problems.  Any of these aborts the process before the first frame.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{table} orientation table has no entry for {direction:?}")]
    MissingOrientation {
        table: &'static str,
        direction: Direction,
    },

    #[error("resource `{0}` could not be loaded")]
    MissingResource(String),

    #[error("invalid value `{value}` for {key}")]
    InvalidSetting { key: &'static str, value: String },

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
