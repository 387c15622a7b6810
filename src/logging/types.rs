//! Core logging types: the [`Verbosity`] scale and the [`Log`] trait.
use std::fmt;

use tracing_subscriber::filter::LevelFilter;

use crate::error::ConfigError;

/// How chatty the console output is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Only errors (`-v 0`).
    #[default]
    Error,
    /// Progress messages and every filesystem call (`-v 1`).
    Info,
    /// Everything, including failed calls and skipped files (`-v 2`).
    Debug,
}

impl Verbosity {
    /// Tracing filter matching this verbosity.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
        }
    }

    /// Map a numeric `-v` level to a verbosity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVerbosity`] for anything above 2.
    pub const fn from_level(level: u8) -> Result<Self, ConfigError> {
        match level {
            0 => Ok(Self::Error),
            1 => Ok(Self::Info),
            2 => Ok(Self::Debug),
            other => Err(ConfigError::InvalidVerbosity(other)),
        }
    }
}

impl TryFrom<u8> for Verbosity {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, ConfigError> {
        Self::from_level(level)
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Info => "info",
            Self::Debug => "debug",
        })
    }
}

/// Abstraction over logging backends.
///
/// Command code logs through this trait so tests can swap in a recording
/// implementation.
pub trait Log {
    /// Log a stage header (one per package).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message.
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
}
