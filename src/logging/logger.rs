//! Console logger backed by [`tracing`].
use super::subscriber::STAGE_TARGET;
use super::types::{Log, Verbosity};

/// Implement the methods of [`Log`] by delegating to inherent methods of the
/// same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger emitting `tracing` events.
///
/// Messages above the logger's verbosity are dropped before reaching
/// `tracing`, so a logger can be quieter than the installed subscriber.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    verbosity: Verbosity,
}

impl Logger {
    /// Create a new logger.
    #[must_use]
    pub const fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Verbosity this logger was created with.
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Return `true` if messages of `level` are emitted.
    #[must_use]
    pub fn allows(&self, level: Verbosity) -> bool {
        self.verbosity >= level
    }

    /// Log an error message. Always emitted.
    pub fn error(&self, msg: &str) {
        if self.allows(Verbosity::Error) {
            tracing::error!("{msg}");
        }
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        if self.allows(Verbosity::Info) {
            tracing::warn!("{msg}");
        }
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        if self.allows(Verbosity::Info) {
            tracing::info!(target: STAGE_TARGET, "{msg}");
        }
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        if self.allows(Verbosity::Info) {
            tracing::info!("{msg}");
        }
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        if self.allows(Verbosity::Debug) {
            tracing::debug!("{msg}");
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);
}
