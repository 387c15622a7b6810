//! Domain-specific error types for the stow engine.
//!
//! Library modules return these typed errors; the CLI boundary in
//! [`commands`](crate::commands) converts them to [`anyhow::Error`] via `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! StowError
//! ├── Config(ConfigError)           : flag and environment resolution
//! ├── Package(PackageError)         : walking a package directory
//! └── Transaction(TransactionError) : a stow/unstow that failed and was rolled back
//!     ├── cause: LinkError
//!     └── rollback: RollbackError   : Vec<LinkError>
//! ```
use std::fmt;
use std::io;

use thiserror::Error;

use crate::path::StowPath;

/// Top-level error type for the stow engine.
#[derive(Error, Debug)]
pub enum StowError {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A package could not be read.
    #[error(transparent)]
    Package(#[from] PackageError),

    /// A stow or unstow transaction failed.
    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Errors that arise from resolving flags and environment variables.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The verbosity level is outside `0..=2`.
    #[error("invalid verbosity value: invalid level {0}")]
    InvalidVerbosity(u8),

    /// A directory could not be made absolute.
    #[error("can't expand path '{path}': {reason}")]
    InvalidDirectory {
        /// The raw value given on the command line or in the environment.
        path: String,
        /// Human-readable reason.
        reason: String,
    },

    /// No package name was given.
    #[error("at least one package name is required")]
    NoPackages,
}

/// Errors that arise while building a package from its directory.
#[derive(Error, Debug)]
pub enum PackageError {
    /// The package directory does not exist under the stow directory.
    #[error("package {0} does not exist")]
    NotFound(String),

    /// Walking the package directory failed.
    #[error("can't read package '{package}': {source}")]
    Walk {
        /// Name of the package being read.
        package: String,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Errors reported by a [`Linker`](crate::linker::Linker).
#[derive(Error, Debug)]
pub enum LinkError {
    /// The destination does not exist or is not a symbolic link.
    ///
    /// Unstow treats this as "already absent" rather than a failure.
    #[error("can't read link {path}: link does not exist: {source}")]
    NotExist {
        /// Path that was expected to be a symbolic link.
        path: StowPath,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Any other filesystem failure.
    #[error("can't {action} {path}: {source}")]
    Io {
        /// Short description of the primitive that failed.
        action: &'static str,
        /// Path the primitive operated on.
        path: StowPath,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl LinkError {
    /// Return `true` for the distinguished "link does not exist" condition.
    #[must_use]
    pub const fn is_not_exist(&self) -> bool {
        matches!(self, Self::NotExist { .. })
    }
}

/// Failures met while undoing a partially applied transaction.
///
/// An empty value means the rollback fully succeeded.
#[derive(Debug, Default)]
pub struct RollbackError {
    errors: Vec<LinkError>,
}

impl RollbackError {
    /// Record one failed compensating step.
    pub fn push(&mut self, err: LinkError) {
        self.errors.push(err);
    }

    /// Return `true` when no compensating step failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failed compensating steps.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }
}

/// Iterates over the failures in the order they happened.
impl<'a> IntoIterator for &'a RollbackError {
    type Item = &'a LinkError;
    type IntoIter = std::slice::Iter<'a, LinkError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for RollbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RollbackError {}

/// Forward operation that was being applied when a transaction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Creating a symlink during stow.
    Link,
    /// Resolving an existing symlink during unstow.
    ReadLink,
    /// Removing a symlink during unstow.
    Unlink,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Link => "link",
            Self::ReadLink => "read link",
            Self::Unlink => "unlink",
        })
    }
}

/// A stow or unstow that stopped on its first failure.
///
/// Both variants carry the failing source/destination pair and cause; they
/// differ in whether the compensating pass restored the target tree.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// Every completed step was undone; the target tree is back to its prior state.
    #[error("can't {operation} '{origin}' -> '{destination}': {cause}. rollback succeeded")]
    RolledBack {
        /// Operation that failed.
        operation: Operation,
        /// Package-side path of the failing pair.
        origin: StowPath,
        /// Target-side path of the failing pair.
        destination: StowPath,
        /// Error returned by the linker.
        #[source]
        cause: LinkError,
    },

    /// At least one compensating step failed too; the target tree is left
    /// partially modified and needs manual attention.
    #[error(
        "can't {operation} '{origin}' -> '{destination}': {cause}. rollback did not succeed: {rollback}"
    )]
    RollbackFailed {
        /// Operation that failed.
        operation: Operation,
        /// Package-side path of the failing pair.
        origin: StowPath,
        /// Target-side path of the failing pair.
        destination: StowPath,
        /// Error returned by the linker.
        #[source]
        cause: LinkError,
        /// Every failure met while rolling back.
        rollback: RollbackError,
    },
}

impl TransactionError {
    /// Return `true` when the rollback left the target tree consistent.
    #[must_use]
    pub const fn rollback_succeeded(&self) -> bool {
        matches!(self, Self::RolledBack { .. })
    }
}
