//! The stow/unstow transaction engine.
//!
//! A [`Target`] applies one link operation per package file through its
//! [`Linker`] and records every completed step. The first failure stops the
//! walk and every recorded step is compensated, oldest first: unlink undoes
//! a link during stow, link undoes an unlink during unstow.
//!
//! There is no filesystem transaction underneath, so the guarantee is only
//! as good as the compensating calls. When one of them fails the caller gets
//! [`TransactionError::RollbackFailed`] and the target tree needs a human.
use crate::error::{LinkError, Operation, RollbackError, TransactionError};
use crate::linker::Linker;
use crate::package::Package;
use crate::path::StowPath;

/// One completed step of the current call.
#[derive(Debug)]
struct Statement {
    source: StowPath,
    destination: StowPath,
}

/// How to undo a [`Statement`].
#[derive(Debug, Clone, Copy)]
enum Compensation {
    Unlink,
    Relink,
}

/// A directory into which packages are stowed.
#[derive(Debug)]
pub struct Target<L> {
    root: StowPath,
    linker: L,
}

impl<L: Linker> Target<L> {
    /// Create a target rooted at `root`, mutating it through `linker`.
    pub const fn new(root: StowPath, linker: L) -> Self {
        Self { root, linker }
    }

    /// Root of the target tree.
    pub const fn root(&self) -> &StowPath {
        &self.root
    }

    /// Consume the target and return its linker.
    pub fn into_linker(self) -> L {
        self.linker
    }

    /// Link every file of `package` from `stow_root/NAME/FILE` to `root/FILE`.
    ///
    /// # Errors
    ///
    /// Stops at the first failing link and unlinks every link created so far.
    /// Returns [`TransactionError::RolledBack`] if that succeeded and
    /// [`TransactionError::RollbackFailed`] otherwise.
    pub fn stow(&mut self, stow_root: &StowPath, package: &Package) -> Result<(), TransactionError> {
        let package_root = stow_root.join(package.name());
        let mut applied = Vec::with_capacity(package.len());

        for file in package.files() {
            let statement = Statement {
                source: package_root.join(file),
                destination: self.root.join(file),
            };
            if let Err(cause) = self.linker.link(&statement.source, &statement.destination) {
                return Err(self.abort(
                    Operation::Link,
                    statement,
                    cause,
                    &applied,
                    Compensation::Unlink,
                ));
            }
            tracing::debug!("linked {} -> {}", statement.destination, statement.source);
            applied.push(statement);
        }

        Ok(())
    }

    /// Remove every link of `package` that points to `stow_root/FILE`.
    ///
    /// Destinations that are missing, are not symlinks, or point elsewhere are
    /// left untouched. The expected source has no package-name segment, so
    /// callers pass the package directory itself as `stow_root` to undo a
    /// [`stow`](Self::stow).
    ///
    /// # Errors
    ///
    /// Stops at the first failing read or unlink and re-links every link
    /// removed so far. Returns [`TransactionError::RolledBack`] if that
    /// succeeded and [`TransactionError::RollbackFailed`] otherwise.
    pub fn unstow(
        &mut self,
        stow_root: &StowPath,
        package: &Package,
    ) -> Result<(), TransactionError> {
        let mut applied = Vec::new();

        for file in package.files() {
            let statement = Statement {
                source: stow_root.join(file),
                destination: self.root.join(file),
            };

            let current = match self.linker.read_link(&statement.destination) {
                Ok(current) => current,
                Err(cause) if cause.is_not_exist() => {
                    tracing::debug!("skip {}: no link", statement.destination);
                    continue;
                }
                Err(cause) => {
                    return Err(self.abort(
                        Operation::ReadLink,
                        statement,
                        cause,
                        &applied,
                        Compensation::Relink,
                    ));
                }
            };

            if current != statement.source {
                tracing::debug!(
                    "skip {}: points to {current}, not {}",
                    statement.destination,
                    statement.source
                );
                continue;
            }

            if let Err(cause) = self.linker.unlink(&statement.destination) {
                return Err(self.abort(
                    Operation::Unlink,
                    statement,
                    cause,
                    &applied,
                    Compensation::Relink,
                ));
            }
            tracing::debug!("unlinked {}", statement.destination);
            applied.push(statement);
        }

        Ok(())
    }

    fn abort(
        &mut self,
        operation: Operation,
        failed: Statement,
        cause: LinkError,
        applied: &[Statement],
        compensation: Compensation,
    ) -> TransactionError {
        tracing::warn!(
            "can't {operation} {}, rolling back {} step(s)",
            failed.destination,
            applied.len()
        );
        let rollback = self.rollback(applied, compensation);
        let Statement {
            source: origin,
            destination,
        } = failed;

        if rollback.is_empty() {
            return TransactionError::RolledBack {
                operation,
                origin,
                destination,
                cause,
            };
        }

        tracing::warn!("rollback did not succeed: {} step(s) failed", rollback.len());
        TransactionError::RollbackFailed {
            operation,
            origin,
            destination,
            cause,
            rollback,
        }
    }

    /// Undo `applied` oldest first. Every step is attempted.
    fn rollback(&mut self, applied: &[Statement], compensation: Compensation) -> RollbackError {
        let mut errors = RollbackError::default();
        for statement in applied {
            let undone = match compensation {
                Compensation::Unlink => self.linker.unlink(&statement.destination),
                Compensation::Relink => self.linker.link(&statement.source, &statement.destination),
            };
            if let Err(err) = undone {
                tracing::debug!("rollback of {} failed: {err}", statement.destination);
                errors.push(err);
            }
        }
        errors
    }
}
