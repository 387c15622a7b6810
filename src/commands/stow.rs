//! Command: stow or unstow every requested package.
//!
//! Unstow passes the package directory, not the stow directory, as the root
//! its links are expected to point into. `stow -D` therefore removes exactly
//! the links a previous `stow` created for the same package.
use std::io::Write;

use anyhow::{Context as _, Result};

use crate::config::{Action, Config};
use crate::error::{StowError, TransactionError};
use crate::fs::{DryRunFileSystem, FileSystem, LocalFileSystem, VerboseFileSystem};
use crate::linker::FileSystemLinker;
use crate::logging::Log;
use crate::package::Package;
use crate::target::Target;
use crate::walker::FileSystemWalker;

/// Run the configured action on every package, in order.
///
/// Dry-run commands are written to `out`. The first failing package stops
/// the run; packages before it stay applied.
///
/// # Errors
///
/// Returns an error naming the package and action if a package cannot be
/// read or its transaction fails.
pub fn run(config: &Config, log: &dyn Log, out: &mut dyn Write) -> Result<()> {
    log.debug(&format!("dry-run mode enabled: {}", config.dry_run));
    log.debug(&format!("default stow directory: '{}'", config.default_stow_dir));
    log.info(&format!("stow directory set to '{}'", config.stow_dir));
    log.debug(&format!("default target directory: '{}'", config.default_target_dir));
    log.info(&format!("target directory set to '{}'", config.target_dir));

    for name in &config.packages {
        log.stage(&format!("start to {} package '{name}'", config.action));
        apply(config, name, log, out)
            .with_context(|| format!("failed to {} package '{name}'", config.action))?;
        log.info(&format!("finished to {} package '{name}'", config.action));
    }

    Ok(())
}

fn apply(config: &Config, name: &str, log: &dyn Log, out: &mut dyn Write) -> Result<(), StowError> {
    let package = Package::build(&config.stow_dir, name, &FileSystemWalker)?;
    log.debug(&format!("package '{name}' has {} file(s)", package.len()));

    let fs: Box<dyn FileSystem + '_> = if config.dry_run {
        Box::new(DryRunFileSystem::new(out))
    } else {
        Box::new(LocalFileSystem)
    };
    let linker = FileSystemLinker::new(VerboseFileSystem::new(fs));
    let mut target = Target::new(config.target_dir.clone(), linker);

    let outcome = match config.action {
        Action::Stow => target.stow(&config.stow_dir, &package),
        Action::Unstow => target.unstow(&config.stow_dir.join(name), &package),
    };
    if let Err(err) = &outcome {
        report_rollback(name, err, log);
    }
    outcome.map_err(StowError::from)
}

/// Tell whether a failed package left the target directory consistent.
fn report_rollback(name: &str, err: &TransactionError, log: &dyn Log) {
    match err {
        TransactionError::RolledBack { .. } => {
            log.warn(&format!("changes to package '{name}' were rolled back"));
        }
        TransactionError::RollbackFailed { rollback, .. } => {
            for step in rollback {
                log.error(&format!("package '{name}' left partially applied: {step}"));
            }
        }
    }
}
