//! Symlink farm manager.
//!
//! Installs ("stows") the files of a package folder into a target directory
//! by creating symbolic links, and removes ("unstows") exactly the links a
//! package owns. Both directions are transactional: the first failure undoes
//! every change made so far.
//!
//! The public API is organised into four layers:
//!
//! - **[`path`], [`package`], [`walker`]**: values describing what to link
//! - **[`fs`], [`linker`]**: filesystem primitives and the link capability
//!   built on them, with real, dry-run and logged variants
//! - **[`target`]**: the stow/unstow transaction engine
//! - **[`commands`]**: top-level orchestration driven by [`config`]
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod linker;
pub mod logging;
pub mod package;
pub mod path;
pub mod target;
pub mod version;
pub mod walker;
