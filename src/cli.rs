//! Command-line interface definition.
use clap::Parser;

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "stow",
    about = "Symlink packages from a stow directory into a target directory",
    long_about = "Symlink every file of a package folder from the stow directory into a \
                  target directory.\n\nPackages are managed individually while still sharing \
                  a single file tree. A failing package is rolled back before stow exits.",
    disable_version_flag = true
)]
pub struct Cli {
    /// Set the stow directory instead of using the `STOW_DIR` environment
    /// variable or the current directory
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub stow_dir: Option<String>,

    /// Set the target directory instead of using the parent of the stow
    /// directory
    #[arg(short = 't', long = "target", value_name = "DIR")]
    pub target_dir: Option<String>,

    /// Delete the packages from the target directory instead of installing
    /// them
    #[arg(short = 'D', long = "delete")]
    pub unstow: bool,

    /// Do not execute any operations that modify the filesystem, only print
    /// commands
    #[arg(short = 'n', long = "simulate")]
    pub dry_run: bool,

    /// Write verbose output to stderr, from 0 (quiet) to 2 (chatty)
    #[arg(short = 'v', long = "verbose", value_name = "LEVEL", default_value_t = 0)]
    pub verbose: u8,

    /// Display version information and exit
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    /// Packages to install: folders at the root of the stow directory
    #[arg(value_name = "PACKAGE", required_unless_present = "version")]
    pub packages: Vec<String>,
}
