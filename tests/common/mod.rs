// Shared helpers for integration tests.
//
// Provides a temporary stow directory and target directory plus a fluent
// builder so each integration test can lay out packages without repeating
// filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use stow::commands;
use stow::config::{Action, Config};
use stow::logging::{Logger, Verbosity};
use stow::path::StowPath;

/// An isolated `stow/` + `home/` pair backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory holding `stow/` and `home/`.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context with empty `stow/` and `home/` directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("stow")).expect("create stow dir");
        std::fs::create_dir_all(root.path().join("home")).expect("create home dir");
        Self { root }
    }

    /// Absolute path of `relative` inside the temporary directory.
    pub fn path(&self, relative: &str) -> StowPath {
        StowPath::from(self.root.path()).join(relative)
    }

    /// The stow directory.
    pub fn stow_dir(&self) -> StowPath {
        self.path("stow")
    }

    /// The target directory.
    pub fn target_dir(&self) -> StowPath {
        self.path("home")
    }

    /// Configuration running `action` on `packages`, quiet and for real.
    pub fn config(&self, action: Action, packages: &[&str]) -> Config {
        Config {
            stow_dir: self.stow_dir(),
            target_dir: self.target_dir(),
            default_stow_dir: ".".to_string(),
            default_target_dir: self.path(""),
            action,
            dry_run: false,
            verbosity: Verbosity::Error,
            packages: packages.iter().map(ToString::to_string).collect(),
        }
    }

    /// Run `config` and return what was printed on stdout, with the
    /// temporary directory replaced by `[ROOT]`.
    pub fn run(&self, config: &Config) -> anyhow::Result<String> {
        let mut out = Vec::new();
        commands::stow::run(config, &Logger::new(config.verbosity), &mut out)?;
        Ok(String::from_utf8(out)
            .expect("utf-8 output")
            .replace(self.path("").as_str(), "[ROOT]"))
    }

    /// Stow `packages`, panicking on failure.
    pub fn stow(&self, packages: &[&str]) {
        self.run(&self.config(Action::Stow, packages))
            .expect("stow should succeed");
    }

    /// Unstow `packages`, panicking on failure.
    pub fn unstow(&self, packages: &[&str]) {
        self.run(&self.config(Action::Unstow, packages))
            .expect("unstow should succeed");
    }

    /// Where the symlink at `home/<relative>` points, if it is one.
    pub fn link_of(&self, relative: &str) -> Option<StowPath> {
        std::fs::read_link(self.target_dir().join(relative).as_std_path())
            .ok()
            .map(StowPath::from)
    }

    /// Create a symlink at `home/<relative>` pointing to `source`.
    #[cfg(unix)]
    pub fn symlink_in_target(&self, source: &StowPath, relative: &str) {
        let destination = self.target_dir().join(relative);
        std::fs::create_dir_all(destination.dir().as_std_path()).expect("create link parent");
        std::os::unix::fs::symlink(source.as_std_path(), destination.as_std_path())
            .expect("create symlink");
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write `stow/<package>/<relative>`, creating parent folders.
    pub fn with_package_file(self, package: &str, relative: &str) -> Self {
        let path = self.ctx.stow_dir().join(package).join(relative);
        write(&path, &format!("{package}:{relative}"));
        self
    }

    /// Write a regular file at `home/<relative>`, creating parent folders.
    pub fn with_target_file(self, relative: &str) -> Self {
        let path = self.ctx.target_dir().join(relative);
        write(&path, "existing");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write(path: &StowPath, content: &str) {
    std::fs::create_dir_all(path.dir().as_std_path()).expect("create parent dir");
    std::fs::write(path.as_std_path(), content).expect("write file");
}

/// The `vim` package used across tests.
pub fn vim() -> IntegrationTestContext {
    TestContextBuilder::new()
        .with_package_file("vim", ".vimrc")
        .with_package_file("vim", ".vim/after/ftplugin/go.vim")
        .with_package_file("vim", ".vim/colors/dark.vim")
        .build()
}
