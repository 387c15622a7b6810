#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for unstowing packages against a real temporary
//! directory.

mod common;

use common::*;
use stow::config::Action;

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

/// Stow followed by unstow leaves no link behind and keeps package files.
#[test]
fn unstow_after_stow_removes_every_link() {
    let ctx = vim();
    ctx.stow(&["vim"]);

    ctx.unstow(&["vim"]);

    for file in [".vimrc", ".vim/after/ftplugin/go.vim", ".vim/colors/dark.vim"] {
        assert_eq!(ctx.link_of(file), None, "{file} should be unlinked");
        assert!(ctx.stow_dir().join("vim").join(file).as_std_path().is_file());
    }
}

/// Unstowing one package leaves the links of another alone.
#[test]
fn unstow_only_touches_its_package() {
    let ctx = TestContextBuilder::new()
        .with_package_file("vim", ".vimrc")
        .with_package_file("git", ".gitconfig")
        .build();
    ctx.stow(&["vim", "git"]);

    ctx.unstow(&["vim"]);

    assert_eq!(ctx.link_of(".vimrc"), None);
    assert_eq!(
        ctx.link_of(".gitconfig"),
        Some(ctx.stow_dir().join("git/.gitconfig"))
    );
}

// ---------------------------------------------------------------------------
// Skips
// ---------------------------------------------------------------------------

/// A second unstow finds nothing to remove and succeeds.
#[test]
fn unstow_twice_is_idempotent() {
    let ctx = vim();
    ctx.stow(&["vim"]);
    ctx.unstow(&["vim"]);

    ctx.unstow(&["vim"]);

    assert_eq!(ctx.link_of(".vimrc"), None);
}

/// Regular files at a destination are not removed.
#[test]
fn unstow_keeps_regular_files() {
    let ctx = TestContextBuilder::new()
        .with_package_file("zsh", ".zshrc")
        .with_target_file(".zshrc")
        .build();

    ctx.unstow(&["zsh"]);

    assert!(ctx.target_dir().join(".zshrc").as_std_path().is_file());
}

/// Links pointing somewhere else are not owned by the package.
#[cfg(unix)]
#[test]
fn unstow_keeps_foreign_links() {
    let ctx = TestContextBuilder::new()
        .with_package_file("zsh", ".zshrc")
        .with_package_file("other", ".zshrc")
        .build();
    let foreign = ctx.stow_dir().join("other/.zshrc");
    ctx.symlink_in_target(&foreign, ".zshrc");

    ctx.unstow(&["zsh"]);

    assert_eq!(ctx.link_of(".zshrc"), Some(foreign));
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

/// Dry-run unstow prints the removals and leaves the links in place.
#[test]
fn unstow_dry_run_prints_removals() {
    let ctx = vim();
    ctx.stow(&["vim"]);
    let mut config = ctx.config(Action::Unstow, &["vim"]);
    config.dry_run = true;

    let printed = ctx.run(&config).unwrap();

    insta::assert_snapshot!(printed.trim_end(), @r"
rm [ROOT]/home/.vim/after/ftplugin/go.vim
rm [ROOT]/home/.vim/colors/dark.vim
rm [ROOT]/home/.vimrc
");
    assert_eq!(
        ctx.link_of(".vimrc"),
        Some(ctx.stow_dir().join("vim/.vimrc"))
    );
}

/// Unstowing a package that does not exist is an error.
#[test]
fn unstow_unknown_package_fails() {
    let ctx = vim();

    let err = ctx
        .run(&ctx.config(Action::Unstow, &["emacs"]))
        .unwrap_err();

    assert_eq!(err.to_string(), "failed to unstow package 'emacs'");
}
