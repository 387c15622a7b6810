#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for stowing packages against a real temporary directory.

mod common;

use common::*;
use stow::config::Action;

// ---------------------------------------------------------------------------
// Linking
// ---------------------------------------------------------------------------

/// Every package file gets a symlink in the target pointing back to it.
#[test]
fn stow_links_every_file() {
    let ctx = vim();

    ctx.stow(&["vim"]);

    for file in [".vimrc", ".vim/after/ftplugin/go.vim", ".vim/colors/dark.vim"] {
        assert_eq!(
            ctx.link_of(file),
            Some(ctx.stow_dir().join("vim").join(file)),
            "{file} should be linked"
        );
    }
}

/// Several packages share a single target tree.
#[test]
fn stow_multiple_packages_into_shared_folders() {
    let ctx = TestContextBuilder::new()
        .with_package_file("vim", ".config/vim/vimrc")
        .with_package_file("git", ".config/git/config")
        .build();

    ctx.stow(&["vim", "git"]);

    assert_eq!(
        ctx.link_of(".config/vim/vimrc"),
        Some(ctx.stow_dir().join("vim/.config/vim/vimrc"))
    );
    assert_eq!(
        ctx.link_of(".config/git/config"),
        Some(ctx.stow_dir().join("git/.config/git/config"))
    );
}

/// Stowing twice leaves the same links in place.
#[test]
fn stow_is_repeatable() {
    let ctx = vim();

    ctx.stow(&["vim"]);
    ctx.stow(&["vim"]);

    assert_eq!(
        ctx.link_of(".vimrc"),
        Some(ctx.stow_dir().join("vim/.vimrc"))
    );
}

/// An existing regular file at a destination is replaced by the link.
#[test]
fn stow_replaces_existing_file() {
    let ctx = TestContextBuilder::new()
        .with_package_file("zsh", ".zshrc")
        .with_target_file(".zshrc")
        .build();

    ctx.stow(&["zsh"]);

    assert_eq!(ctx.link_of(".zshrc"), Some(ctx.stow_dir().join("zsh/.zshrc")));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

/// A missing package fails before anything is linked.
#[test]
fn stow_unknown_package_fails() {
    let ctx = vim();

    let err = ctx
        .run(&ctx.config(Action::Stow, &["emacs"]))
        .unwrap_err();

    assert_eq!(
        format!("{err:#}"),
        "failed to stow package 'emacs': package emacs does not exist"
    );
}

/// A package that fails halfway is rolled back; earlier packages stay.
#[test]
fn stow_failure_rolls_back_the_package() {
    let ctx = TestContextBuilder::new()
        .with_package_file("git", ".gitconfig")
        .with_package_file("vim", ".vim/colors/dark.vim")
        .with_package_file("vim", ".vimrc")
        // a non-empty directory cannot be replaced by a link
        .with_target_file(".vimrc/keep")
        .build();

    let err = ctx
        .run(&ctx.config(Action::Stow, &["git", "vim"]))
        .unwrap_err();

    let msg = format!("{err:#}");
    assert!(msg.starts_with("failed to stow package 'vim'"), "{msg}");
    assert!(msg.contains("rollback succeeded"), "{msg}");
    assert_eq!(ctx.link_of(".vim/colors/dark.vim"), None);
    assert_eq!(
        ctx.link_of(".gitconfig"),
        Some(ctx.stow_dir().join("git/.gitconfig"))
    );
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

/// Dry run prints the commands in package order and changes nothing.
#[test]
fn stow_dry_run_prints_commands() {
    let ctx = TestContextBuilder::new()
        .with_package_file("vim", ".vim/after/ftplugin/go.vim")
        .with_package_file("vim", ".vimrc")
        .with_target_file(".vimrc")
        .build();
    let mut config = ctx.config(Action::Stow, &["vim"]);
    config.dry_run = true;

    let printed = ctx.run(&config).unwrap();

    insta::assert_snapshot!(printed.trim_end(), @r"
mkdir -p [ROOT]/home/.vim/after/ftplugin
ln -s [ROOT]/stow/vim/.vim/after/ftplugin/go.vim [ROOT]/home/.vim/after/ftplugin/go.vim
mkdir -p [ROOT]/home
rm [ROOT]/home/.vimrc
ln -s [ROOT]/stow/vim/.vimrc [ROOT]/home/.vimrc
");
    assert_eq!(ctx.link_of(".vimrc"), None);
    assert!(ctx.target_dir().join(".vimrc").as_std_path().is_file());
    assert!(!ctx.target_dir().join(".vim").as_std_path().exists());
}
