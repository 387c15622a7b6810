//! Build script: embeds git metadata into the binary.

use std::process::Command;

/// Run `git` with `args` and return its trimmed stdout on success.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}

fn main() {
    // Prefer explicit env vars (e.g., set by a release workflow), otherwise
    // ask git. Anything left unset falls back to defaults in src/version.rs.
    let lookups: [(&str, &[&str]); 3] = [
        ("STOW_VERSION", &["describe", "--tags", "--always"]),
        ("STOW_BRANCH", &["rev-parse", "--abbrev-ref", "HEAD"]),
        ("STOW_COMMIT", &["rev-parse", "--short", "HEAD"]),
    ];
    for (name, args) in lookups {
        if let Some(value) = std::env::var(name).ok().or_else(|| git(args)) {
            println!("cargo:rustc-env={name}={value}");
        }
        println!("cargo:rerun-if-env-changed={name}");
    }

    let state = std::env::var("STOW_STATE").ok().or_else(|| {
        git(&["status", "--porcelain"])
            .map(|_| "dirty".to_string())
            .or_else(|| git(&["rev-parse", "HEAD"]).map(|_| "clean".to_string()))
    });
    if let Some(state) = state {
        println!("cargo:rustc-env=STOW_STATE={state}");
    }
    println!("cargo:rerun-if-env-changed=STOW_STATE");

    // Re-run if git HEAD changes
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
}
