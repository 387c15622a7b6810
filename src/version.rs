//! Build information reported by `stow -V`.
use std::fmt;

/// Version, branch, commit and working-tree state captured at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    /// Release version, usually from `git describe`.
    pub version: &'static str,
    /// Branch the binary was built from.
    pub branch: &'static str,
    /// Abbreviated commit hash.
    pub commit: &'static str,
    /// `clean` or `dirty`.
    pub state: &'static str,
}

impl BuildInfo {
    /// Information baked into this binary by the build script.
    #[must_use]
    pub const fn current() -> Self {
        Self {
            version: or(option_env!("STOW_VERSION"), "unknown"),
            branch: or(option_env!("STOW_BRANCH"), "nobranch"),
            commit: or(option_env!("STOW_COMMIT"), "HEAD"),
            state: or(option_env!("STOW_STATE"), "dirty"),
        }
    }
}

const fn or(value: Option<&'static str>, default: &'static str) -> &'static str {
    match value {
        Some(value) => value,
        None => default,
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "version={} branch={} commit={} state={}",
            self.version, self.branch, self.commit, self.state
        )
    }
}
