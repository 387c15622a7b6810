//! Resolution of command-line flags and environment into a [`Config`].
use std::fmt;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::logging::Verbosity;
use crate::path::StowPath;

/// Environment variable naming the default stow directory.
pub const STOW_DIR_ENV: &str = "STOW_DIR";

/// What to do with each package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Action {
    /// Link the package files into the target directory.
    #[default]
    Stow,
    /// Remove the links owned by the package from the target directory.
    Unstow,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stow => "stow",
            Self::Unstow => "unstow",
        })
    }
}

/// Fully resolved run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute, cleaned stow directory.
    pub stow_dir: StowPath,
    /// Absolute, cleaned target directory.
    pub target_dir: StowPath,
    /// Stow directory used when `-d` is absent: `$STOW_DIR` or `.`.
    pub default_stow_dir: String,
    /// Target directory used when `-t` is absent: the stow directory's parent.
    pub default_target_dir: StowPath,
    /// Stow or unstow.
    pub action: Action,
    /// Print commands instead of touching the filesystem.
    pub dry_run: bool,
    /// Console verbosity.
    pub verbosity: Verbosity,
    /// Package names, in command-line order.
    pub packages: Vec<String>,
}

impl Config {
    /// Resolve `cli` against the process environment and working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined or if
    /// [`resolve`](Self::resolve) fails.
    pub fn from_env(cli: &Cli) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::InvalidDirectory {
            path: ".".to_string(),
            reason: e.to_string(),
        })?;
        Self::resolve(cli, |name| std::env::var(name).ok(), &StowPath::from(cwd))
    }

    /// Resolve `cli` with an injected environment lookup and working
    /// directory.
    ///
    /// The stow directory is `-d`, else `$STOW_DIR`, else `.`. The target
    /// directory is `-t`, else the parent of the stow directory. An empty
    /// flag counts as absent. Both have
    /// `$VAR`/`${VAR}` references expanded, are made absolute against `cwd`
    /// and are lexically cleaned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVerbosity`] for a level above 2,
    /// [`ConfigError::InvalidDirectory`] if `cwd` is relative and
    /// [`ConfigError::NoPackages`] if no package was named.
    pub fn resolve(
        cli: &Cli,
        env: impl Fn(&str) -> Option<String>,
        cwd: &StowPath,
    ) -> Result<Self, ConfigError> {
        let verbosity = Verbosity::from_level(cli.verbose)?;

        if !cwd.is_absolute() {
            return Err(ConfigError::InvalidDirectory {
                path: cwd.to_string(),
                reason: "working directory is not absolute".to_string(),
            });
        }

        if cli.packages.is_empty() {
            return Err(ConfigError::NoPackages);
        }

        let default_stow_dir = env(STOW_DIR_ENV)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| ".".to_string());
        let stow_dir = absolute(
            non_empty(cli.stow_dir.as_deref()).unwrap_or(&default_stow_dir),
            &env,
            cwd,
        );

        let default_target_dir = stow_dir.join("..");
        let target_dir = non_empty(cli.target_dir.as_deref())
            .map_or_else(|| default_target_dir.clone(), |value| absolute(value, &env, cwd));

        Ok(Self {
            stow_dir,
            target_dir,
            default_stow_dir,
            default_target_dir,
            action: if cli.unstow {
                Action::Unstow
            } else {
                Action::Stow
            },
            dry_run: cli.dry_run,
            verbosity,
            packages: cli.packages.clone(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn absolute(value: &str, env: &impl Fn(&str) -> Option<String>, cwd: &StowPath) -> StowPath {
    let expanded = StowPath::from(expand_env(value, env));
    if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    }
}

/// Replace `$NAME` and `${NAME}` with the value `env` gives for `NAME`,
/// or nothing when unset. A `$` not followed by a name is kept as is.
fn expand_env(value: &str, env: &impl Fn(&str) -> Option<String>) -> String {
    let is_name = |c: char| c.is_ascii_alphanumeric() || c == '_';

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(at) = rest.find('$') {
        let (head, tail) = rest.split_at(at);
        out.push_str(head);
        let after = tail.strip_prefix('$').unwrap_or(tail);

        if let Some(braced) = after.strip_prefix('{')
            && let Some((name, remainder)) = braced.split_once('}')
            && !name.is_empty()
        {
            out.push_str(&env(name).unwrap_or_default());
            rest = remainder;
            continue;
        }

        let end = after.find(|c: char| !is_name(c)).unwrap_or(after.len());
        let (name, remainder) = after.split_at(end);
        if name.is_empty() {
            out.push('$');
        } else {
            out.push_str(&env(name).unwrap_or_default());
        }
        rest = remainder;
    }
    out.push_str(rest);
    out
}
