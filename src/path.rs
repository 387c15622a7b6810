//! Normalized, slash-separated path values.
//!
//! [`StowPath`] is always stored in its lexically cleaned form so that two
//! paths naming the same location compare equal and print the same way.
use std::fmt;

/// An immutable path value kept in normalized form.
///
/// # Examples
///
/// ```
/// use stow::path::StowPath;
///
/// let root = StowPath::from("/usr/local/var/stow/");
/// let file = root.join("vim").join(".vim/vimrc");
///
/// assert_eq!(file.as_str(), "/usr/local/var/stow/vim/.vim/vimrc");
/// assert_eq!(file.base().as_str(), "vimrc");
/// assert_eq!(file.dir().as_str(), "/usr/local/var/stow/vim/.vim");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StowPath(String);

impl StowPath {
    /// Create a path, normalizing `value`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(clean(value))
    }

    /// Join `other` onto this path.
    ///
    /// An empty `other` leaves the path unchanged. Redundant separators are
    /// collapsed, so a trailing slash never yields `//`.
    #[must_use]
    pub fn join(&self, other: impl AsRef<str>) -> Self {
        let other = other.as_ref();
        if other.is_empty() {
            return self.clone();
        }
        Self(clean(&format!("{}/{other}", self.0)))
    }

    /// Last element of the path.
    #[must_use]
    pub fn base(&self) -> Self {
        let trimmed = self.0.trim_end_matches('/');
        if self.0.is_empty() {
            return Self(".".to_string());
        }
        if trimmed.is_empty() {
            return Self("/".to_string());
        }
        let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
        Self(last.to_string())
    }

    /// Everything but the last element. The directory of a single relative
    /// element is `.`.
    #[must_use]
    pub fn dir(&self) -> Self {
        let head = self
            .0
            .rsplit_once('/')
            .map_or_else(String::new, |(head, _)| format!("{head}/"));
        Self(clean(&head))
    }

    /// Return `true` when the path starts at the filesystem root.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    /// Borrow the normalized string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// View as a [`std::path::Path`] for `std::fs` calls.
    #[must_use]
    pub fn as_std_path(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

impl fmt::Display for StowPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StowPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<std::path::Path> for StowPath {
    fn as_ref(&self) -> &std::path::Path {
        self.as_std_path()
    }
}

impl From<&str> for StowPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StowPath {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&std::path::Path> for StowPath {
    fn from(value: &std::path::Path) -> Self {
        Self::new(&value.to_string_lossy())
    }
}

impl From<std::path::PathBuf> for StowPath {
    fn from(value: std::path::PathBuf) -> Self {
        Self::from(value.as_path())
    }
}

/// Lexically clean `path`: collapse repeated separators, drop `.` elements,
/// resolve `..` against preceding elements and strip trailing separators.
/// The empty path cleans to `.`.
fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for element in path.split('/') {
        match element {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
