//! Packages (a.k.a. bundles): named, ordered collections of relative files.
use std::io;

use crate::error::PackageError;
use crate::path::StowPath;
use crate::walker::Walker;

/// A named set of files living under `stow_root/name`.
///
/// File order is both the order the source tree was walked in and the order
/// in which a [`Target`](crate::target::Target) applies and rolls back links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    name: String,
    files: Vec<StowPath>,
}

impl Package {
    /// Create an empty package.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }

    /// Build a package by walking `stow_root/name`.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::NotFound`] if the package directory does not
    /// exist and [`PackageError::Walk`] for any other walker failure.
    pub fn build(
        stow_root: &StowPath,
        name: &str,
        walker: &dyn Walker,
    ) -> Result<Self, PackageError> {
        let mut package = Self::new(name);
        walker
            .walk(&stow_root.join(name), &mut |file| package.add_file(file))
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    PackageError::NotFound(name.to_string())
                } else {
                    PackageError::Walk {
                        package: name.to_string(),
                        source,
                    }
                }
            })?;
        Ok(package)
    }

    /// Name of the package, which is also its directory under the stow root.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a file. Duplicates are kept.
    pub fn add_file(&mut self, path: impl Into<StowPath>) {
        self.files.push(path.into());
    }

    /// Files in insertion order.
    #[must_use]
    pub fn files(&self) -> &[StowPath] {
        &self.files
    }

    /// Number of files.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.files.len()
    }

    /// Return `true` if the package holds no file.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
