//! Filesystem primitives used by [`FileSystemLinker`](crate::linker::FileSystemLinker).
//!
//! Three implementations share the [`FileSystem`] trait:
//!
//! - [`LocalFileSystem`] performs real `std::fs` calls.
//! - [`DryRunFileSystem`] answers queries truthfully but only prints the
//!   mutations it would perform.
//! - [`VerboseFileSystem`] wraps any other implementation and logs every call.
//!
//! The chain is built once by the caller and injected; nothing here is global.
use std::io::{self, Write};

use crate::path::StowPath;

/// The primitive operations a linker needs from a filesystem.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// Return `true` if anything exists at `path`, including a dangling symlink.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be inspected for a reason other
    /// than its absence.
    fn exists(&self, path: &StowPath) -> io::Result<bool>;

    /// Create `path` and all of its missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&mut self, path: &StowPath) -> io::Result<()>;

    /// Read the target of the symlink at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist or is not a symlink.
    fn read_link(&self, path: &StowPath) -> io::Result<StowPath>;

    /// Remove the file, symlink or empty directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be removed.
    fn remove(&mut self, path: &StowPath) -> io::Result<()>;

    /// Create a symlink at `destination` pointing to `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created.
    fn symlink(&mut self, source: &StowPath, destination: &StowPath) -> io::Result<()>;
}

impl<F: FileSystem + ?Sized> FileSystem for Box<F> {
    fn exists(&self, path: &StowPath) -> io::Result<bool> {
        (**self).exists(path)
    }

    fn create_dir_all(&mut self, path: &StowPath) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn read_link(&self, path: &StowPath) -> io::Result<StowPath> {
        (**self).read_link(path)
    }

    fn remove(&mut self, path: &StowPath) -> io::Result<()> {
        (**self).remove(path)
    }

    fn symlink(&mut self, source: &StowPath, destination: &StowPath) -> io::Result<()> {
        (**self).symlink(source, destination)
    }
}

/// Real filesystem access.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &StowPath) -> io::Result<bool> {
        match std::fs::symlink_metadata(path.as_std_path()) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn create_dir_all(&mut self, path: &StowPath) -> io::Result<()> {
        std::fs::create_dir_all(path.as_std_path())
    }

    fn read_link(&self, path: &StowPath) -> io::Result<StowPath> {
        std::fs::read_link(path.as_std_path()).map(StowPath::from)
    }

    fn remove(&mut self, path: &StowPath) -> io::Result<()> {
        let meta = std::fs::symlink_metadata(path.as_std_path())?;
        if is_dir_like(&meta) {
            std::fs::remove_dir(path.as_std_path())
        } else {
            std::fs::remove_file(path.as_std_path())
        }
    }

    fn symlink(&mut self, source: &StowPath, destination: &StowPath) -> io::Result<()> {
        #[cfg(windows)]
        {
            if source.as_std_path().is_dir() {
                std::os::windows::fs::symlink_dir(source.as_std_path(), destination.as_std_path())
            } else {
                std::os::windows::fs::symlink_file(source.as_std_path(), destination.as_std_path())
            }
        }
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(source.as_std_path(), destination.as_std_path())
        }
    }
}

/// Check if metadata represents a directory-like entry.
/// On Windows, `symlink_metadata().is_dir()` returns `false` for directory symlinks,
/// so we check the raw `FILE_ATTRIBUTE_DIRECTORY` bit instead.
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}

/// Prints the commands a mutation would run instead of running it.
///
/// Queries still hit the real filesystem so that planning (does the source
/// exist, where does this link point) stays truthful.
#[derive(Debug)]
pub struct DryRunFileSystem<W> {
    out: W,
    local: LocalFileSystem,
}

impl<W: Write> DryRunFileSystem<W> {
    /// Create a dry-run filesystem printing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            local: LocalFileSystem,
        }
    }

    /// Consume the filesystem and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FileSystem for DryRunFileSystem<W> {
    fn exists(&self, path: &StowPath) -> io::Result<bool> {
        self.local.exists(path)
    }

    fn create_dir_all(&mut self, path: &StowPath) -> io::Result<()> {
        writeln!(self.out, "mkdir -p {path}")
    }

    fn read_link(&self, path: &StowPath) -> io::Result<StowPath> {
        self.local.read_link(path)
    }

    fn remove(&mut self, path: &StowPath) -> io::Result<()> {
        writeln!(self.out, "rm {path}")
    }

    fn symlink(&mut self, source: &StowPath, destination: &StowPath) -> io::Result<()> {
        writeln!(self.out, "ln -s {source} {destination}")
    }
}

/// Logs every call at `info` and every failure at `debug`, then forwards the
/// result unchanged.
#[derive(Debug)]
pub struct VerboseFileSystem<F> {
    inner: F,
}

impl<F: FileSystem> VerboseFileSystem<F> {
    /// Wrap `inner`.
    pub const fn new(inner: F) -> Self {
        Self { inner }
    }

    /// Unwrap the decorated filesystem.
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F: FileSystem> FileSystem for VerboseFileSystem<F> {
    fn exists(&self, path: &StowPath) -> io::Result<bool> {
        tracing::info!("stat file {path}");
        self.inner
            .exists(path)
            .inspect_err(|e| tracing::debug!("failed to stat file {path}: {e}"))
    }

    fn create_dir_all(&mut self, path: &StowPath) -> io::Result<()> {
        tracing::info!("mkdir all {path}");
        self.inner
            .create_dir_all(path)
            .inspect_err(|e| tracing::debug!("failed to mkdir all {path}: {e}"))
    }

    fn read_link(&self, path: &StowPath) -> io::Result<StowPath> {
        tracing::info!("read symlink info for {path}");
        self.inner
            .read_link(path)
            .inspect_err(|e| tracing::debug!("failed to read symlink info for {path}: {e}"))
    }

    fn remove(&mut self, path: &StowPath) -> io::Result<()> {
        tracing::info!("rm file {path}");
        self.inner
            .remove(path)
            .inspect_err(|e| tracing::debug!("failed to remove file {path}: {e}"))
    }

    fn symlink(&mut self, source: &StowPath, destination: &StowPath) -> io::Result<()> {
        tracing::info!("symlink from {source} to {destination}");
        self.inner.symlink(source, destination).inspect_err(|e| {
            tracing::debug!("failed to symlink from {source} to {destination}: {e}");
        })
    }
}
