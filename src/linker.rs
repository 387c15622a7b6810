//! The linking capability consumed by [`Target`](crate::target::Target).
use std::io;

use crate::error::LinkError;
use crate::fs::FileSystem;
use crate::path::StowPath;

/// Create, remove and resolve symbolic links.
///
/// The transaction engine depends only on this contract, which lets real,
/// dry-run and logged behaviour share the same stow/unstow logic.
pub trait Linker {
    /// Create a symlink at `destination` pointing to `source`, creating
    /// missing parent directories and replacing whatever already exists at
    /// `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Io`] if the source is missing or any primitive fails.
    fn link(&mut self, source: &StowPath, destination: &StowPath) -> Result<(), LinkError>;

    /// Remove whatever exists at `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Io`] if the entry cannot be removed.
    fn unlink(&mut self, destination: &StowPath) -> Result<(), LinkError>;

    /// Resolve where the symlink at `destination` points.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotExist`] when `destination` is absent or not a
    /// symlink, and [`LinkError::Io`] for every other failure.
    fn read_link(&mut self, destination: &StowPath) -> Result<StowPath, LinkError>;
}

impl<L: Linker + ?Sized> Linker for &mut L {
    fn link(&mut self, source: &StowPath, destination: &StowPath) -> Result<(), LinkError> {
        (**self).link(source, destination)
    }

    fn unlink(&mut self, destination: &StowPath) -> Result<(), LinkError> {
        (**self).unlink(destination)
    }

    fn read_link(&mut self, destination: &StowPath) -> Result<StowPath, LinkError> {
        (**self).read_link(destination)
    }
}

/// [`Linker`] built on top of [`FileSystem`] primitives.
#[derive(Debug)]
pub struct FileSystemLinker<F> {
    fs: F,
}

impl<F: FileSystem> FileSystemLinker<F> {
    /// Create a linker issuing its primitives through `fs`.
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }
}

fn io_failure(action: &'static str, path: &StowPath) -> impl FnOnce(io::Error) -> LinkError {
    let path = path.clone();
    move |source| LinkError::Io {
        action,
        path,
        source,
    }
}

impl<F: FileSystem> Linker for FileSystemLinker<F> {
    fn link(&mut self, source: &StowPath, destination: &StowPath) -> Result<(), LinkError> {
        if !self
            .fs
            .exists(source)
            .map_err(io_failure("get source information", source))?
        {
            return Err(io_failure("get source information", source)(
                io::Error::new(io::ErrorKind::NotFound, "source does not exist"),
            ));
        }

        let parent = destination.dir();
        self.fs
            .create_dir_all(&parent)
            .map_err(io_failure("create parent folder", &parent))?;

        if self
            .fs
            .exists(destination)
            .map_err(io_failure("get destination information", destination))?
        {
            self.fs
                .remove(destination)
                .map_err(io_failure("remove existing destination", destination))?;
        }

        self.fs
            .symlink(source, destination)
            .map_err(io_failure("symlink", destination))
    }

    fn unlink(&mut self, destination: &StowPath) -> Result<(), LinkError> {
        self.fs
            .remove(destination)
            .map_err(io_failure("remove path link", destination))
    }

    fn read_link(&mut self, destination: &StowPath) -> Result<StowPath, LinkError> {
        self.fs.read_link(destination).map_err(|source| {
            if matches!(
                source.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::InvalidInput | io::ErrorKind::NotADirectory
            ) {
                LinkError::NotExist {
                    path: destination.clone(),
                    source,
                }
            } else {
                io_failure("read link", destination)(source)
            }
        })
    }
}
