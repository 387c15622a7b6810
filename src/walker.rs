//! Turning a package directory into an ordered list of relative files.
use std::io;

use crate::path::StowPath;

/// Lists the files below a directory.
pub trait Walker {
    /// Call `visit` once per non-directory entry below `root`, with the path
    /// relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error met. A missing `root` yields an error of
    /// kind [`io::ErrorKind::NotFound`].
    fn walk(&self, root: &StowPath, visit: &mut dyn FnMut(StowPath)) -> io::Result<()>;
}

/// Depth-first walk of the real filesystem, entries sorted by name at every
/// level. Symlinks are reported as files and never followed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemWalker;

impl FileSystemWalker {
    fn walk_dir(
        root: &std::path::Path,
        dir: &std::path::Path,
        visit: &mut dyn FnMut(StowPath),
    ) -> io::Result<()> {
        let mut entries = std::fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
        entries.sort_by_key(std::fs::DirEntry::file_name);

        for entry in entries {
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                Self::walk_dir(root, &path, visit)?;
                continue;
            }
            let relative = path.strip_prefix(root).map_err(|_| {
                io::Error::other(format!(
                    "can't strip {} from {}",
                    root.display(),
                    path.display()
                ))
            })?;
            visit(StowPath::from(relative));
        }
        Ok(())
    }
}

impl Walker for FileSystemWalker {
    fn walk(&self, root: &StowPath, visit: &mut dyn FnMut(StowPath)) -> io::Result<()> {
        let root = root.as_std_path();
        if !std::fs::metadata(root)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", root.display()),
            ));
        }
        Self::walk_dir(root, root, visit)
    }
}
