/// Filesystem boundary — the three calls the core makes against the OS.
///
/// The scanner and evictor only talk to the disk through [`FileSystem`], so
/// tests can wrap [`LocalFileSystem`] to inject stat or delete failures.
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Size, modification time and kind of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub is_dir: bool,
}

pub trait FileSystem {
    /// Immediate children of `dir`, in a stable order.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>>;

    /// Size, last-modified time and kind of `path`, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem.
///
/// Listings use `jwalk` restricted to depth 1, serial and sorted by name,
/// so two runs over the same tree see entries in the same order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntryInfo>> {
        // jwalk reports an unreadable root as an item error, not up front.
        std::fs::read_dir(dir)?;

        let walker = jwalk::WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .parallelism(jwalk::Parallelism::Serial);

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|err| io::Error::other(err.to_string()))?;
            entries.push(DirEntryInfo {
                path: entry.path(),
                is_dir: entry.file_type().is_dir(),
            });
        }
        Ok(entries)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let meta = std::fs::metadata(path)?;
        Ok(FileStat {
            size: meta.len(),
            modified: meta.modified().ok(),
            is_dir: meta.is_dir(),
        })
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}
