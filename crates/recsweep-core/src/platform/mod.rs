/// Platform functionality — the filesystem boundary used by the scanner
/// and the evictor.

pub mod fs;

pub use fs::{DirEntryInfo, FileStat, FileSystem, LocalFileSystem};
