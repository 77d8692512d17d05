/// A recording session: one media file plus the companion files that share
/// its filename stem.
///
/// Clusters live in a flat `Vec<Cluster>` owned by the [`ScanResult`]
/// and are addressed by [`ClusterIndex`], the same arena layout used for
/// the scan tree. Eviction always targets every member of a cluster together.
///
/// [`ScanResult`]: super::ScanResult
use compact_str::CompactString;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Filename stem shared by a media file and its companions.
///
/// Stems are short (a timestamp plus a channel title is typical), so
/// `CompactString` keeps most keys inline.
pub type ClusterKey = CompactString;

/// Lightweight index into the cluster arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterIndex(pub u32);

impl ClusterIndex {
    /// Create a new `ClusterIndex` from a `usize`.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "ClusterIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A file recorded during the scan. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub path: PathBuf,
    pub size: u64,
}

impl FileRef {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Companion slots a cluster can hold next to its media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Companion {
    /// Cover / thumbnail image.
    Image,
    /// Caption or danmaku track (`.xml`).
    Caption,
}

impl Companion {
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Caption => "caption",
        }
    }
}

/// One session cluster.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub key: ClusterKey,

    pub media: Option<FileRef>,
    pub image: Option<FileRef>,
    pub caption: Option<FileRef>,

    /// Members pushed out of their slot by a later file with the same stem
    /// (e.g. `a/x.mp4` then `b/x.mp4`). They stay counted in `size` and are
    /// deleted together with the cluster.
    pub displaced: Vec<FileRef>,

    /// Sum of every member's size, including displaced members.
    pub size: u64,

    /// Last-modified time of the current media member. Orders eviction.
    pub modified: Option<SystemTime>,
}

impl Cluster {
    /// An empty cluster. Only the scanner creates these, on a media sighting.
    pub fn new(key: ClusterKey) -> Self {
        Self {
            key,
            media: None,
            image: None,
            caption: None,
            displaced: Vec::new(),
            size: 0,
            modified: None,
        }
    }

    /// Attach the media member and take its timestamp as representative.
    ///
    /// Returns the previous media member when the stem collides; the
    /// newcomer wins the slot and the timestamp.
    pub fn attach_media(&mut self, file: FileRef, modified: Option<SystemTime>) -> Option<FileRef> {
        self.size += file.size;
        self.modified = modified;
        let previous = self.media.replace(file);
        self.displace(previous)
    }

    /// Attach a companion member, returning whatever previously held the slot.
    pub fn attach_companion(&mut self, kind: Companion, file: FileRef) -> Option<FileRef> {
        self.size += file.size;
        let slot = match kind {
            Companion::Image => &mut self.image,
            Companion::Caption => &mut self.caption,
        };
        let previous = slot.replace(file);
        self.displace(previous)
    }

    fn displace(&mut self, previous: Option<FileRef>) -> Option<FileRef> {
        let previous = previous?;
        self.displaced.push(previous.clone());
        Some(previous)
    }

    /// Every present member in deletion order: media, image, caption,
    /// then displaced files.
    pub fn members(&self) -> impl Iterator<Item = &FileRef> {
        self.media
            .iter()
            .chain(self.image.iter())
            .chain(self.caption.iter())
            .chain(self.displaced.iter())
    }

    /// Paths of every member, in [`members`](Self::members) order.
    pub fn member_paths(&self) -> Vec<&Path> {
        self.members().map(|f| f.path.as_path()).collect()
    }
}
