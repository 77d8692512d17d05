/// File classification by extension.
///
/// Every file falls into one of four roles: media (the recording itself),
/// one of two companion kinds, or unrelated. Matching is case-insensitive.
use crate::model::Companion;
use std::path::Path;

/// Recognised media container extensions.
pub const MEDIA_EXTENSIONS: &[&str] = &["flv", "mp4", "mkv", "ts", "mov", "avi"];
/// Recognised cover image extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
/// Recognised caption track extensions.
pub const CAPTION_EXTENSIONS: &[&str] = &["xml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    Media,
    Companion(Companion),
    Unrelated,
}

/// Classify a bare extension (no leading dot).
///
/// Zero-heap-allocation hot path: extensions are lowercased into a fixed-size
/// stack buffer. Anything longer than 8 bytes cannot be a recognised
/// extension and is `Unrelated`.
pub fn classify_extension(ext: &str) -> FileRole {
    let bytes = ext.as_bytes();
    if bytes.len() > 8 {
        return FileRole::Unrelated;
    }

    let mut lower = [0u8; 8];
    for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
        *dest = src.to_ascii_lowercase();
    }
    let lower_str = match std::str::from_utf8(&lower[..bytes.len()]) {
        Ok(s) => s,
        Err(_) => return FileRole::Unrelated,
    };

    if MEDIA_EXTENSIONS.contains(&lower_str) {
        FileRole::Media
    } else if IMAGE_EXTENSIONS.contains(&lower_str) {
        FileRole::Companion(Companion::Image)
    } else if CAPTION_EXTENSIONS.contains(&lower_str) {
        FileRole::Companion(Companion::Caption)
    } else {
        FileRole::Unrelated
    }
}

/// Classify a path by its extension. Files without one are `Unrelated`.
pub fn classify_path(path: &Path) -> FileRole {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => classify_extension(ext),
        None => FileRole::Unrelated,
    }
}

/// The cluster key for a path: its file name without the final extension.
///
/// `"录制-20250520-090417.flv"` → `"录制-20250520-090417"`;
/// `"a.b.mp4"` → `"a.b"`.
pub fn stem_of(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}
