//! Mapping request targets onto the document root, and stat'ing what they name.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::mime;

const INDEX_FILE: &str = "index.html";

/// A regular file that a response is about to describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedFile {
    pub path: PathBuf,
    pub size: u64,
    pub modified_at: SystemTime,
    pub mime_type: &'static str,
}

/// The path component of a request target.
///
/// Absolute-form targets (`http://host/a/b`) lose their scheme and
/// authority; query and fragment are dropped from both forms.
pub fn request_path(target: &str) -> &str {
    let path = match target.split_once("://") {
        Some((_, rest)) if !target.starts_with('/') => rest.find('/').map_or("/", |i| &rest[i..]),
        _ => target,
    };
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    &path[..end]
}

/// Joins the `/`-separated segments of `target` onto `root`.
///
/// Segments are taken literally: no percent-decoding, and `..` is not
/// collapsed, so a target can name files outside `root`.
pub fn resolve_target(root: &Path, target: &str) -> PathBuf {
    request_path(target)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

/// Stats `path` fresh from disk. Directories resolve to their `index.html`;
/// anything that is not a regular file is reported as `NotFound`.
pub async fn locate(mut path: PathBuf) -> io::Result<ServedFile> {
    let mut metadata = tokio::fs::metadata(&path).await?;
    if metadata.is_dir() {
        path.push(INDEX_FILE);
        metadata = tokio::fs::metadata(&path).await?;
    }
    if !metadata.is_file() {
        return Err(io::Error::new(io::ErrorKind::NotFound, "not a regular file"));
    }

    Ok(ServedFile {
        mime_type: mime::mime_type(&path),
        size: metadata.len(),
        modified_at: metadata.modified()?,
        path,
    })
}
