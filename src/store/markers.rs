//! The markers directory: one `marker_<lesson_id>.png` per lesson.
//!
//! A [`MarkerStore`] is an explicit handle on that directory. Everything downstream of the
//! generator (image-database loading, galleries) only relies on the file naming scheme.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;

use crate::foundation::core::validate_lesson_id;
use crate::foundation::error::{LessonmarkError, LessonmarkResult};

const FILE_PREFIX: &str = "marker_";
const FILE_EXT: &str = ".png";

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// File name of the marker for `lesson_id`.
pub fn marker_file_name(lesson_id: &str) -> String {
    format!("{FILE_PREFIX}{lesson_id}{FILE_EXT}")
}

/// Recover the lesson id from a `marker_<id>.png` file name.
pub fn lesson_id_from_file_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(FILE_PREFIX)?
        .strip_suffix(FILE_EXT)
        .filter(|id| !id.is_empty())
}

/// One marker file found in the store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct StoredMarker {
    /// Lesson id recovered from the file name.
    pub lesson_id: String,
    /// Full path to the PNG.
    pub path: PathBuf,
}

/// Handle on a markers directory.
#[derive(Clone, Debug)]
pub struct MarkerStore {
    root: PathBuf,
}

impl MarkerStore {
    /// Store rooted at `root`. The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the marker files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the marker for `lesson_id` lives (whether or not it exists).
    pub fn path_for(&self, lesson_id: &str) -> PathBuf {
        self.root.join(marker_file_name(lesson_id))
    }

    /// Write PNG bytes for `lesson_id`, replacing any previous marker.
    ///
    /// Bytes go to a sibling temp file first and are renamed into place, so readers never see a
    /// partially written marker and a failed write leaves the old one intact.
    pub fn write_png(&self, lesson_id: &str, png: &[u8]) -> LessonmarkResult<PathBuf> {
        validate_lesson_id(lesson_id)?;
        std::fs::create_dir_all(&self.root)
            .map_err(|e| LessonmarkError::storage(&self.root, e))?;

        let path = self.path_for(lesson_id);
        let tmp = self.root.join(tmp_file_name(lesson_id));

        if let Err(e) = std::fs::write(&tmp, png) {
            let _ = std::fs::remove_file(&tmp);
            return Err(LessonmarkError::storage(&tmp, e));
        }
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(LessonmarkError::storage(&path, e));
        }

        tracing::debug!(path = %path.display(), bytes = png.len(), "wrote marker");
        Ok(path)
    }

    /// Path of the stored marker for `lesson_id`, if present. Invalid ids are never present.
    pub fn find(&self, lesson_id: &str) -> Option<PathBuf> {
        validate_lesson_id(lesson_id).ok()?;
        let path = self.path_for(lesson_id);
        path.is_file().then_some(path)
    }

    /// Decode the stored marker for `lesson_id`. `Ok(None)` when there is none.
    pub fn load(&self, lesson_id: &str) -> LessonmarkResult<Option<image::RgbaImage>> {
        validate_lesson_id(lesson_id)?;
        let Some(path) = self.find(lesson_id) else {
            return Ok(None);
        };
        let bytes = std::fs::read(&path).map_err(|e| LessonmarkError::storage(&path, e))?;
        let img = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
            .with_context(|| format!("decode marker '{}'", path.display()))?;
        Ok(Some(img.to_rgba8()))
    }

    /// All markers in the directory, sorted by lesson id. A missing directory is an empty store.
    pub fn list(&self) -> LessonmarkResult<Vec<StoredMarker>> {
        let rd = match std::fs::read_dir(&self.root) {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LessonmarkError::storage(&self.root, e)),
        };

        let mut out = Vec::new();
        for entry in rd {
            let entry = entry.map_err(|e| LessonmarkError::storage(&self.root, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(lesson_id) = lesson_id_from_file_name(name) else {
                continue;
            };
            out.push(StoredMarker {
                lesson_id: lesson_id.to_string(),
                path: path.clone(),
            });
        }
        out.sort();
        Ok(out)
    }

    /// Delete the marker for `lesson_id`. Returns `false` if there was nothing to delete.
    pub fn remove(&self, lesson_id: &str) -> LessonmarkResult<bool> {
        validate_lesson_id(lesson_id)?;
        let path = self.path_for(lesson_id);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(LessonmarkError::storage(&path, e)),
        }
    }
}

// Unique per write: concurrent writers for one id must never share a temp file.
fn tmp_file_name(lesson_id: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    format!(
        ".{}.{}_{}_{}.tmp",
        marker_file_name(lesson_id),
        std::process::id(),
        TMP_SEQ.fetch_add(1, Ordering::Relaxed),
        nanos
    )
}

#[cfg(test)]
#[path = "../../tests/unit/store/markers.rs"]
mod tests;
