use std::path::{Path, PathBuf};

use crate::foundation::core::MarkerSpec;
use crate::foundation::error::{LessonmarkError, LessonmarkResult};

/// A lesson record as stored in the lesson JSON files.
///
/// Only `id` and `title` feed marker generation. Fields the marker pipeline has no use for (lab
/// steps, quiz) are ignored when parsing.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Stable lesson identifier; also the marker key.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Subject area, e.g. `"Physics"`.
    #[serde(default)]
    pub subject: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Difficulty label.
    #[serde(default)]
    pub difficulty: String,
    /// Estimated duration in minutes.
    #[serde(default)]
    pub estimated_duration: u32,
    /// Legacy explicit marker id; empty when the lesson id is used.
    #[serde(default)]
    pub marker_id: String,
    /// Path of the lesson's 3D model asset.
    #[serde(default)]
    pub model_path: String,
    /// Ids of lessons to complete first.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<&Lesson> for MarkerSpec {
    fn from(lesson: &Lesson) -> Self {
        MarkerSpec::new(lesson.id.clone(), lesson.title.clone())
    }
}

/// In-memory set of lessons, in load order.
#[derive(Clone, Debug, Default)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    /// Build a catalog from already-parsed lessons.
    pub fn from_lessons(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }

    /// Load every `*.json` file in `dir`, one lesson per file, in file name order.
    ///
    /// Files that cannot be read or parsed are skipped with a warning. Only a missing or
    /// unreadable `dir` is an error.
    pub fn load_dir(dir: impl AsRef<Path>) -> LessonmarkResult<Self> {
        let dir = dir.as_ref();
        let rd = std::fs::read_dir(dir).map_err(|e| LessonmarkError::storage(dir, e))?;

        let mut paths: Vec<PathBuf> = rd
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
            })
            .collect();
        paths.sort();

        let mut lessons = Vec::with_capacity(paths.len());
        for path in paths {
            match read_lesson(&path) {
                Ok(lesson) => lessons.push(lesson),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping lesson file");
                }
            }
        }
        Ok(Self { lessons })
    }

    /// All lessons.
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Number of lessons.
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Return `true` when the catalog holds no lessons.
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Lookup by exact id.
    pub fn lesson(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    /// Lessons whose subject matches `subject`, ignoring case.
    pub fn by_subject(&self, subject: &str) -> Vec<&Lesson> {
        let wanted = subject.to_lowercase();
        self.lessons
            .iter()
            .filter(|l| l.subject.to_lowercase() == wanted)
            .collect()
    }

    /// One marker spec per lesson, in catalog order.
    pub fn marker_specs(&self) -> Vec<MarkerSpec> {
        self.lessons.iter().map(MarkerSpec::from).collect()
    }
}

fn read_lesson(path: &Path) -> LessonmarkResult<Lesson> {
    let text = std::fs::read_to_string(path).map_err(|e| LessonmarkError::storage(path, e))?;
    serde_json::from_str(&text).map_err(|e| LessonmarkError::serde(e.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/lessons/catalog.rs"]
mod tests;
