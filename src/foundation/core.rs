use crate::foundation::error::{LessonmarkError, LessonmarkResult};

/// Side length of the pattern grid, in cells.
pub const GRID_DIM: usize = 20;

/// Thickness of the checkerboard border region, in cells.
pub const BORDER_CELLS: usize = 3;

/// Row/column index of the near timing line. The far line mirrors it at `GRID_DIM - 1 - TIMING_INDEX`.
pub const TIMING_INDEX: usize = 7;

/// Input of one marker generation request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct MarkerSpec {
    /// Lesson identifier. The only input the cell pattern depends on.
    pub lesson_id: String,
    /// Display title. Only affects the rendered label.
    pub title: String,
}

impl MarkerSpec {
    /// Create a spec from any string-like id and title.
    pub fn new(lesson_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            lesson_id: lesson_id.into(),
            title: title.into(),
        }
    }
}

/// Check that `lesson_id` can name a marker file.
///
/// Rejects empty (or all-whitespace) ids, `.` and `..`, path separators, and control characters.
/// Pattern generation itself accepts any string; this guards the filesystem boundary.
pub fn validate_lesson_id(lesson_id: &str) -> LessonmarkResult<()> {
    if lesson_id.trim().is_empty() {
        return Err(LessonmarkError::validation("lesson id must be non-empty"));
    }
    if lesson_id == "." || lesson_id == ".." {
        return Err(LessonmarkError::validation(format!(
            "lesson id '{lesson_id}' is not a valid file name component"
        )));
    }
    if let Some(c) = lesson_id
        .chars()
        .find(|c| *c == '/' || *c == '\\' || c.is_control())
    {
        return Err(LessonmarkError::validation(format!(
            "lesson id {lesson_id:?} contains forbidden character {c:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
