use std::path::PathBuf;

/// Convenience result type used across lessonmark.
pub type LessonmarkResult<T> = Result<T, LessonmarkError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum LessonmarkError {
    /// Invalid user-provided input (lesson ids, configuration values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing or encoding a marker image.
    #[error("render error: {0}")]
    Render(String),

    /// Filesystem failures in the markers directory.
    #[error("storage error at '{}': {source}", path.display())]
    Storage {
        /// Path the failing operation touched.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LessonmarkError {
    /// Build a [`LessonmarkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LessonmarkError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LessonmarkError::Storage`] value.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Build a [`LessonmarkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
