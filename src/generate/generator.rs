use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;

use crate::config::MarkerConfig;
use crate::foundation::core::{MarkerSpec, validate_lesson_id};
use crate::foundation::error::LessonmarkResult;
use crate::render::label::LabelRenderer;
use crate::render::raster::{MarkerImage, render_marker};
use crate::store::markers::MarkerStore;

/// Result of one generation request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MarkerOutcome {
    /// Lesson id the request was for.
    pub lesson_id: String,
    /// Whether a marker file was written.
    pub success: bool,
    /// Path of the written marker, when `success`.
    pub location: Option<String>,
    /// Diagnostic message for humans.
    pub message: String,
}

impl MarkerOutcome {
    fn written(lesson_id: &str, path: PathBuf) -> Self {
        Self {
            lesson_id: lesson_id.to_string(),
            success: true,
            location: Some(path.display().to_string()),
            message: "marker generated".to_string(),
        }
    }

    fn failed(lesson_id: &str, message: String) -> Self {
        Self {
            lesson_id: lesson_id.to_string(),
            success: false,
            location: None,
            message,
        }
    }
}

/// Renders markers and writes them into a [`MarkerStore`].
///
/// Holds no per-request state, so one generator can serve many threads.
#[derive(Clone, Debug)]
pub struct MarkerGenerator {
    store: MarkerStore,
    config: MarkerConfig,
    labels: LabelRenderer,
}

impl MarkerGenerator {
    /// Generator labelling markers with the system fonts.
    pub fn new(store: MarkerStore, config: MarkerConfig) -> Self {
        Self::with_labels(store, config, LabelRenderer::with_system_fonts())
    }

    /// Generator with an explicit label renderer.
    pub fn with_labels(store: MarkerStore, config: MarkerConfig, labels: LabelRenderer) -> Self {
        Self {
            store,
            config,
            labels,
        }
    }

    /// The store markers are written to.
    pub fn store(&self) -> &MarkerStore {
        &self.store
    }

    /// The render configuration.
    pub fn config(&self) -> &MarkerConfig {
        &self.config
    }

    /// Render the marker for `spec` without touching the filesystem.
    pub fn render(&self, spec: &MarkerSpec) -> LessonmarkResult<MarkerImage> {
        render_marker(spec, &self.config, &self.labels)
    }

    /// Render, encode and store the marker for `spec`, returning its path.
    pub fn try_generate(&self, spec: &MarkerSpec) -> LessonmarkResult<PathBuf> {
        validate_lesson_id(&spec.lesson_id)?;
        let image = self.render(spec)?;
        let png = image.encode_png()?;
        self.store.write_png(&spec.lesson_id, &png)
    }

    /// Generate the marker for `spec`.
    ///
    /// Never fails: validation, render and storage errors, and panics while rendering, are
    /// reported through a failed [`MarkerOutcome`]. Writing the same lesson id again overwrites
    /// the previous file.
    #[tracing::instrument(skip_all, fields(lesson_id = %spec.lesson_id))]
    pub fn generate(&self, spec: &MarkerSpec) -> MarkerOutcome {
        guarded(&spec.lesson_id, || self.try_generate(spec))
    }
}

/// Run one generation step, turning errors and panics into a failed outcome.
fn guarded(
    lesson_id: &str,
    run: impl FnOnce() -> LessonmarkResult<PathBuf>,
) -> MarkerOutcome {
    let outcome = match catch_unwind(AssertUnwindSafe(run)) {
        Ok(Ok(path)) => MarkerOutcome::written(lesson_id, path),
        Ok(Err(err)) => {
            MarkerOutcome::failed(lesson_id, format!("failed to generate marker: {err}"))
        }
        Err(payload) => MarkerOutcome::failed(
            lesson_id,
            format!(
                "failed to generate marker: panicked: {}",
                panic_message(payload.as_ref())
            ),
        ),
    };

    if outcome.success {
        tracing::info!(location = ?outcome.location, "marker generated");
    } else {
        tracing::warn!(message = %outcome.message, "marker generation failed");
    }
    outcome
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/generator.rs"]
mod tests;
