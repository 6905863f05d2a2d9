//! lessonmark turns lesson identifiers into printable, camera-friendly marker images.
//!
//! A marker is a framed square bitmap holding a `20 x 20` binary cell pattern. The pattern is a
//! pure function of the lesson id, so a marker can be regenerated at any time and still match
//! prints (and image databases) built from earlier runs.
//!
//! # Pipeline overview
//!
//! 1. **Pattern**: `lesson_id -> PatternGrid` (border, timing and data regions)
//! 2. **Raster**: `PatternGrid + MarkerSpec -> MarkerImage` (frame, cells, corners, label)
//! 3. **Store**: `MarkerImage -> marker_<lesson_id>.png` in a [`MarkerStore`]
//!
//! [`MarkerGenerator`] runs all three stages and reports a [`MarkerOutcome`] instead of an error,
//! for one spec or a whole batch.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod generate;
mod lessons;
mod pattern;
mod render;
mod store;

pub use config::{MAX_IMAGE_SIZE_PX, MarkerConfig};
pub use foundation::core::{BORDER_CELLS, GRID_DIM, MarkerSpec, TIMING_INDEX, validate_lesson_id};
pub use foundation::error::{LessonmarkError, LessonmarkResult};
pub use generate::batch::BatchOpts;
pub use generate::generator::{MarkerGenerator, MarkerOutcome};
pub use lessons::catalog::{Lesson, LessonCatalog};
pub use pattern::grid::{PatternGrid, Region, classify, generate_pattern};
pub use pattern::hash::{LessonHashes, lesson_hash};
pub use render::label::{LabelRenderer, display_id, truncate_title};
pub use render::layout::{MarkerLayout, PixelRect};
pub use render::raster::{MarkerImage, corner_bits, render_marker};
pub use store::markers::{MarkerStore, StoredMarker, lesson_id_from_file_name, marker_file_name};
