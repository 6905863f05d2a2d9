use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{LessonmarkError, LessonmarkResult};
use crate::render::layout::MarkerLayout;

/// Largest accepted marker side length. Larger images need an explicit change of strategy.
pub const MAX_IMAGE_SIZE_PX: u32 = 16_384;

/// Render configuration for marker images.
///
/// Loaded from JSON; every field is optional and falls back to the reference marker
/// (`1024px` square, `80px` frame, corner markers and label on).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    /// Side length of the square output image.
    pub image_size_px: u32,
    /// Thickness of the solid black frame.
    pub border_px: u32,
    /// Draw the four hash-keyed corner squares.
    pub corner_markers: bool,
    /// Draw the id/title label inside the bottom frame band.
    pub label: bool,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            image_size_px: 1024,
            border_px: 80,
            corner_markers: true,
            label: true,
        }
    }
}

impl MarkerConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> LessonmarkResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read marker config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            LessonmarkError::serde(format!("parse marker config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check size limits and that the frame leaves room for at least one pixel per cell.
    pub fn validate(&self) -> LessonmarkResult<()> {
        if self.image_size_px == 0 || self.image_size_px > MAX_IMAGE_SIZE_PX {
            return Err(LessonmarkError::validation(format!(
                "image_size_px must be in 1..={MAX_IMAGE_SIZE_PX}, got {}",
                self.image_size_px
            )));
        }
        MarkerLayout::new(self).map(|_| ())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
