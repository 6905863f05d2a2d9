use crate::config::MarkerConfig;
use crate::foundation::core::GRID_DIM;
use crate::foundation::error::{LessonmarkError, LessonmarkResult};

/// Axis-aligned pixel rectangle, half-open: `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge (inclusive).
    pub x0: u32,
    /// Top edge (inclusive).
    pub y0: u32,
    /// Right edge (exclusive).
    pub x1: u32,
    /// Bottom edge (exclusive).
    pub y1: u32,
}

impl PixelRect {
    /// Rectangle from origin and size.
    pub fn from_origin_size(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + w,
            y1: y + h,
        }
    }

    /// Width in pixels.
    pub fn width(self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    /// Height in pixels.
    pub fn height(self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// Shrink by `d` pixels on every side.
    pub fn inset(self, d: u32) -> Self {
        Self {
            x0: self.x0 + d,
            y0: self.y0 + d,
            x1: self.x1.saturating_sub(d).max(self.x0 + d),
            y1: self.y1.saturating_sub(d).max(self.y0 + d),
        }
    }

    /// Return `true` when `(x, y)` is inside the rectangle.
    pub fn contains(self, x: u32, y: u32) -> bool {
        self.x0 <= x && x < self.x1 && self.y0 <= y && y < self.y1
    }
}

/// Pixel geometry of a marker image.
///
/// The frame occupies `border_px` on each side; grid cells are `cell_px` squares starting at
/// `(border_px, border_px)`, where `cell_px = floor((size - 2 * border) / GRID_DIM)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerLayout {
    /// Image side length.
    pub size_px: u32,
    /// Frame thickness.
    pub border_px: u32,
    /// Side length of one grid cell.
    pub cell_px: u32,
}

impl MarkerLayout {
    /// Derive the layout from `cfg`, rejecting frames that leave no room for the grid.
    pub fn new(cfg: &MarkerConfig) -> LessonmarkResult<Self> {
        let size_px = cfg.image_size_px;
        let border_px = cfg.border_px;
        let inner = border_px
            .checked_mul(2)
            .and_then(|b| size_px.checked_sub(b))
            .filter(|&inner| inner > 0)
            .ok_or_else(|| {
                LessonmarkError::validation(format!(
                    "border {border_px}px leaves no room inside a {size_px}px marker"
                ))
            })?;

        let cell_px = inner / GRID_DIM as u32;
        if cell_px == 0 {
            return Err(LessonmarkError::validation(format!(
                "marker interior of {inner}px is too small for a {GRID_DIM}x{GRID_DIM} grid"
            )));
        }

        Ok(Self {
            size_px,
            border_px,
            cell_px,
        })
    }

    /// The four frame bands: top, bottom, left, right.
    pub fn frame_rects(&self) -> [PixelRect; 4] {
        let s = self.size_px;
        let b = self.border_px;
        [
            PixelRect::from_origin_size(0, 0, s, b),
            PixelRect::from_origin_size(0, s - b, s, b),
            PixelRect::from_origin_size(0, 0, b, s),
            PixelRect::from_origin_size(s - b, 0, b, s),
        ]
    }

    /// Rectangle covered by grid cell `(x, y)`.
    pub fn cell_rect(&self, x: usize, y: usize) -> PixelRect {
        PixelRect::from_origin_size(
            self.border_px + x as u32 * self.cell_px,
            self.border_px + y as u32 * self.cell_px,
            self.cell_px,
            self.cell_px,
        )
    }

    /// Corner marker squares as `[top-left, top-right, bottom-left, bottom-right]`.
    ///
    /// Each square is two cells wide and sits one cell in from the inner corner of the frame.
    pub fn corner_rects(&self) -> [PixelRect; 4] {
        let side = self.cell_px * 2;
        let near = self.border_px + self.cell_px;
        let far = self.size_px - self.border_px - side - self.cell_px;
        [
            PixelRect::from_origin_size(near, near, side, side),
            PixelRect::from_origin_size(far, near, side, side),
            PixelRect::from_origin_size(near, far, side, side),
            PixelRect::from_origin_size(far, far, side, side),
        ]
    }

    /// Bottom frame band, where the label is drawn.
    pub fn label_band(&self) -> PixelRect {
        self.frame_rects()[1]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
