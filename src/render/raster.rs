use std::io::Cursor;

use anyhow::Context as _;
use image::{Rgba, RgbaImage};

use crate::config::MarkerConfig;
use crate::foundation::core::MarkerSpec;
use crate::foundation::error::LessonmarkResult;
use crate::pattern::grid::{PatternGrid, generate_pattern};
use crate::pattern::hash::lesson_hash;
use crate::render::label::LabelRenderer;
use crate::render::layout::{MarkerLayout, PixelRect};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A rendered marker: opaque RGBA8 pixels plus the id they encode.
#[derive(Clone, Debug)]
pub struct MarkerImage {
    /// Lesson id the pattern was derived from.
    pub lesson_id: String,
    /// Straight-alpha RGBA8 pixels; every pixel is opaque.
    pub pixels: RgbaImage,
}

impl MarkerImage {
    /// Side length in pixels.
    pub fn size_px(&self) -> u32 {
        self.pixels.width()
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> LessonmarkResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .with_context(|| format!("encode marker png for '{}'", self.lesson_id))?;
        Ok(buf)
    }
}

/// Corner square polarities `[top-left, top-right, bottom-left, bottom-right]` for `lesson_id`.
///
/// Taken from the seed-0 hash `h` as `h % 2`, `(h / 2) % 2`, `(h / 3) % 2`, `(h / 4) % 2` with
/// truncating division; a negative remainder counts as clear.
pub fn corner_bits(lesson_id: &str) -> [bool; 4] {
    let h = lesson_hash(lesson_id, 0);
    [h % 2 == 1, (h / 2) % 2 == 1, (h / 3) % 2 == 1, (h / 4) % 2 == 1]
}

/// Rasterize the marker for `spec`.
///
/// Draw order: white background, black frame, grid cells, corner squares, label.
#[tracing::instrument(skip_all, fields(lesson_id = %spec.lesson_id))]
pub fn render_marker(
    spec: &MarkerSpec,
    cfg: &MarkerConfig,
    labels: &LabelRenderer,
) -> LessonmarkResult<MarkerImage> {
    cfg.validate()?;
    let layout = MarkerLayout::new(cfg)?;
    let grid = generate_pattern(&spec.lesson_id);

    let mut pixels = RgbaImage::from_pixel(layout.size_px, layout.size_px, WHITE);
    for rect in layout.frame_rects() {
        fill_rect(&mut pixels, rect, BLACK);
    }
    draw_grid(&mut pixels, &layout, &grid);
    if cfg.corner_markers {
        draw_corners(&mut pixels, &layout, corner_bits(&spec.lesson_id));
    }
    if cfg.label {
        labels.draw(&mut pixels, layout.label_band(), &spec.lesson_id, &spec.title)?;
    }

    Ok(MarkerImage {
        lesson_id: spec.lesson_id.clone(),
        pixels,
    })
}

fn draw_grid(pixels: &mut RgbaImage, layout: &MarkerLayout, grid: &PatternGrid) {
    for (x, y, set) in grid.iter() {
        fill_rect(
            pixels,
            layout.cell_rect(x, y),
            if set { BLACK } else { WHITE },
        );
    }
}

fn draw_corners(pixels: &mut RgbaImage, layout: &MarkerLayout, bits: [bool; 4]) {
    for (rect, set) in layout.corner_rects().into_iter().zip(bits) {
        let (outer, inner) = if set { (BLACK, WHITE) } else { (WHITE, BLACK) };
        fill_rect(pixels, rect, outer);
        fill_rect(pixels, rect.inset(rect.width() / 4), inner);
    }
}

fn fill_rect(pixels: &mut RgbaImage, rect: PixelRect, color: Rgba<u8>) {
    let x1 = rect.x1.min(pixels.width());
    let y1 = rect.y1.min(pixels.height());
    for y in rect.y0..y1 {
        for x in rect.x0..x1 {
            pixels.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
