//! Human-readable label drawn into the bottom frame band.
//!
//! Text goes through `usvg` (shaping, font lookup) and `resvg` (rasterization), then is blended
//! over the already-rendered marker. Missing fonts produce no glyphs rather than an error, so the
//! label never decides whether a marker can be generated.

use std::sync::Arc;

use crate::foundation::error::{LessonmarkError, LessonmarkResult};
use crate::render::layout::PixelRect;

const TITLE_MAX_CHARS: usize = 20;
const TITLE_KEEP_CHARS: usize = 18;

// Reference geometry for an 80px band: baselines and font sizes scale with the band height.
const REF_BAND_PX: f32 = 80.0;
const ID_BASELINE: f32 = 45.0;
const ID_FONT_PX: f32 = 32.0;
const TITLE_BASELINE: f32 = 72.0;
const TITLE_FONT_PX: f32 = 24.0;

/// Upper-case `lesson_id` with underscores shown as spaces.
pub fn display_id(lesson_id: &str) -> String {
    lesson_id.replace('_', " ").to_uppercase()
}

/// Titles longer than 20 chars keep their first 18 chars plus `...`.
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_MAX_CHARS {
        let mut out: String = title.chars().take(TITLE_KEEP_CHARS).collect();
        out.push_str("...");
        out
    } else {
        title.to_string()
    }
}

/// Renders marker labels with a shared font database.
#[derive(Clone)]
pub struct LabelRenderer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl std::fmt::Debug for LabelRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelRenderer")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

impl LabelRenderer {
    /// Renderer backed by the system fonts.
    pub fn with_system_fonts() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self::with_fontdb(Arc::new(db))
    }

    /// Renderer backed by an explicit font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    /// Renderer with no fonts at all; labels render as nothing.
    pub fn without_fonts() -> Self {
        Self::with_fontdb(Arc::new(usvg::fontdb::Database::new()))
    }

    /// Number of font faces available for labels.
    pub fn font_faces(&self) -> usize {
        self.fontdb.len()
    }

    /// Build the label SVG for a band of `width x height` pixels.
    pub fn label_svg(&self, width: u32, height: u32, lesson_id: &str, title: &str) -> String {
        let scale = height as f32 / REF_BAND_PX;
        let cx = width as f32 / 2.0;
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
                r##"<text x="{cx}" y="{y1}" font-family="sans-serif" font-size="{s1}" font-weight="bold" text-anchor="middle" fill="#ffffff">{id}</text>"##,
                r##"<text x="{cx}" y="{y2}" font-family="sans-serif" font-size="{s2}" font-weight="bold" text-anchor="middle" fill="#ffffff">{title}</text>"##,
                "</svg>"
            ),
            w = width,
            h = height,
            cx = cx,
            y1 = ID_BASELINE * scale,
            s1 = ID_FONT_PX * scale,
            id = escape_xml(&display_id(lesson_id)),
            y2 = TITLE_BASELINE * scale,
            s2 = TITLE_FONT_PX * scale,
            title = escape_xml(&truncate_title(title)),
        )
    }

    /// Draw the label for `lesson_id`/`title` into `band` of `image`.
    pub fn draw(
        &self,
        image: &mut image::RgbaImage,
        band: PixelRect,
        lesson_id: &str,
        title: &str,
    ) -> LessonmarkResult<()> {
        let (w, h) = (band.width(), band.height());
        if w == 0 || h == 0 {
            return Ok(());
        }

        let svg = self.label_svg(w, h, lesson_id, title);
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_resolver: fallback_font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| LessonmarkError::render(format!("parse label svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
            .ok_or_else(|| LessonmarkError::render("failed to allocate label pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        blend_premul_over(image, band, pixmap.data());
        Ok(())
    }
}

fn fallback_font_resolver() -> usvg::FontResolver<'static> {
    let select_default = usvg::FontResolver::default_font_selector();
    usvg::FontResolver {
        select_font: Box::new(move |font, fontdb| {
            select_default(font, fontdb).or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

/// Blend premultiplied RGBA8 `src` (tightly packed, `band` sized) over opaque `dst`.
fn blend_premul_over(dst: &mut image::RgbaImage, band: PixelRect, src: &[u8]) {
    let w = band.width() as usize;
    for (i, px) in src.chunks_exact(4).enumerate() {
        let a = u16::from(px[3]);
        if a == 0 {
            continue;
        }
        let x = band.x0 + (i % w) as u32;
        let y = band.y0 + (i / w) as u32;
        if x >= dst.width() || y >= dst.height() {
            continue;
        }
        let out = dst.get_pixel_mut(x, y);
        for c in 0..3 {
            let under = u16::from(out.0[c]);
            out.0[c] = (u16::from(px[c]) + (under * (255 - a) + 127) / 255).min(255) as u8;
        }
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/label.rs"]
mod tests;
