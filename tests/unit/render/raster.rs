use super::*;
use crate::foundation::core::GRID_DIM;

fn center(rect: PixelRect) -> (u32, u32) {
    ((rect.x0 + rect.x1) / 2, (rect.y0 + rect.y1) / 2)
}

fn plain_cfg() -> MarkerConfig {
    MarkerConfig {
        corner_markers: false,
        label: false,
        ..MarkerConfig::default()
    }
}

#[test]
fn cells_follow_the_pattern() {
    let spec = MarkerSpec::new("physics_001", "Newton's Laws");
    let cfg = plain_cfg();
    let img = render_marker(&spec, &cfg, &LabelRenderer::without_fonts()).unwrap();
    assert_eq!(img.size_px(), 1024);

    let layout = MarkerLayout::new(&cfg).unwrap();
    let grid = generate_pattern("physics_001");
    for (x, y, set) in grid.iter() {
        let (px, py) = center(layout.cell_rect(x, y));
        let expected = if set { BLACK } else { WHITE };
        assert_eq!(*img.pixels.get_pixel(px, py), expected, "cell ({x},{y})");
    }
}

#[test]
fn frame_is_black_and_remainder_white() {
    let cfg = plain_cfg();
    let img = render_marker(&MarkerSpec::new("a", "b"), &cfg, &LabelRenderer::without_fonts())
        .unwrap();
    for (x, y) in [(0, 0), (40, 512), (1000, 1000), (512, 1023)] {
        assert_eq!(*img.pixels.get_pixel(x, y), BLACK);
    }
    // 20 * 43 = 860 pixels of grid leave a 4px strip inside the frame.
    let strip = 80 + GRID_DIM as u32 * 43;
    assert_eq!(*img.pixels.get_pixel(strip, 500), WHITE);
    assert_eq!(*img.pixels.get_pixel(500, strip + 3), WHITE);
}

#[test]
fn corners_use_hash_polarity() {
    let cfg = MarkerConfig {
        label: false,
        ..MarkerConfig::default()
    };
    let id = "chemistry_002";
    let img = render_marker(&MarkerSpec::new(id, ""), &cfg, &LabelRenderer::without_fonts())
        .unwrap();
    let layout = MarkerLayout::new(&cfg).unwrap();
    for (rect, set) in layout.corner_rects().into_iter().zip(corner_bits(id)) {
        let (outer, inner) = if set { (BLACK, WHITE) } else { (WHITE, BLACK) };
        assert_eq!(*img.pixels.get_pixel(rect.x0, rect.y0), outer);
        let (cx, cy) = center(rect);
        assert_eq!(*img.pixels.get_pixel(cx, cy), inner);
    }
}

#[test]
fn corner_bits_match_truncating_division() {
    let h = lesson_hash("physics_001", 0);
    let bits = corner_bits("physics_001");
    assert_eq!(bits[0], h % 2 == 1);
    assert_eq!(bits[3], (h / 4) % 2 == 1);
}

#[test]
fn title_does_not_touch_grid_pixels() {
    let cfg = MarkerConfig::default();
    let labels = LabelRenderer::without_fonts();
    let a = render_marker(&MarkerSpec::new("bio_7", "Cells"), &cfg, &labels).unwrap();
    let b = render_marker(&MarkerSpec::new("bio_7", "Mitosis"), &cfg, &labels).unwrap();
    let layout = MarkerLayout::new(&cfg).unwrap();
    for y in layout.border_px..layout.size_px - layout.border_px {
        for x in layout.border_px..layout.size_px - layout.border_px {
            assert_eq!(a.pixels.get_pixel(x, y), b.pixels.get_pixel(x, y));
        }
    }
}

#[test]
fn small_config_renders_and_encodes() {
    let cfg = MarkerConfig {
        image_size_px: 128,
        border_px: 8,
        ..MarkerConfig::default()
    };
    let img = render_marker(&MarkerSpec::new("geo_1", "Rocks"), &cfg, &LabelRenderer::without_fonts())
        .unwrap();
    let png = img.encode_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (128, 128));
    assert_eq!(decoded, img.pixels);
}

#[test]
fn invalid_config_is_an_error() {
    let cfg = MarkerConfig {
        image_size_px: 30,
        border_px: 10,
        ..MarkerConfig::default()
    };
    assert!(render_marker(&MarkerSpec::new("x", "y"), &cfg, &LabelRenderer::without_fonts()).is_err());
}

#[test]
fn corners_separate_ids_sharing_a_grid() {
    use std::collections::HashSet;

    let ids: Vec<String> = ["physics", "biology", "chemistry", "geology", "astronomy"]
        .iter()
        .flat_map(|s| (1..=10).map(move |n| format!("{s}_{n:03}")))
        .collect();
    let grids: HashSet<_> = ids.iter().map(|id| generate_pattern(id)).collect();
    let signatures: HashSet<_> = ids
        .iter()
        .map(|id| (generate_pattern(id), corner_bits(id)))
        .collect();
    assert_eq!(grids.len(), 6);
    assert_eq!(signatures.len(), 20);
}
