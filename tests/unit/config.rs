use std::path::PathBuf;

use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_config");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn default_is_valid() {
    MarkerConfig::default().validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg: MarkerConfig = serde_json::from_str(r#"{ "label": false }"#).unwrap();
    assert!(!cfg.label);
    assert_eq!(cfg.image_size_px, 1024);
    assert!(cfg.corner_markers);
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(serde_json::from_str::<MarkerConfig>(r#"{ "grid_dim": 24 }"#).is_err());
}

#[test]
fn oversized_and_zero_images_fail_validation() {
    for size in [0, MAX_IMAGE_SIZE_PX + 1] {
        let cfg = MarkerConfig {
            image_size_px: size,
            ..MarkerConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(LessonmarkError::Validation(_))
        ));
    }
}

#[test]
fn from_path_reads_and_validates() {
    let ok = scratch("ok.json");
    std::fs::write(&ok, r#"{ "image_size_px": 512, "border_px": 40 }"#).unwrap();
    let cfg = MarkerConfig::from_path(&ok).unwrap();
    assert_eq!(cfg.image_size_px, 512);
    assert_eq!(cfg.border_px, 40);

    let bad = scratch("bad.json");
    std::fs::write(&bad, r#"{ "image_size_px": 64, "border_px": 40 }"#).unwrap();
    assert!(MarkerConfig::from_path(&bad).is_err());

    let garbled = scratch("garbled.json");
    std::fs::write(&garbled, "{ not json").unwrap();
    assert!(matches!(
        MarkerConfig::from_path(&garbled),
        Err(LessonmarkError::Serde(_))
    ));

    assert!(matches!(
        MarkerConfig::from_path(scratch("missing.json")),
        Err(LessonmarkError::Other(_))
    ));
}
