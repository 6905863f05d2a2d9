use super::*;

fn fresh_store(name: &str) -> MarkerStore {
    let dir = PathBuf::from("target").join("unit_store").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    MarkerStore::new(dir)
}

fn tiny_png(shade: u8) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([shade, shade, shade, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn file_names_round_trip() {
    assert_eq!(marker_file_name("physics_001"), "marker_physics_001.png");
    assert_eq!(lesson_id_from_file_name("marker_physics_001.png"), Some("physics_001"));
    assert_eq!(lesson_id_from_file_name("marker_.png"), None);
    assert_eq!(lesson_id_from_file_name("physics_001.png"), None);
    assert_eq!(lesson_id_from_file_name("marker_a.jpg"), None);
}

#[test]
fn write_overwrites_in_place() {
    let store = fresh_store("overwrite");
    let first = store.write_png("bio_1", &tiny_png(0)).unwrap();
    let second = store.write_png("bio_1", &tiny_png(255)).unwrap();
    assert_eq!(first, second);

    let names: Vec<_> = std::fs::read_dir(store.root())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names.len(), 1);

    let loaded = store.load("bio_1").unwrap().unwrap();
    assert_eq!(loaded.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn list_skips_foreign_files_and_sorts() {
    let store = fresh_store("list");
    store.write_png("zeta", &tiny_png(1)).unwrap();
    store.write_png("alpha", &tiny_png(2)).unwrap();
    std::fs::write(store.root().join("notes.txt"), "x").unwrap();
    std::fs::write(store.root().join("photo.png"), "x").unwrap();
    std::fs::create_dir_all(store.root().join("marker_dir.png")).unwrap();

    let ids: Vec<_> = store
        .list()
        .unwrap()
        .into_iter()
        .map(|m| m.lesson_id)
        .collect();
    assert_eq!(ids, ["alpha", "zeta"]);
}

#[test]
fn missing_directory_is_empty() {
    let store = fresh_store("never_created");
    assert!(store.list().unwrap().is_empty());
    assert!(store.find("x").is_none());
    assert!(store.load("x").unwrap().is_none());
}

#[test]
fn remove_reports_presence() {
    let store = fresh_store("remove");
    store.write_png("chem_1", &tiny_png(9)).unwrap();
    assert!(store.remove("chem_1").unwrap());
    assert!(!store.remove("chem_1").unwrap());
    assert!(store.find("chem_1").is_none());
    assert!(store.remove("../escape").is_err());
}

#[test]
fn blocked_target_is_a_storage_error() {
    let store = fresh_store("blocked");
    std::fs::create_dir_all(store.path_for("blocked")).unwrap();
    let err = store.write_png("blocked", &tiny_png(0)).unwrap_err();
    assert!(matches!(err, LessonmarkError::Storage { .. }), "{err}");
    // The temp file is cleaned up after the failed rename.
    let leftovers: Vec<_> = std::fs::read_dir(store.root())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn invalid_ids_never_touch_disk() {
    let store = fresh_store("invalid");
    assert!(matches!(
        store.write_png("", &tiny_png(0)),
        Err(LessonmarkError::Validation(_))
    ));
    assert!(!store.root().exists());
}

#[test]
fn find_and_load_reject_invalid_ids() {
    let store = fresh_store("lookup_invalid");
    std::fs::create_dir_all(store.root()).unwrap();
    std::fs::write(store.root().join("marker_.png"), tiny_png(0)).unwrap();
    assert!(store.find("").is_none());
    assert!(store.find("..").is_none());
    assert!(matches!(store.load(""), Err(LessonmarkError::Validation(_))));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn temp_names_differ_per_write() {
    let a = tmp_file_name("bio_1");
    let b = tmp_file_name("bio_1");
    assert_ne!(a, b);
    assert!(a.starts_with(".marker_bio_1.png."));
    assert!(a.ends_with(".tmp"));
}
