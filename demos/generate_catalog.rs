//! Generate markers for the bundled demo lessons into `target/demo_markers/`.

use lessonmark::{BatchOpts, LessonCatalog, MarkerConfig, MarkerGenerator, MarkerStore};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let lessons_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/lessons");
    let catalog = LessonCatalog::load_dir(&lessons_dir)?;

    let store = MarkerStore::new("target/demo_markers");
    let generator = MarkerGenerator::new(store, MarkerConfig::default());
    let opts = BatchOpts {
        parallel: true,
        threads: None,
    };

    for outcome in generator.generate_all(&catalog.marker_specs(), &opts)? {
        match outcome.location {
            Some(path) => println!("{:<16} {path}", outcome.lesson_id),
            None => println!("{:<16} FAILED: {}", outcome.lesson_id, outcome.message),
        }
    }

    for lesson in catalog.by_subject("physics") {
        println!("physics lesson: {} ({})", lesson.title, lesson.id);
    }
    Ok(())
}
