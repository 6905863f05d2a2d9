use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "lessonmark", version, about = "Generate printable lesson markers")]
struct Cli {
    /// Markers directory.
    #[arg(long, global = true, default_value = "pictures/markers")]
    out_dir: PathBuf,

    /// Marker render config JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the marker for one lesson.
    Generate(GenerateArgs),
    /// Generate markers for every lesson in a directory of lesson JSON files.
    Batch(BatchArgs),
    /// Print a lesson's cell pattern as text.
    Pattern(PatternArgs),
    /// List stored markers with their SHA-256.
    List,
    /// Delete a stored marker.
    Remove(RemoveArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Lesson id.
    #[arg(long)]
    id: String,

    /// Lesson title shown on the label.
    #[arg(long, default_value = "")]
    title: String,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory of lesson JSON files.
    #[arg(long)]
    lessons: PathBuf,

    /// Generate on a worker pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Print outcomes as a JSON array.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct PatternArgs {
    /// Lesson id.
    #[arg(long)]
    id: String,
}

#[derive(Parser, Debug)]
struct RemoveArgs {
    /// Lesson id.
    #[arg(long)]
    id: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.cmd {
        Command::Generate(args) => cmd_generate(&cli, args),
        Command::Batch(args) => cmd_batch(&cli, args),
        Command::Pattern(args) => cmd_pattern(args),
        Command::List => cmd_list(&cli),
        Command::Remove(args) => cmd_remove(&cli, args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<lessonmark::MarkerConfig> {
    match path {
        Some(p) => Ok(lessonmark::MarkerConfig::from_path(p)?),
        None => Ok(lessonmark::MarkerConfig::default()),
    }
}

fn make_generator(cli: &Cli) -> anyhow::Result<lessonmark::MarkerGenerator> {
    let config = load_config(cli.config.as_deref())?;
    let store = lessonmark::MarkerStore::new(&cli.out_dir);
    Ok(lessonmark::MarkerGenerator::new(store, config))
}

fn cmd_generate(cli: &Cli, args: &GenerateArgs) -> anyhow::Result<()> {
    let generator = make_generator(cli)?;
    let outcome = generator.generate(&lessonmark::MarkerSpec::new(&args.id, &args.title));
    if !outcome.success {
        anyhow::bail!("{}", outcome.message);
    }
    if let Some(location) = &outcome.location {
        eprintln!("wrote {location}");
    }
    Ok(())
}

fn cmd_batch(cli: &Cli, args: &BatchArgs) -> anyhow::Result<()> {
    let catalog = lessonmark::LessonCatalog::load_dir(&args.lessons)
        .with_context(|| format!("load lessons from '{}'", args.lessons.display()))?;
    if catalog.is_empty() {
        anyhow::bail!("no lessons found in '{}'", args.lessons.display());
    }

    let generator = make_generator(cli)?;
    let opts = lessonmark::BatchOpts {
        parallel: args.parallel,
        threads: args.threads,
    };
    let outcomes = generator.generate_all(&catalog.marker_specs(), &opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        for o in &outcomes {
            let status = if o.success { "ok" } else { "FAILED" };
            let detail = o.location.as_deref().unwrap_or(o.message.as_str());
            println!("{status:<6} {:<24} {detail}", o.lesson_id);
        }
    }

    let failed = outcomes.iter().filter(|o| !o.success).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} markers failed", outcomes.len());
    }
    Ok(())
}

fn cmd_pattern(args: &PatternArgs) -> anyhow::Result<()> {
    print!("{}", lessonmark::generate_pattern(&args.id).to_ascii());
    Ok(())
}

fn cmd_list(cli: &Cli) -> anyhow::Result<()> {
    let store = lessonmark::MarkerStore::new(&cli.out_dir);
    for marker in store.list()? {
        let bytes = std::fs::read(&marker.path)
            .with_context(|| format!("read marker '{}'", marker.path.display()))?;
        println!(
            "{:<24} {}  {}",
            marker.lesson_id,
            marker.path.display(),
            sha256_hex(&bytes)
        );
    }
    Ok(())
}

fn cmd_remove(cli: &Cli, args: &RemoveArgs) -> anyhow::Result<()> {
    let store = lessonmark::MarkerStore::new(&cli.out_dir);
    if store.remove(&args.id)? {
        eprintln!("removed {}", store.path_for(&args.id).display());
    } else {
        eprintln!("no marker for '{}'", args.id);
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
