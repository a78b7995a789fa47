use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use quiz_core::model::Dataset;
use services::{DatasetSource, QuizService, StatsService, load_dataset};
use storage::repository::Storage;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://echoquiz.sqlite3";
const DEFAULT_DATA: &str = "data/MIMICEchoQA.json";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    dataset: Arc<Dataset>,
    dataset_error: Option<String>,
    quiz: Arc<Mutex<QuizService>>,
    stats: Arc<StatsService>,
}

impl UiApp for DesktopApp {
    fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }

    fn dataset_error(&self) -> Option<String> {
        self.dataset_error.clone()
    }

    fn quiz(&self) -> Arc<Mutex<QuizService>> {
        Arc::clone(&self.quiz)
    }

    fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }
}

struct Args {
    db_url: String,
    data: DatasetSource,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--data <path_or_url>] [--ephemeral]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db   {DEFAULT_DB_URL}");
    eprintln!("  --data {DEFAULT_DATA}");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --ephemeral   keep progress in memory only (overrides --db)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ECHOQUIZ_DB_URL, ECHOQUIZ_DATA");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("ECHOQUIZ_DB_URL")
            .ok()
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut data = std::env::var("ECHOQUIZ_DATA")
            .ok()
            .map_or_else(|| DatasetSource::parse(DEFAULT_DATA), |v| DatasetSource::parse(&v));
        let mut ephemeral = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--data" => {
                    let value = require_value(args, "--data")?;
                    data = DatasetSource::parse(&value);
                }
                "--ephemeral" => ephemeral = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if ephemeral {
            db_url = "sqlite::memory:".into();
        }

        Ok(Self { db_url, data })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut iter = std::env::args().skip(1);
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    let progress = Arc::clone(&storage.progress);

    // A dataset that fails to load is not fatal: the UI starts with an empty
    // bank and surfaces the error on the quiz tab.
    let (dataset, dataset_error) = match load_dataset(&parsed.data).await {
        Ok(dataset) => (Arc::new(dataset), None),
        Err(err) => {
            error!(source = %parsed.data, %err, "failed to load question set");
            (
                Arc::new(Dataset::from_items(Vec::new())),
                Some(format!("Failed to load questions from {}: {err}", parsed.data)),
            )
        }
    };
    info!(questions = dataset.len(), db = %parsed.db_url, "starting");

    let quiz = Arc::new(Mutex::new(QuizService::new(
        Arc::clone(&dataset),
        Arc::clone(&progress),
    )));
    let stats = Arc::new(StatsService::new(Arc::clone(&dataset), progress));

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        dataset,
        dataset_error,
        quiz,
        stats,
    });
    let context = build_app_context(&app);

    // Explicitly disable always-on-top; some dev setups default to it.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("EchoQuiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
