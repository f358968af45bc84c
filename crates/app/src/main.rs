mod telemetry;

use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, InstallationTracker, ProgressService, QuizFlow};
use tracing::info;
use tutor_core::model::{DEFAULT_TOTAL_ITEMS, ItemKey};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidTotalItems { raw: String },
    InvalidItemKey { raw: String },
    MissingOperand { command: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidTotalItems { raw } => {
                write!(f, "invalid --total-items value (expected a positive integer): {raw}")
            }
            ArgsError::InvalidItemKey { raw } => write!(f, "invalid item key: {raw:?}"),
            ArgsError::MissingOperand { command } => write!(f, "{command} requires an argument"),
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

fn parse_total_items(raw: String) -> Result<u32, ArgsError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ArgsError::InvalidTotalItems { raw }),
    }
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn installation_tracker(&self) -> InstallationTracker {
        self.services
            .installation_tracker(Some(Arc::new(|| info!("installation checklist finished"))))
    }

    fn models_quiz(&self) -> QuizFlow {
        self.services.models_quiz()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui     [--db <sqlite_url>] [--total-items <n>]");
    eprintln!("  cargo run -p app -- status [--db <sqlite_url>] [--total-items <n>]");
    eprintln!("  cargo run -p app -- mark <item-key> [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- reset  [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- run <terminal command...> [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://<cwd>/tutor.sqlite3");
    eprintln!("  --total-items {DEFAULT_TOTAL_ITEMS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTOR_DB_URL, TUTOR_TOTAL_ITEMS, LOG_LEVEL, LOG_FORMAT=json");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Status,
    Mark,
    Reset,
    Run,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "status" => Some(Self::Status),
            "mark" => Some(Self::Mark),
            "reset" => Some(Self::Reset),
            "run" => Some(Self::Run),
            _ => None,
        }
    }

    /// Whether the command takes free-form words after the subcommand.
    fn takes_operands(self) -> bool {
        matches!(self, Self::Mark | Self::Run)
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    total_items: u32,
    operands: Vec<String>,
}

impl Args {
    fn parse(cmd: Command, args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("TUTOR_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| normalize_sqlite_url("tutor.sqlite3".into()), normalize_sqlite_url);
        let mut total_items = match std::env::var("TUTOR_TOTAL_ITEMS") {
            Ok(raw) => parse_total_items(raw)?,
            Err(_) => DEFAULT_TOTAL_ITEMS,
        };
        let mut operands = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--total-items" => {
                    total_items = parse_total_items(require_value(&mut args, "--total-items")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if cmd.takes_operands() => operands.push(arg),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            total_items,
            operands,
        })
    }

    fn item_key(&self) -> Result<ItemKey, ArgsError> {
        let raw = match self.operands.as_slice() {
            [] => return Err(ArgsError::MissingOperand { command: "mark" }),
            [single] => single.clone(),
            [_, extra, ..] => return Err(ArgsError::UnknownArg(extra.clone())),
        };
        ItemKey::new(raw.clone()).map_err(|_| ArgsError::InvalidItemKey { raw })
    }

    fn terminal_command(&self) -> Result<String, ArgsError> {
        if self.operands.is_empty() {
            return Err(ArgsError::MissingOperand { command: "run" });
        }
        Ok(self.operands.join(" "))
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

fn print_status(progress: &ProgressService) {
    let snapshot = progress.snapshot();
    println!(
        "Progress: {}/{} ({}%){}",
        snapshot.completed_count,
        snapshot.total_items,
        snapshot.progress_percentage,
        if snapshot.is_mastered() { " - mastered" } else { "" }
    );
    let keys = progress.completed_keys();
    if keys.is_empty() {
        println!("No items completed yet.");
        return;
    }
    println!("Completed:");
    for key in keys {
        println!("  {key}");
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(cmd, argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    info!(db = %parsed.db_url, total_items = parsed.total_items, "opening progress store");
    let services = AppServices::new_sqlite(&parsed.db_url, parsed.total_items).await?;

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                services: services.clone(),
            });
            let context = build_app_context(app);

            // Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("DRF Tutor")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            services.progress().flush().await;
            Ok(())
        }
        Command::Status => {
            print_status(&services.progress());
            services.shutdown().await;
            Ok(())
        }
        Command::Mark => {
            let key = parsed.item_key()?;
            if services.progress().mark_completed(&key).await {
                println!("Marked {key} as completed.");
            } else {
                println!("{key} was already completed.");
            }
            print_status(&services.progress());
            services.shutdown().await;
            Ok(())
        }
        Command::Reset => {
            services.progress().reset_progress().await;
            println!("Progress reset.");
            services.shutdown().await;
            Ok(())
        }
        Command::Run => {
            let line = parsed.terminal_command()?;
            let tracker = services.installation_tracker(None);
            match tracker.handle_command(&line).await {
                Some(step) => println!("Step completed: {step}"),
                None => println!("No installation step matches: {line}"),
            }
            drop(tracker);
            print_status(&services.progress());
            services.shutdown().await;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    telemetry::init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn total_items_must_be_positive() {
        assert!(parse_total_items("30".into()).is_ok());
        assert!(matches!(
            parse_total_items("0".into()),
            Err(ArgsError::InvalidTotalItems { .. })
        ));
        assert!(parse_total_items("many".into()).is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let parsed = Args::parse(
            Command::Status,
            args(&["--db", "sqlite::memory:", "--total-items", "12"]),
        )
        .unwrap();
        assert_eq!(parsed.db_url, "sqlite::memory:");
        assert_eq!(parsed.total_items, 12);
    }

    #[test]
    fn run_keeps_command_words() {
        let parsed = Args::parse(
            Command::Run,
            args(&["pip", "install", "djangorestframework", "--db", "sqlite::memory:"]),
        )
        .unwrap();
        assert_eq!(
            parsed.terminal_command().unwrap(),
            "pip install djangorestframework"
        );
    }

    #[test]
    fn mark_requires_a_single_non_empty_key() {
        let parsed = Args::parse(Command::Mark, args(&["views"])).unwrap();
        assert_eq!(parsed.item_key().unwrap().as_str(), "views");

        let empty = Args::parse(Command::Mark, args(&["  "])).unwrap();
        assert!(matches!(empty.item_key(), Err(ArgsError::InvalidItemKey { .. })));

        let missing = Args::parse(Command::Mark, Vec::new()).unwrap();
        assert!(matches!(missing.item_key(), Err(ArgsError::MissingOperand { .. })));
    }

    #[test]
    fn positional_words_are_rejected_for_status() {
        let err = Args::parse(Command::Status, args(&["extra"])).unwrap_err();
        assert!(matches!(err, ArgsError::UnknownArg(_)));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("data/tutor.sqlite3".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/tutor.sqlite3"));
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }
}
