use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppConfig, AppServices, AuthState, CatalogSource, ImportReport};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidCatalog { raw: String },
    MissingImportFile,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidCatalog { raw } => write!(
                f,
                "invalid --catalog value: {raw} (expected bundled, store or an http(s) URL)"
            ),
            ArgsError::MissingImportFile => write!(f, "import requires a JSON file path"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  unilearn ui     [--db <sqlite_url>] [--state <file>] [--catalog <source>] [--user <id>]");
    eprintln!("  unilearn seed   [--db <sqlite_url>] --as <admin_id>");
    eprintln!("  unilearn import <file.json> [--db <sqlite_url>] --as <admin_id>");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:unilearn.sqlite3");
    eprintln!("  --state unilearn-state.json");
    eprintln!("  --catalog bundled   (bundled | store | http(s) URL)");
    eprintln!();
    eprintln!("Grant the admin flag with: cargo run -p storage --bin seed -- --admin <id>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  UNILEARN_DB_URL, UNILEARN_STATE_FILE, UNILEARN_CATALOG, UNILEARN_USER, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Seed,
    Import,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "seed" => Some(Self::Seed),
            "import" => Some(Self::Import),
            _ => None,
        }
    }
}

struct Args {
    config: AppConfig,
    /// Acting user for `seed` and `import`.
    actor: Option<String>,
    file: Option<PathBuf>,
}

impl Args {
    fn parse(
        command: Command,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("UNILEARN_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url("unilearn.sqlite3".into()), normalize_sqlite_url);
        let mut state_file = std::env::var("UNILEARN_STATE_FILE")
            .map_or_else(|_| PathBuf::from("unilearn-state.json"), PathBuf::from);
        let mut catalog_source = match std::env::var("UNILEARN_CATALOG") {
            Ok(raw) => parse_catalog(&raw)?,
            Err(_) => CatalogSource::default(),
        };
        let mut user = std::env::var("UNILEARN_USER")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut actor = None;
        let mut file = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--state" => state_file = PathBuf::from(require_value(args, "--state")?),
                "--catalog" => catalog_source = parse_catalog(&require_value(args, "--catalog")?)?,
                "--user" => user = Some(require_value(args, "--user")?),
                "--as" => actor = Some(require_value(args, "--as")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                path if command == Command::Import && file.is_none() && !path.starts_with("--") => {
                    file = Some(PathBuf::from(path));
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if command == Command::Import && file.is_none() {
            return Err(ArgsError::MissingImportFile);
        }

        Ok(Self {
            config: AppConfig {
                db_url: Some(db_url),
                state_file: Some(state_file),
                catalog_source,
                user: actor.clone().or(user),
            },
            actor,
            file,
        })
    }
}

fn parse_catalog(raw: &str) -> Result<CatalogSource, ArgsError> {
    raw.parse()
        .map_err(|_| ArgsError::InvalidCatalog { raw: raw.to_owned() })
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") || raw.starts_with("sqlite:file:") {
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
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
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

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    if let Some(url) = &parsed.config.db_url {
        prepare_sqlite_file(url)?;
    }
    let services = AppServices::from_config(&parsed.config).await?;

    match cmd {
        Command::Ui => launch_ui(services),
        Command::Seed => {
            let actor = admin_session(&services, parsed.actor.as_deref()).await?;
            let report = services.import().seed_bundled(&actor).await?;
            print_report("seeded", report);
            Ok(())
        }
        Command::Import => {
            let Some(file) = parsed.file else {
                return Err(ArgsError::MissingImportFile.into());
            };
            let actor = admin_session(&services, parsed.actor.as_deref()).await?;
            let raw = std::fs::read_to_string(&file)?;
            let report = services.import().import_subjects(&actor, &raw).await?;
            print_report("imported", report);
            Ok(())
        }
    }
}

fn launch_ui(services: AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let _subscription = services.auth().on_session_change(|state| match state.user() {
        Some(user) => tracing::info!(user = %user.id, "session changed"),
        None => tracing::info!("signed out"),
    });

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // Some dev setups open an always-on-top window unless told otherwise.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("UniLearn")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

/// Resolve the session an offline command acts as; the admin check happens
/// inside the import service.
async fn admin_session(
    services: &AppServices,
    actor: Option<&str>,
) -> Result<AuthState, Box<dyn std::error::Error>> {
    if actor.is_none() {
        tracing::warn!("no --as user given; the import will be refused");
    }
    Ok(services.auth().refresh().await?)
}

fn print_report(verb: &str, report: ImportReport) {
    println!(
        "{verb} {} subject(s) with {} lecture(s)",
        report.imported_count, report.lecture_count
    );
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" || db_url.starts_with("sqlite:file:") {
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

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // Binary glue: report once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
