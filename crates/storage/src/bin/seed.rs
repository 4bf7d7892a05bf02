use std::fmt;

use storage::repository::Storage;
use study_core::Catalog;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    admins: Vec<String>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidAdmin { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidAdmin { raw } => write!(f, "invalid --admin value: {raw:?}"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("UNILEARN_DB_URL").unwrap_or_else(|_| "sqlite:unilearn.sqlite3".into());
        let mut admins = Vec::new();

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--admin" => {
                    let value = require_value(&mut args, "--admin")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidAdmin { raw: value });
                    }
                    admins.push(value.trim().to_owned());
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, admins })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:unilearn.sqlite3)");
    eprintln!("  --admin <user>            Grant the admin flag to a user (repeatable)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  UNILEARN_DB_URL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let catalog = Catalog::bundled()?;

    let subjects: Vec<_> = catalog
        .levels()
        .iter()
        .flat_map(|level| level.subjects.iter().cloned())
        .collect();
    storage.catalog.upsert_subjects(&subjects).await?;

    for admin in &args.admins {
        storage.profiles.set_admin(admin, true).await?;
    }

    println!(
        "Seeded {} subjects ({} lectures) and {} admin profiles into {}",
        subjects.len(),
        catalog.all_lectures().count(),
        args.admins.len(),
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
