//! Command-line shell for Liturgia.
//!
//! # Responsibility
//! - Map subcommands onto `liturgia_core` use cases.
//! - Keep storage setup and file IO at the edge; core stays pure.
//!
//! # Invariants
//! - Without `--db` every command runs against a seeded in-memory database.
//! - Saved-mass commands require `--db`.

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use liturgia_core::db::{open_db, open_db_in_memory, Connection};
use liturgia_core::mass::registry::PartCatalog;
use liturgia_core::{
    daily_liturgy, default_log_level, format_all, format_hour, hour_for, init_logging,
    ExportTargets, HourKind, MassForm, MassId, MassService, PdfOptions, Section,
    SqliteCalendarStore, SqliteMassRepository,
};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Cli {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, Args)]
struct GlobalOpts {
    /// SQLite database file; an in-memory database is used when omitted
    #[arg(global = true, long)]
    db: Option<PathBuf>,

    /// Directory for rolling log files; logging is off when omitted
    #[arg(global = true, long)]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(global = true, long)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the liturgy of a day
    Daily {
        /// Date as YYYY-MM-DD; today when omitted
        #[arg(long)]
        date: Option<String>,
        /// Print the liturgy as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one hour of the Liturgy of the Hours, or all of them
    Hours {
        #[arg(long)]
        date: Option<String>,
        /// Hour key (oficio, laudes, terca, sexta, nona, vesperas, completas)
        #[arg(long, conflicts_with = "all")]
        hour: Option<String>,
        #[arg(long)]
        all: bool,
    },
    /// Build a custom Mass from a JSON form and export it
    Mass {
        /// JSON file with the form fields
        #[arg(long)]
        form: PathBuf,
        /// JSON file with PDF options
        #[arg(long)]
        options: Option<PathBuf>,
        #[arg(long)]
        text: Option<PathBuf>,
        #[arg(long)]
        pdf: Option<PathBuf>,
        #[arg(long)]
        docx: Option<PathBuf>,
        /// Save the built Mass under this name
        #[arg(long)]
        save: Option<String>,
    },
    /// List the part catalog grouped by section
    Parts {
        /// Show only the reduced catalog
        #[arg(long)]
        simple: bool,
    },
    /// Manage saved masses
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
enum SavedAction {
    List,
    Show {
        id: String,
    },
    Delete {
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    setup_logging(&cli.global_opts)?;

    let conn = open_connection(cli.global_opts.db.as_deref())?;

    match cli.command {
        Commands::Daily { date, json } => {
            let date = date.unwrap_or_else(today);
            let store = SqliteCalendarStore::new(&conn);
            let liturgy = daily_liturgy(&store, &date)
                .with_context(|| format!("Failed to look up the liturgy of {date}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&liturgy)?);
            } else {
                println!("{}", liturgy.full_text());
            }
        }
        Commands::Hours { date, hour, all } => {
            let date = date.unwrap_or_else(today);
            let text = if all {
                format_all(&date)?
            } else {
                let kind = HourKind::parse_or_laudes(hour.as_deref());
                format_hour(&hour_for(kind, &date)?)
            };
            println!("{text}");
        }
        Commands::Mass {
            form,
            options,
            text,
            pdf,
            docx,
            save,
        } => {
            if save.is_some() {
                require_db(&cli.global_opts)?;
            }
            let form: MassForm = read_json(&form)?;
            let options: PdfOptions = match options {
                Some(path) => read_json(&path)?,
                None => PdfOptions::default(),
            };
            let document = MassService::<SqliteMassRepository<'_>>::build(&form)?;

            let targets = ExportTargets { text, pdf, docx };
            if targets.text.is_none() && targets.pdf.is_none() && targets.docx.is_none() {
                println!("{}", document.full_text());
            }
            MassService::<SqliteMassRepository<'_>>::export(&document, &targets, &options)
                .context("Failed to export the Mass")?;

            if let Some(name) = save {
                let service = MassService::new(SqliteMassRepository::new(&conn));
                let id = service.save(&name, &document)?;
                println!("{id}");
            }
        }
        Commands::Parts { simple } => {
            let catalog = if simple {
                PartCatalog::Simple
            } else {
                PartCatalog::Complete
            };
            for section in Section::ALL {
                println!("{section}");
                for spec in catalog
                    .specs()
                    .iter()
                    .filter(|spec| Section::for_order(spec.order) == section)
                {
                    println!("  {:>2}  {:<24} {}", spec.order, spec.key, spec.title);
                }
            }
        }
        Commands::Saved { action } => {
            require_db(&cli.global_opts)?;
            let service = MassService::new(SqliteMassRepository::new(&conn));
            match action {
                SavedAction::List => {
                    for summary in service.list()? {
                        println!(
                            "{}  {}  {}  {}",
                            summary.id,
                            summary.name,
                            summary.celebration_date.as_deref().unwrap_or("-"),
                            summary.celebration_name.as_deref().unwrap_or("-"),
                        );
                    }
                }
                SavedAction::Show { id } => {
                    let saved = service.load(parse_id(&id)?)?;
                    println!("{}", saved.document.full_text());
                }
                SavedAction::Delete { id } => {
                    service.delete(parse_id(&id)?)?;
                }
            }
        }
    }

    Ok(())
}

fn setup_logging(opts: &GlobalOpts) -> anyhow::Result<()> {
    let Some(log_dir) = &opts.log_dir else {
        return Ok(());
    };
    let log_dir = if log_dir.is_absolute() {
        log_dir.clone()
    } else {
        std::env::current_dir()
            .context("Failed to resolve the current directory")?
            .join(log_dir)
    };
    let level = opts.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &log_dir.to_string_lossy()).map_err(|err| anyhow!("{err}"))?;
    info!("event=cli_start module=cli status=ok");
    Ok(())
}

fn open_connection(path: Option<&Path>) -> anyhow::Result<Connection> {
    let conn = match path {
        Some(path) => open_db(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?,
        None => open_db_in_memory().context("Failed to open in-memory database")?,
    };
    SqliteCalendarStore::new(&conn)
        .seed_sample_data_if_empty()
        .context("Failed to seed the calendar")?;
    Ok(conn)
}

fn require_db(opts: &GlobalOpts) -> anyhow::Result<()> {
    if opts.db.is_none() {
        bail!("saved masses need a database file; pass --db PATH");
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_id(value: &str) -> anyhow::Result<MassId> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid saved mass id `{value}`"))
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
