//! Care diary CLI - shift log transcription tool

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use care_diary::prelude::*;
use care_diary::{export_page, CsvReadOptions, CsvWriteOptions, Resident, RosterSlot};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(name = "diary")]
#[command(
    author,
    version,
    about = "Transcribe shift logs into per-resident care records"
)]
struct Cli {
    /// Workspace directory holding record books, cursors and journals
    #[arg(short = 'C', long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the workspace and its template book
    Init,

    /// Show the entries a shift log would produce
    Extract {
        /// Shift log CSV
        log: PathBuf,

        /// Print entries as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Transcribe a shift log into the record books
    Transfer {
        /// Shift log CSV
        log: PathBuf,

        /// Date the log covers (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Day shift author (default: saved preference)
        #[arg(long)]
        author_day: Option<String>,

        /// Night shift author (default: saved preference)
        #[arg(long)]
        author_night: Option<String>,

        /// Create pages without a template instead of failing
        #[arg(long)]
        allow_bare: bool,
    },

    /// List write cursors
    Cursors,

    /// Export one record page as CSV
    Export {
        /// Record book: 2f, 3f or departed
        collection: Collection,

        /// Page name, e.g. 宮本(2)
        page: String,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show saved preferences
    Prefs,

    /// Manage the resident roster
    #[command(subcommand)]
    Resident(ResidentCommand),
}

#[derive(Subcommand)]
enum ResidentCommand {
    /// Register a resident or update their room
    Add {
        /// Resident name
        name: String,

        /// Room number, 退所 or 保留
        room: String,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        birthday: Option<NaiveDate>,

        /// Gender
        #[arg(long)]
        gender: Option<String>,
    },

    /// List residents in room order
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with_writer(io::stderr)
        .init();

    let workspace = DiaryWorkspace::open(&cli.dir)
        .with_context(|| format!("Failed to open workspace '{}'", cli.dir.display()))?;

    match cli.command {
        Commands::Init => init(&workspace),
        Commands::Extract { log, json } => extract(&log, json),
        Commands::Transfer {
            log,
            date,
            author_day,
            author_night,
            allow_bare,
        } => run_transfer(&workspace, log, date, author_day, author_night, allow_bare),
        Commands::Cursors => list_cursors(&workspace),
        Commands::Export {
            collection,
            page,
            output,
        } => export(&workspace, collection, &page, output.as_deref()),
        Commands::Prefs => show_prefs(&workspace),
        Commands::Resident(ResidentCommand::Add {
            name,
            room,
            birthday,
            gender,
        }) => add_resident(
            &workspace,
            Resident {
                name,
                room,
                birthday,
                gender,
            },
        ),
        Commands::Resident(ResidentCommand::List) => list_residents(&workspace),
    }
}

fn init(workspace: &DiaryWorkspace) -> Result<()> {
    if workspace.init_template()? {
        info!(path = %workspace.template_path().display(), "template book written");
    } else {
        info!("template book already present");
    }
    Ok(())
}

fn extract(log: &Path, json: bool) -> Result<()> {
    let sheet = CsvReader::read_file(log, &CsvReadOptions::default())
        .with_context(|| format!("Failed to read '{}'", log.display()))?;
    let entries = LogExtractor::default().extract(&sheet);

    let mut out = io::stdout().lock();
    for entry in &entries {
        if json {
            writeln!(out, "{}", serde_json::to_string(entry)?)?;
        } else {
            writeln!(out, "[{}] {}", entry.shift, entry.name)?;
            for line in entry.lines() {
                writeln!(out, "    {line}")?;
            }
        }
    }
    eprintln!("{} entries", entries.len());
    Ok(())
}

fn run_transfer(
    workspace: &DiaryWorkspace,
    log: PathBuf,
    date: Option<NaiveDate>,
    author_day: Option<String>,
    author_night: Option<String>,
    allow_bare: bool,
) -> Result<()> {
    let mut prefs = workspace.prefs();
    let request = TransferRequest {
        log_path: log,
        date: date.unwrap_or_else(|| Local::now().date_naive()),
        author_day: author_day.unwrap_or_else(|| prefs.author_day.clone()),
        author_night: author_night.unwrap_or_else(|| prefs.author_night.clone()),
    };
    if request.author_day.is_empty() || request.author_night.is_empty() {
        bail!("Both --author-day and --author-night are required (no saved preference)");
    }

    let mut options = TransferOptions::default();
    options.engine.require_template = !allow_bare;

    let report = transfer(workspace, &request, &options)
        .with_context(|| format!("Transfer of '{}' failed", request.log_path.display()))?;

    if report.is_empty() {
        println!("Nothing to transfer");
    } else {
        for placement in &report.transcription.placements {
            println!(
                "{}\t{}\t{}\trows {}-{}",
                placement.resident,
                placement.collection,
                placement.page,
                placement.first_row,
                placement.last_row
            );
        }
        for page in &report.transcription.rotations {
            println!("new page: {page}");
        }
        for (page, row) in &report.transcription.year_markers {
            println!("year marker: {page} row {row}");
        }
        for page in &report.transcription.bare_pages {
            eprintln!("Warning: page '{page}' created without template");
        }
        println!(
            "{} entries extracted, {} journaled",
            report.extracted, report.journaled
        );
    }

    prefs.author_day = request.author_day;
    prefs.author_night = request.author_night;
    prefs.set_last_date(request.date);
    prefs.save(workspace.prefs_path())?;
    Ok(())
}

fn list_cursors(workspace: &DiaryWorkspace) -> Result<()> {
    let store = workspace.cursors()?;
    for cursor in store.cursors() {
        println!(
            "{}\t{}\t{}\t{}",
            cursor.resident, cursor.collection, cursor.page, cursor.next_row
        );
    }
    Ok(())
}

fn export(
    workspace: &DiaryWorkspace,
    collection: Collection,
    page: &str,
    output: Option<&Path>,
) -> Result<()> {
    let options = CsvWriteOptions::default();
    match output {
        Some(path) => {
            export_page(workspace, collection, page, path, &options)?;
            eprintln!("Wrote '{page}' to '{}'", path.display());
        }
        None => {
            let book = workspace.load_book(collection)?;
            let Some(sheet) = book.sheet(page) else {
                bail!("Page '{page}' not found in {collection}");
            };
            let view = care_diary::page_view(sheet, workspace.layout())?;
            CsvWriter::write(&view, io::stdout().lock(), &options)
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

fn show_prefs(workspace: &DiaryWorkspace) -> Result<()> {
    let prefs = workspace.prefs();
    println!("author_day:   {}", prefs.author_day);
    println!("author_night: {}", prefs.author_night);
    println!("last_date:    {}", prefs.last_date);
    Ok(())
}

fn add_resident(workspace: &DiaryWorkspace, resident: Resident) -> Result<()> {
    let mut roster = workspace.roster()?;
    let name = resident.name.clone();
    if let Some(displaced) = roster.upsert(resident) {
        println!("{displaced} put on hold");
    }
    workspace.save_roster(&roster)?;
    info!(%name, "roster updated");
    Ok(())
}

fn list_residents(workspace: &DiaryWorkspace) -> Result<()> {
    let roster = workspace.roster()?;
    for slot in roster.ordered() {
        match slot {
            RosterSlot::Room(room, Some(resident)) => println!("{room}\t{}", resident.name),
            RosterSlot::Room(room, None) => println!("{room}\t-"),
            RosterSlot::OnHold(resident) => println!("保留\t{}", resident.name),
        }
    }
    Ok(())
}
