//! Recordkeep CLI - create, read, update and delete local records

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use chrono::NaiveDate;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "recordkeep")]
#[command(version)]
#[command(about = "Keep text, number, date, image and signature records in a local SQLite file")]
#[command(long_about = r#"
Recordkeep stores small records in a local SQLite database (data.db by default).
Each record has free text, a number, a date, an optional image and an optional
hand-drawn signature.

Example usage:
  recordkeep create --text "hello" --number 5 --date 2024-01-01 --image photo.jpg
  recordkeep create --text "signed" --draw "10,10 60,40 110,10"
  recordkeep read
  recordkeep update --id 1 --text "bye"
  recordkeep export --id 1 --field signature --out signature.png
  recordkeep delete --id 1
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of human output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file pointing at the database
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Create a record
    Create {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Show one record, or every record when no id is given
    Read {
        /// Record id
        #[arg(short, long)]
        id: Option<i64>,
    },

    /// Replace a record. Unset text, number and date keep their current values;
    /// image and signature are cleared unless supplied again.
    Update {
        /// Record id
        #[arg(short, long)]
        id: i64,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a record
    Delete {
        /// Record id
        #[arg(short, long)]
        id: i64,
    },

    /// Write a stored image or signature out as a PNG file
    Export {
        /// Record id
        #[arg(short, long)]
        id: i64,

        /// Which picture to export
        #[arg(short, long, value_enum)]
        field: Field,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct FieldArgs {
    /// Free text
    #[arg(short, long)]
    pub text: Option<String>,

    /// Whole number
    #[arg(short, long, allow_negative_numbers = true)]
    pub number: Option<i64>,

    /// Date as YYYY-MM-DD (create defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Image to upload (png, jpg or jpeg)
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Signature picture to use as the drawing
    #[arg(long, conflicts_with = "draw")]
    pub signature: Option<PathBuf>,

    /// Draw a signature: points "x,y x,y ...", strokes separated by ';'
    #[arg(long)]
    pub draw: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Field {
    Image,
    Signature,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if output_mode.is_human() {
        return Ok(());
    }
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };

    let config = recordkeep::config::load_config(cli.config.as_deref())?;
    let database = recordkeep::config::resolve_database_path(cli.database.as_deref(), config.as_ref());
    tracing::debug!("Using database {}", database.display());

    let result = match cli.command {
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(recordkeep::config::default_config_path);
            commands::run_init(output_mode, &path, &database, force)
        }
        Commands::Create { fields } => commands::run_create(output_mode, &database, fields),
        Commands::Read { id } => commands::run_read(output_mode, &database, id),
        Commands::Update { id, fields } => commands::run_update(output_mode, &database, id, fields),
        Commands::Delete { id } => commands::run_delete(output_mode, &database, id),
        Commands::Export { id, field, out } => commands::run_export(output_mode, &database, id, field, &out),
    };

    if let Err(e) = &result {
        if output_mode.is_human() {
            recordkeep::ui::error(&e.to_string());
        } else {
            let envelope = serde_json::json!({ "ok": false, "error": e.to_string() });
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        std::process::exit(1);
    }

    Ok(())
}
