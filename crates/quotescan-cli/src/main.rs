mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "quotescan",
    version,
    about = "Extract and search Daily Quote Review PDF reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by commands that read a PDF.
#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Table detection backend: bbox (word geometry) or layout (text columns)
    #[arg(long, default_value = "bbox")]
    backend: String,

    /// Keep only rows whose Quote # is a 6+ digit number
    #[arg(long)]
    strict: bool,

    /// Keep title, print-stamp and total lines found inside the table
    #[arg(long)]
    keep_furniture: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the quote table from a PDF
    Extract {
        /// Path to the Daily Quote Review PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write extracted records to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,
    },
    /// Filter records from a PDF or a previously extracted JSON file
    Search {
        /// Path to PDF or extracted JSON file
        input_file: PathBuf,

        /// Column to search (e.g. "State", "Customer Name")
        #[arg(short, long)]
        column: String,

        /// Case-insensitive substring to look for
        #[arg(short, long, default_value = "")]
        value: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        #[command(flatten)]
        extract: ExtractArgs,
    },
    /// List the searchable column names
    Columns,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            output,
            out,
            extract,
        } => commands::extract::run(input_file, &output, out, &extract),
        Commands::Search {
            input_file,
            column,
            value,
            output,
            extract,
        } => commands::search::run(input_file, &column, &value, &output, &extract),
        Commands::Columns => commands::columns::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
