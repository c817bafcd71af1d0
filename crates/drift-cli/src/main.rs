//! Baseline inspection CLI
//!
//! Loads a baseline document, replays table interactions against the
//! edit-baseline store and prints the resulting fact table or an export.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use drift_app::SortField;
use std::path::PathBuf;
use std::process::ExitCode;

mod handlers;

#[derive(Parser)]
#[command(name = "drift")]
#[command(about = "Drift - Baseline fact table inspector", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".drift/config.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a baseline's fact table
    Show {
        /// Baseline JSON document
        baseline: PathBuf,

        /// Expand a category (repeatable)
        #[arg(short, long = "expand", value_name = "CATEGORY")]
        expand: Vec<String>,

        /// Check a fact by id (repeatable)
        #[arg(short, long = "select", value_name = "ID")]
        select: Vec<u64>,

        /// Check every fact
        #[arg(long, conflicts_with = "select")]
        select_all: bool,

        /// Activate a column header (repeat to cycle direction)
        #[arg(long = "sort", value_enum)]
        sort: Vec<SortColumn>,

        /// Open the baseline without write permission
        #[arg(long)]
        read_only: bool,

        /// Only show facts whose name contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Page of rows to print
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Export a baseline's facts
    Export {
        /// Baseline JSON document
        baseline: PathBuf,

        /// Output format (defaults to the configured format)
        #[arg(short, long)]
        format: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Column header names accepted by `--sort`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortColumn {
    Name,
    Value,
}

impl From<SortColumn> for SortField {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Name => SortField::Name,
            SortColumn::Value => SortField::Value,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", handlers::describe_error(&error));
            // usage-style exit code when the user can fix the input
            match handlers::error_category(&error) {
                Some(category) if category.is_user_correctable() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = handlers::load_config(&cli.config)?;

    match cli.command {
        Commands::Show {
            baseline,
            expand,
            select,
            select_all,
            sort,
            read_only,
            filter,
            page,
        } => {
            let options = handlers::show::ShowOptions {
                expand,
                select,
                select_all,
                sort: sort.into_iter().map(SortField::from).collect(),
                read_only,
                filter,
                page,
            };
            let output = handlers::show::run(&config, &baseline, &options)?;
            print!("{output}");
        }
        Commands::Export {
            baseline,
            format,
            output,
        } => {
            handlers::export::run(&config, &baseline, format.as_deref(), output.as_deref())?;
        }
    }

    Ok(())
}
