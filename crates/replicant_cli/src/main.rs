//! Replicant CLI
//!
//! Command-line tools for MySQL replication logs.
//!
//! # Commands
//!
//! - `dump` - Decode a binary log (or `mysqlbinlog` text) and print its events
//! - `gtid normalize` - Print a GTID set in canonical form
//! - `gtid union` - Print the union of GTID sets
//! - `gtid compare` - Print how two GTID sets relate

mod commands;

use clap::{Parser, Subcommand};
use commands::dump::{DumpOptions, OutputFormat};
use tracing_subscriber::EnvFilter;

/// Replicant replication log tools.
#[derive(Parser)]
#[command(name = "replicant")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a log and print its events
    Dump {
        /// Log locator (`file:<path>` or a bare path), or `-` for stdin
        locator: String,

        /// Read `mysqlbinlog` text output instead of a binary log
        #[arg(short, long)]
        text: bool,

        /// Maximum number of events to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Fail on records whose end_log_pos disagrees with their position
        #[arg(long)]
        verify_positions: bool,
    },

    /// GTID set operations
    Gtid {
        #[command(subcommand)]
        command: GtidCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum GtidCommands {
    /// Print a GTID set in canonical form
    Normalize {
        /// The set, e.g. `3e11fa47-71ca-11e1-9e33-c80aa9429562:1-5:7`
        set: String,
    },

    /// Print the union of two or more GTID sets
    Union {
        /// The sets to merge
        #[arg(required = true, num_args = 2..)]
        sets: Vec<String>,
    },

    /// Print `equal`, `subset`, `superset` or `incomparable`
    Compare {
        /// Left set
        a: String,
        /// Right set
        b: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the default level
    let default = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Dump {
            locator,
            text,
            limit,
            format,
            verify_positions,
        } => {
            let options = DumpOptions {
                text,
                limit,
                format,
                verify_positions,
            };
            commands::dump::run(&locator, &options)?;
        }
        Commands::Gtid { command } => {
            let output = match command {
                GtidCommands::Normalize { set } => commands::gtid::normalize(&set)?,
                GtidCommands::Union { sets } => commands::gtid::union(&sets)?,
                GtidCommands::Compare { a, b } => commands::gtid::compare(&a, &b)?.to_string(),
            };
            println!("{output}");
        }
        Commands::Version => {
            println!("Replicant CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Replicant Binlog v{}", replicant_binlog::VERSION);
        }
    }

    Ok(())
}
