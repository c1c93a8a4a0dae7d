//! Scuderia CLI - Inventory seeding and import tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed a starter inventory into the data directory
//! sc-cli seed
//!
//! # Overwrite an existing inventory
//! sc-cli seed --force
//!
//! # Import cars from a CSV file
//! sc-cli import inventory.csv
//!
//! # Write the CSV import template
//! sc-cli template --out inventory_template.csv
//! ```
//!
//! The data directory comes from `SCUDERIA_DATA_DIR` (default: `data`),
//! the same variable the showroom and admin binaries read.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sc-cli")]
#[command(author, version, about = "Scuderia Motors CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the data directory with a starter inventory
    Seed {
        /// Replace an existing inventory instead of refusing
        #[arg(long)]
        force: bool,
    },
    /// Import cars from a CSV file
    Import {
        /// Path to the CSV file
        file: String,
    },
    /// Write the CSV import template
    Template {
        /// Output path (defaults to stdout)
        #[arg(short, long)]
        out: Option<String>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { force } => commands::seed::run(force)?,
        Commands::Import { file } => commands::import::run(&file)?,
        Commands::Template { out } => commands::import::template(out.as_deref())?,
    }
    Ok(())
}
