//! MetaPort CLI - bulk metafield export/import tools.
//!
//! # Usage
//!
//! ```bash
//! # Export every product's metafields to a spreadsheet-ready CSV
//! mp-cli export --output products.csv
//!
//! # Submit an edited file as a bulk metafield import
//! mp-cli import products.csv
//!
//! # Check on a submitted import
//! mp-cli status 4836025565411
//! ```
//!
//! # Commands
//!
//! - `export` - Generate the metafields CSV (stdout or a file)
//! - `import` - Convert a CSV back into a bulk mutation and submit it
//! - `status` - Poll a submitted bulk operation

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mp-cli")]
#[command(author, version, about = "MetaPort metafield export/import tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export product metafields as CSV
    Export {
        /// Write the CSV here instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
    /// Submit an edited CSV as a bulk metafield import
    Import {
        /// Path to the CSV file
        file: std::path::PathBuf,
    },
    /// Show the status of a submitted bulk operation
    Status {
        /// Bare numeric bulk operation id (as printed by `import`)
        operation_id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metaport_admin=info,metaport_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Export { output } => commands::export(output.as_deref()).await?,
        Commands::Import { file } => commands::import(&file).await?,
        Commands::Status { operation_id } => commands::status(&operation_id).await?,
    }
    Ok(())
}
