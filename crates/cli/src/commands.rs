//! Command implementations.

#![allow(clippy::print_stdout)] // command output belongs on stdout

use std::error::Error;
use std::path::Path;

use metaport_admin::config::ShopifyAdminConfig;
use metaport_admin::porter;
use metaport_admin::shopify::AdminClient;

fn client() -> Result<AdminClient, Box<dyn Error>> {
    let config = ShopifyAdminConfig::from_env()?;
    Ok(AdminClient::new(&config))
}

/// Export every product's metafields, to a file or stdout.
pub async fn export(output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let client = client()?;
    let export = porter::export_csv(&client).await?;

    match output {
        Some(path) => {
            std::fs::write(path, &export.csv)?;
            println!(
                "Exported {} products ({} columns) to {}",
                export.product_count,
                export.column_count,
                path.display()
            );
        }
        None => print!("{}", export.csv),
    }

    Ok(())
}

/// Convert an edited CSV into a bulk mutation payload and submit it.
pub async fn import(file: &Path) -> Result<(), Box<dyn Error>> {
    let csv_text = std::fs::read_to_string(file)?;
    let prepared = porter::prepare_import(&csv_text)?;

    if prepared.skipped_columns > 0 {
        tracing::warn!(
            "{} malformed metafield column(s) ignored",
            prepared.skipped_columns
        );
    }
    if prepared.dropped_rows > 0 {
        tracing::info!(
            "{} row(s) carried no metafield changes and were dropped",
            prepared.dropped_rows
        );
    }
    if prepared.jsonl.is_empty() {
        return Err("no metafields found in the import file".into());
    }

    let client = client()?;
    let job = porter::submit_import(&client, &prepared).await?;

    println!(
        "Import submitted: operation {} ({} products, status {})",
        job.operation_id, job.count, job.status
    );
    println!("Track it with: mp-cli status {}", job.operation_id);

    Ok(())
}

/// Show the current state of a submitted bulk operation.
pub async fn status(operation_id: &str) -> Result<(), Box<dyn Error>> {
    let client = client()?;
    let operation = porter::import_status(&client, operation_id).await?;

    println!("Operation {operation_id}: {}", operation.status);
    if let Some(count) = operation.object_count {
        println!("Objects processed: {count}");
    }
    if let Some(code) = operation.error_code {
        println!("Error code: {code}");
    }
    if !operation.status.is_terminal() {
        println!("Still in progress; check again shortly.");
    }

    Ok(())
}
