// Prints the catalog of error kinds as JSON.
// Run with `openapi` as the first argument to print the OpenAPI document instead:
//   cargo run --bin error-catalog -- openapi

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

use toolbox_errors::openapi::ApiDoc;
use toolbox_errors::ErrorKind;

#[derive(Debug, Serialize)]
struct CatalogEntry {
    code: ErrorKind,
    status: u16,
    message: &'static str,
}

fn catalog() -> Vec<CatalogEntry> {
    ErrorKind::ALL
        .iter()
        .map(|kind| CatalogEntry {
            code: *kind,
            status: kind.status_code(),
            message: kind.default_message(),
        })
        .collect()
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,toolbox_errors=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = match std::env::args().nth(1).as_deref() {
        Some("openapi") => {
            info!("Exporting OpenAPI document");
            ApiDoc::openapi()
                .to_pretty_json()
                .context("Failed to serialize OpenAPI document")?
        }
        _ => {
            info!(kinds = ErrorKind::ALL.len(), "Exporting error catalog");
            serde_json::to_string_pretty(&catalog()).context("Failed to serialize error catalog")?
        }
    };

    println!("{}", output);
    Ok(())
}
