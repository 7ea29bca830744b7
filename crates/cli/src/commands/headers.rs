//! `headers`: preview the headers the middleware would set for a body.

use crate::input::read_input;
use crate::OutputFormat;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_resource_config::{find_config, load_config, ResourceHeadersConfig};
use graphql_resource_extract::extract;
use graphql_resource_middleware::{document_text, ResourceHeaders};
use std::path::Path;

pub fn run(config_path: Option<&Path>, file: Option<&Path>, format: OutputFormat) -> Result<()> {
    let current_dir = std::env::current_dir().context("Failed to read current directory")?;
    let config = resolve_config(config_path, &current_dir)?;
    let headers =
        ResourceHeaders::from_config(&config).context("Invalid header configuration")?;

    let body = read_input(file)?;
    let rows = preview(&headers, &body);

    match format {
        OutputFormat::Human => {
            if body.len() > headers.max_body_bytes() {
                eprintln!(
                    "{} body is {} bytes, over the {} byte limit; it would be forwarded untouched",
                    "note:".yellow().bold(),
                    body.len(),
                    headers.max_body_bytes()
                );
            }
            if rows.is_empty() {
                println!("{}", "No headers would be set".dimmed());
            }
            for (name, value) in rows {
                println!("{}: {value}", name.cyan());
            }
        }
        OutputFormat::Json => {
            let object: serde_json::Map<String, serde_json::Value> = rows
                .into_iter()
                .map(|(name, value)| (name, serde_json::Value::String(value)))
                .collect();
            let json = serde_json::to_string_pretty(&object)
                .context("Failed to serialize headers")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Use the explicit config path if one was given, otherwise search upwards
/// from `start_dir`. No config file at all means defaults.
fn resolve_config(explicit: Option<&Path>, start_dir: &Path) -> Result<ResourceHeadersConfig> {
    let path = if let Some(path) = explicit {
        path.to_path_buf()
    } else if let Some(path) = find_config(start_dir).context("Failed to search for config")? {
        path
    } else {
        tracing::debug!("No config file found, using defaults");
        return Ok(ResourceHeadersConfig::default());
    };

    load_config(&path).with_context(|| format!("Failed to load config {}", path.display()))
}

/// The `(name, value)` pairs the middleware would set for `body`.
///
/// Bodies over the limit produce nothing, as the middleware would not read
/// them.
fn preview(headers: &ResourceHeaders, body: &[u8]) -> Vec<(String, String)> {
    if body.len() > headers.max_body_bytes() {
        return Vec::new();
    }

    let extraction = extract(&document_text(body));
    headers
        .values(&extraction)
        .into_iter()
        .map(|(name, value)| {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            (name.as_str().to_owned(), value)
        })
        .collect()
}
