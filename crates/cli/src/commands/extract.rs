//! `extract`: print the root fields of a document's operations.

use crate::input::read_input;
use crate::OutputFormat;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_resource_extract::{extract, Extraction};
use graphql_resource_middleware::document_text;
use std::borrow::Cow;
use std::path::Path;

pub fn run(file: Option<&Path>, envelope: bool, format: OutputFormat) -> Result<()> {
    let input = read_input(file)?;
    let document = if envelope {
        document_text(&input)
    } else {
        String::from_utf8_lossy(&input)
    };

    let extraction = extract(&document);
    tracing::debug!(
        queries = extraction.queries.len(),
        mutations = extraction.mutations.len(),
        "Extraction complete"
    );

    match format {
        OutputFormat::Human => {
            for (label, names) in summary(&extraction) {
                let names = if names.is_empty() {
                    "(none)".dimmed().to_string()
                } else {
                    names.green().to_string()
                };
                println!("{} {names}", format!("{label}:").bold());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&extraction)
                .context("Failed to serialize extraction")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// One `(label, names)` row per operation kind, names joined for display.
fn summary(extraction: &Extraction) -> [(&'static str, Cow<'static, str>); 2] {
    let join = |names: &[String]| -> Cow<'static, str> {
        if names.is_empty() {
            Cow::Borrowed("")
        } else {
            Cow::Owned(names.join(", "))
        }
    };
    [
        ("queries", join(&extraction.queries)),
        ("mutations", join(&extraction.mutations)),
    ]
}
