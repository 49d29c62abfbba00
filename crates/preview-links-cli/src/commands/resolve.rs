//! Implementation of the `preview-links resolve` command.

use clap::Args;
use miette::{IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use preview_links::{parse_path_template, resolve, PlaceholderSet};
use serde::Serialize;

use super::params::{parse_key_val, snapshot_from_params};

/// Arguments for the resolve command.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Path template (e.g., /blog/$category/$slug)
    #[arg(long, required = true)]
    pub template: String,

    /// Field values in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Locale recorded in the snapshot
    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for resolve results.
#[derive(Serialize)]
pub struct ResolveResult {
    pub path: String,
    pub unresolved: Vec<String>,
}

/// Run the resolve command.
pub fn run_resolve(args: ResolveArgs) -> Result<i32> {
    let template = parse_path_template(&args.template);
    let snapshot = snapshot_from_params(&args.locale, &args.params);
    let path = resolve(&template, &snapshot);

    let unresolved: Vec<String> = PlaceholderSet::from_template(&template)
        .iter()
        .filter(|name| {
            snapshot
                .get(name)
                .and_then(|value| value.path_text())
                .is_none()
        })
        .map(str::to_string)
        .collect();

    if args.json {
        let output = ResolveResult { path, unresolved };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{}", path);
        if !unresolved.is_empty() {
            let names: Vec<String> = unresolved.iter().map(|n| format!("${n}")).collect();
            eprintln!(
                "{}: no value for {}",
                "warning".yellow().bold(),
                names.join(", ")
            );
        }
    }

    Ok(exitcode::OK)
}
