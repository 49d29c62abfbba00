//! Implementation of the `preview-links placeholders` command.

use clap::Args;
use miette::{IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use preview_links::{extract_placeholders, lint_placeholders, parse_path_template, PlaceholderSet};
use serde::Serialize;

/// Arguments for the placeholders command.
#[derive(Debug, Args)]
pub struct PlaceholdersArgs {
    /// Path template (e.g., /blog/$category/$slug)
    #[arg(long, required = true)]
    pub template: String,

    /// Known field names to check placeholders against (repeatable)
    #[arg(long = "field")]
    pub fields: Vec<String>,

    /// List every occurrence, including repeated names
    #[arg(long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct WarningJson {
    name: String,
    suggestions: Vec<String>,
}

#[derive(Serialize)]
struct PlaceholdersJson {
    placeholders: Vec<String>,
    warnings: Vec<WarningJson>,
}

/// Run the placeholders command.
pub fn run_placeholders(args: PlaceholdersArgs) -> Result<i32> {
    let template = parse_path_template(&args.template);
    let set = PlaceholderSet::from_template(&template);

    let names: Vec<String> = if args.all {
        extract_placeholders(&args.template)
    } else {
        set.iter().map(str::to_string).collect()
    };

    // Without known fields there is nothing to check against.
    let warnings = if args.fields.is_empty() {
        Vec::new()
    } else {
        lint_placeholders(&set, args.fields.iter().map(String::as_str))
    };

    if args.json {
        let output = PlaceholdersJson {
            placeholders: names,
            warnings: warnings
                .iter()
                .map(|w| WarningJson {
                    name: w.name.clone(),
                    suggestions: w.suggestions.clone(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        if names.is_empty() {
            println!("{}", "no placeholders".dimmed());
        }
        for name in &names {
            println!("${}", name);
        }
        for warning in &warnings {
            eprintln!("{}: {}", "warning".yellow().bold(), warning);
        }
    }

    if warnings.is_empty() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
