//! Implementation of the `preview-links urls` command.

use std::path::PathBuf;
use std::rc::Rc;

use clap::Args;
use miette::{miette, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use preview_links::{MemoryRecord, PreviewSession, PreviewState, RecordStatus};
use serde_json::json;

use super::params::{field_value, load_config, parse_key_val};
use crate::output::table::format_urls_table;

/// Arguments for the urls command.
#[derive(Debug, Args)]
pub struct UrlsArgs {
    /// Preview configuration file (JSON)
    #[arg(long, required = true)]
    pub config: PathBuf,

    /// Active locale. Defaults to the first configured locale
    #[arg(long)]
    pub locale: Option<String>,

    /// Record status (new, draft, updated, published)
    #[arg(long, default_value = "draft")]
    pub status: RecordStatus,

    /// Field values in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the urls command.
pub fn run_urls(args: UrlsArgs) -> Result<i32> {
    let config = load_config(&args.config)?;
    let locale = args
        .locale
        .clone()
        .or_else(|| config.locales.first().cloned())
        .unwrap_or_default();

    let record = Rc::new(args.params.iter().fold(
        MemoryRecord::new(locale),
        |record, (name, raw)| record.with_field(name.as_str(), field_value(raw)),
    ));

    let state = PreviewSession::activate(&config, args.status, &record, &record)
        .map_err(|e| miette!("{}", e))?;

    let mut session = match state {
        PreviewState::Unsaved(notice) => {
            if args.json {
                let output = json!({ "unsaved": notice.message() });
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{}", notice.yellow());
            }
            return Ok(exitcode::OK);
        }
        PreviewState::Active(session) => session,
    };

    let urls = session.urls();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&urls).into_diagnostic()?);
    } else {
        println!("{}", format_urls_table(&urls));
    }

    session.teardown();
    Ok(exitcode::OK)
}
