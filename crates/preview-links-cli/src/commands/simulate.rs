//! Implementation of the `preview-links simulate` command.
//!
//! Replays a script of field and locale changes against an in-memory record
//! and reports the links after each change.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::Args;
use miette::{miette, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use preview_links::{
    FieldValue, MemoryRecord, PreviewSession, PreviewState, PreviewUrls, RecordStatus,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::params::load_config;
use crate::output::table::{format_steps_table, format_urls_table, SimulationStep};
use crate::output::JsonDiagnostic;

/// Arguments for the simulate command.
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Preview configuration file (JSON)
    #[arg(long, required = true)]
    pub config: PathBuf,

    /// Change script (JSON)
    #[arg(long, required = true)]
    pub script: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// A record's starting state and the changes applied to it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Script {
    #[serde(default)]
    status: RecordStatus,
    /// Starting locale. Defaults to the first configured locale.
    locale: Option<String>,
    #[serde(default)]
    fields: BTreeMap<String, FieldValue>,
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Event {
    Field { name: String, value: FieldValue },
    Remove { name: String },
    Locale { locale: String },
}

impl Event {
    fn apply(&self, record: &MemoryRecord) {
        match self {
            Event::Field { name, value } => record.set_field(name, value.clone()),
            Event::Remove { name } => record.remove_field(name),
            Event::Locale { locale } => record.set_locale(locale),
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Event::Field { name, value } => write!(f, "{name} = {value}"),
            Event::Remove { name } => write!(f, "{name} removed"),
            Event::Locale { locale } => write!(f, "locale = {locale}"),
        }
    }
}

#[derive(Serialize)]
struct StepJson {
    event: String,
    updated: bool,
    urls: PreviewUrls,
}

#[derive(Serialize)]
struct SimulationJson {
    initial: PreviewUrls,
    steps: Vec<StepJson>,
    released: usize,
}

fn load_script(path: &Path) -> Result<Script> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read script file {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| JsonDiagnostic::from_serde_error(path, &content, &e).into())
}

/// Run the simulate command.
pub fn run_simulate(args: SimulateArgs) -> Result<i32> {
    let config = load_config(&args.config)?;
    let script = load_script(&args.script)?;

    let locale = script
        .locale
        .clone()
        .or_else(|| config.locales.first().cloned())
        .unwrap_or_default();
    let record = Rc::new(
        script
            .fields
            .iter()
            .fold(MemoryRecord::new(locale), |record, (name, value)| {
                record.with_field(name.as_str(), value.clone())
            }),
    );

    let state = PreviewSession::activate(&config, script.status, &record, &record)
        .map_err(|e| miette!("{}", e))?;
    let mut session = match state {
        PreviewState::Unsaved(notice) => {
            println!("{}", notice.yellow());
            return Ok(exitcode::OK);
        }
        PreviewState::Active(session) => session,
    };

    let updates = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&updates);
    session.on_update(move |_| counter.set(counter.get() + 1));

    let initial = session.urls();
    let mut steps = Vec::with_capacity(script.events.len());
    for event in &script.events {
        let before = updates.get();
        event.apply(&record);
        debug!(%event, "applied scripted change");
        steps.push(SimulationStep {
            event: event.to_string(),
            updated: updates.get() > before,
            urls: session.urls(),
        });
    }

    let live = session.live_subscriptions();
    session.teardown();
    let leaked = record.field_listener_count() + record.locale_listener_count();
    if leaked > 0 {
        return Err(miette!("{} listener(s) still registered after teardown", leaked));
    }

    if args.json {
        let output = SimulationJson {
            initial,
            steps: steps
                .into_iter()
                .map(|s| StepJson {
                    event: s.event,
                    updated: s.updated,
                    urls: s.urls,
                })
                .collect(),
            released: live,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{}", format_urls_table(&initial));
        if !steps.is_empty() {
            println!("{}", format_steps_table(&steps));
        }
        println!("{}", format!("released {} subscription(s)", live).dimmed());
    }

    Ok(exitcode::OK)
}
