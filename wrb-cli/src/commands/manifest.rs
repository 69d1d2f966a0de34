//! `wrb manifest` — inspect the persisted selection.

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use tabled::{settings::Style, Table, Tabled};

use wrb_core::SelectedObject;
use wrb_reaper::open_in_default_app;

use crate::context::AppContext;

#[derive(Subcommand, Debug)]
pub enum ManifestCommand {
    /// List the objects of the last selection.
    Show {
        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Open the selection file in the default editor.
    Edit,
}

#[derive(Tabled)]
struct ManifestRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "path")]
    path: String,
    #[tabled(rename = "source")]
    source: String,
}

impl ManifestRow {
    fn new(index: usize, obj: &SelectedObject) -> Self {
        Self {
            index,
            name: obj.name.clone(),
            path: obj.path.to_string(),
            source: obj.source_path.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub fn run(command: ManifestCommand, ctx: &AppContext) -> Result<ExitCode> {
    let store = ctx.store();
    match command {
        ManifestCommand::Show { json } => {
            let objects = store.read().context("failed to read selection history")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&objects)?);
            } else if !store.exists() {
                println!("No selection history. Run `wrb open` first.");
            } else if objects.is_empty() {
                println!("Selection history is empty.");
            } else {
                let rows: Vec<_> = objects
                    .iter()
                    .enumerate()
                    .map(|(i, obj)| ManifestRow::new(i + 1, obj))
                    .collect();
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{table}");
                println!("{} object(s) in {}", objects.len(), store.jsonl_path().display());
            }
        }
        ManifestCommand::Edit => {
            if !store.exists() {
                bail!("no selection history at {}", store.jsonl_path().display());
            }
            open_in_default_app(store.jsonl_path())
                .with_context(|| format!("failed to open {}", store.jsonl_path().display()))?;
            println!("Opening {}", store.jsonl_path().display());
        }
    }
    Ok(ExitCode::SUCCESS)
}
