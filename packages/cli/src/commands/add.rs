use super::{load_document, resolve_path};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use missive_editor::{serialization, DataOverrides, Registry};
use serde_json::Value;
use std::fs;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Template file to modify
    pub file: String,

    /// Block kind (e.g. Text, Heading, Columns)
    pub kind: String,

    /// Parent container id (defaults to the root)
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Column index; `--parent` must name a Columns block
    #[arg(short, long, requires = "parent")]
    pub column: Option<usize>,

    /// JSON object of props merged over the kind's defaults
    #[arg(long)]
    pub props: Option<String>,
}

pub fn add(args: AddArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = Registry::with_builtin_blocks();
    let path = resolve_path(cwd, &args.file);
    let mut document = load_document(&path, &registry, &config)?;

    let overrides = args.props.as_deref().map(parse_props).transpose()?;

    let id = match (args.parent.as_deref(), args.column) {
        (Some(parent), Some(column)) => {
            document.add_block_to_column(&registry, &args.kind, parent, column)?
        }
        (parent, _) => document.add_block(&registry, &args.kind, overrides.as_ref(), parent)?,
    };

    if args.column.is_some() {
        if let Some(overrides) = &overrides {
            if let Some(record) = document.get_mut(&id) {
                record.data.apply_overrides(overrides);
            }
        }
    }

    fs::write(&path, serialization::to_json(&document)?)?;

    println!(
        "  {} Added {} {} to {}",
        "✓".green(),
        args.kind.bright_white(),
        id,
        args.file
    );
    Ok(())
}

fn parse_props(source: &str) -> Result<DataOverrides> {
    match serde_json::from_str::<Value>(source)? {
        Value::Object(map) => Ok(DataOverrides::new().with_props(map)),
        _ => Err(anyhow!("--props must be a JSON object")),
    }
}
