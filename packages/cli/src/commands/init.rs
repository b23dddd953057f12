use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use missive_editor::{DataOverrides, EditSession, Registry};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Template directory
    #[arg(short, long, default_value = "templates")]
    pub src_dir: String,

    /// Output directory for compiled HTML
    #[arg(short, long, default_value = "dist")]
    pub out_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Missive project...".bright_blue().bold());

    let config = Config {
        src_dir: args.src_dir.clone(),
        out_dir: args.out_dir.clone(),
        ..Config::default()
    };

    let src_dir = config.get_src_dir(cwd);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("welcome.json");
    if !example_file.exists() {
        fs::write(&example_file, starter_template(&config)?)?;
        println!("  {} Created welcome.json", "✓".green());
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/welcome.json", args.src_dir);
    println!("  2. Run: missive compile");
    println!("  3. Check output in {}/", args.out_dir);

    Ok(())
}

fn props(value: Value) -> DataOverrides {
    let map = match value {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    DataOverrides::new().with_props(map)
}

/// A heading, a paragraph and a call to action.
fn starter_template(config: &Config) -> Result<String> {
    let registry = Arc::new(Registry::with_builtin_blocks());
    let mut session = EditSession::new(registry, config.editor_options())?;

    session.add_block("Heading", Some(props(json!({ "text": "Welcome aboard" }))), None)?;
    session.add_block(
        "Text",
        Some(props(json!({ "text": "Thanks for signing up. Here is what happens next." }))),
        None,
    )?;
    session.add_block("Button", Some(props(json!({ "text": "Get started" }))), None)?;

    Ok(session.export_json()?)
}
