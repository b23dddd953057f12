mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{add, compile, init, inspect, AddArgs, CompileArgs, InitArgs, InspectArgs};

/// Missive CLI - build email templates from block documents
#[derive(Parser, Debug)]
#[command(name = "missive")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Missive project
    Init(InitArgs),

    /// Compile template documents to static HTML
    Compile(CompileArgs),

    /// Print the block tree of a template
    Inspect(InspectArgs),

    /// Append a block to a template
    Add(AddArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Compile(args) => compile(args, &cwd),
                Command::Inspect(args) => inspect(args, &cwd),
                Command::Add(args) => add(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
