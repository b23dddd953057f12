use super::{load_document, resolve_path};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use missive_compiler_html::{compile_to_html, CompileOptions};
use missive_editor::Registry;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Template file or directory (defaults to the configured source directory)
    pub path: Option<String>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Emit HTML without indentation
    #[arg(long)]
    pub compact: bool,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let src = match &args.path {
        Some(path) => resolve_path(cwd, path),
        None => config.get_src_dir(cwd),
    };

    if !src.exists() {
        return Err(anyhow!("Source path does not exist: {:?}", src));
    }

    // A single file is written relative to its own directory
    let (src_dir, files) = if src.is_file() {
        let dir = src.parent().map(Path::to_path_buf).unwrap_or_default();
        (dir, vec![src.clone()])
    } else {
        (src.clone(), find_template_files(&src))
    };

    if !args.stdout {
        println!("{}", "🔨 Compiling templates...".bright_blue().bold());
    }

    if files.is_empty() {
        println!("{}", "⚠️  No .json templates found".yellow());
        return Ok(());
    }

    let registry = Registry::with_builtin_blocks();
    let out_dir = match &args.out_dir {
        Some(out) => resolve_path(cwd, out),
        None => config.get_out_dir(cwd),
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative_path = file.strip_prefix(&src_dir).unwrap_or(file);
        match compile_file(file, relative_path, &args, &out_dir, &registry, &config) {
            Ok(output_path) => {
                success_count += 1;
                if !args.stdout {
                    println!(
                        "  {} {} → {}",
                        "✓".green(),
                        relative_path.display(),
                        output_path
                    );
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    format!("{:#}", e).red()
                );
            }
        }
    }

    if args.stdout {
        return if error_count == 0 {
            Ok(())
        } else {
            Err(anyhow!("{} templates failed to compile", error_count))
        };
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Compiled {} templates successfully",
            "✅".green(),
            success_count
        );
        Ok(())
    } else {
        println!(
            "{} Compiled {} templates, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
        Err(anyhow!("{} templates failed to compile", error_count))
    }
}

fn find_template_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}

fn compile_file(
    file_path: &Path,
    relative_path: &Path,
    args: &CompileArgs,
    out_dir: &Path,
    registry: &Registry,
    config: &Config,
) -> Result<String> {
    let document = load_document(file_path, registry, config)?;

    let options = CompileOptions {
        pretty: !args.compact,
        ..CompileOptions::default().with_title(config.title.as_str())
    };
    let output = compile_to_html(&document, registry, options)?;

    if args.stdout {
        println!("{}", output);
        return Ok("stdout".to_string());
    }

    let output_file = out_dir.join(relative_path).with_extension("html");
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, output)?;

    Ok(output_file.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"{
        "root": {
            "type": "Container",
            "data": { "style": {}, "props": {}, "childrenIds": ["block-1"] }
        },
        "block-1": {
            "type": "Text",
            "data": { "style": {}, "props": { "text": "Hello from the CLI" } }
        }
    }"#;

    fn args(path: Option<&str>) -> CompileArgs {
        CompileArgs {
            path: path.map(String::from),
            stdout: false,
            out_dir: None,
            compact: false,
        }
    }

    #[test]
    fn test_compile_directory_mirrors_layout() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::create_dir_all(dir.path().join("templates/onboarding")).unwrap();
        fs::write(dir.path().join("templates/onboarding/hello.json"), TEMPLATE).unwrap();

        compile(args(None), cwd).unwrap();

        let html = fs::read_to_string(dir.path().join("dist/onboarding/hello.html")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Hello from the CLI"));
        assert!(html.contains("<title>Email Template</title>"));
    }

    #[test]
    fn test_compile_single_file_with_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join("hello.json"), TEMPLATE).unwrap();

        let mut args = args(Some("hello.json"));
        args.out_dir = Some("build".into());
        compile(args, cwd).unwrap();

        assert!(dir.path().join("build/hello.html").exists());
    }

    #[test]
    fn test_compile_reports_broken_templates() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::create_dir_all(dir.path().join("templates")).unwrap();
        fs::write(dir.path().join("templates/good.json"), TEMPLATE).unwrap();
        fs::write(dir.path().join("templates/bad.json"), "{ not json").unwrap();

        assert!(compile(args(None), cwd).is_err());
        assert!(dir.path().join("dist/good.html").exists());
        assert!(!dir.path().join("dist/bad.html").exists());
    }

    #[test]
    fn test_missing_source_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = compile(args(None), dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
