use super::{load_document, resolve_path};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use missive_editor::{Document, Registry};
use std::collections::HashSet;
use std::fmt::Write;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Template file to inspect
    pub file: String,
}

pub fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = Registry::with_builtin_blocks();
    let path = resolve_path(cwd, &args.file);
    let document = load_document(&path, &registry, &config)?;

    println!(
        "{} {} ({} blocks)",
        "📄".bright_blue(),
        args.file.bright_white(),
        document.len()
    );
    print!("{}", format_tree(&document));

    let orphans = document.orphans();
    if !orphans.is_empty() {
        println!();
        println!(
            "{} {} unreachable blocks: {}",
            "⚠️".yellow(),
            orphans.len(),
            orphans.join(", ")
        );
    }

    Ok(())
}

/// Indented outline of every block reachable from the root.
pub fn format_tree(document: &Document) -> String {
    let mut out = String::new();
    let mut visited = HashSet::new();
    write_block(document, document.root_id(), 0, &mut visited, &mut out);
    out
}

fn write_block<'a>(
    document: &'a Document,
    block_id: &'a str,
    depth: usize,
    visited: &mut HashSet<&'a str>,
    out: &mut String,
) {
    let pad = "  ".repeat(depth);
    let Some(record) = document.get(block_id) else {
        let _ = writeln!(out, "{}{} (missing)", pad, block_id);
        return;
    };
    if !visited.insert(block_id) {
        let _ = writeln!(out, "{}{} (repeated)", pad, block_id);
        return;
    }

    let _ = writeln!(out, "{}{} [{}]", pad, block_id, record.kind);

    if let Some(children) = &record.data.children_ids {
        for child in children {
            write_block(document, child, depth + 1, visited, out);
        }
    }
    if let Some(columns) = &record.data.column_children_ids {
        for (index, column) in columns.iter().enumerate() {
            let _ = writeln!(out, "{}  column {}", pad, index);
            for child in column {
                write_block(document, child, depth + 2, visited, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use missive_editor::serialization;

    #[test]
    fn test_format_tree() {
        let registry = Registry::with_builtin_blocks();
        let mut document = Document::new(&registry, "root").unwrap();
        let heading = document.add_block(&registry, "Heading", None, None).unwrap();
        let columns = document.add_block(&registry, "Columns", None, None).unwrap();
        let text = document
            .add_block_to_column(&registry, "Text", &columns, 1)
            .unwrap();

        let expected = format!(
            "root [Container]\n  {heading} [Heading]\n  {columns} [Columns]\n    column 0\n    column 1\n      {text} [Text]\n"
        );
        assert_eq!(format_tree(&document), expected);
    }

    #[test]
    fn test_format_tree_marks_dangling_and_repeated_ids() {
        let registry = Registry::with_builtin_blocks();
        let json = r#"{
            "root": { "kind": "Container", "data": { "childrenIds": ["a", "a", "ghost"] } },
            "a": { "kind": "Divider", "data": {} }
        }"#;
        let document = serialization::from_json(json, &registry, "root").unwrap();

        assert_eq!(
            format_tree(&document),
            "root [Container]\n  a [Divider]\n  a (repeated)\n  ghost (missing)\n"
        );
    }
}
