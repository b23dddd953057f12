pub mod add;
pub mod compile;
pub mod init;
pub mod inspect;

pub use add::{add, AddArgs};
pub use compile::{compile, CompileArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use missive_editor::{serialization, Document, Registry};
use std::path::{Path, PathBuf};

/// Resolve a CLI path argument against the working directory.
pub(crate) fn resolve_path(cwd: &str, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}

/// Read a template document, repairing its root as on import.
pub(crate) fn load_document(path: &Path, registry: &Registry, config: &Config) -> Result<Document> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document = serialization::from_json(&source, registry, &config.root_id)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(document)
}
