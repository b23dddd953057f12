use missive_editor::EditorOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "missive.config.json";

/// Missive configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing template documents (`*.json`)
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Directory compiled HTML is written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Key of the root container in every template
    #[serde(default = "default_root_id")]
    pub root_id: String,

    /// Page title of compiled HTML
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_src_dir() -> String {
    "templates".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_root_id() -> String {
    missive_editor::DEFAULT_ROOT_ID.to_string()
}

fn default_title() -> String {
    "Email Template".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            root_id: self.root_id.clone(),
            project_title: self.title.clone(),
            ..Default::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            root_id: default_root_id(),
            title: default_title(),
        }
    }
}
