//! Runtime configuration.
//!
//! Resolution order, later wins: built-in defaults, `config.toml` in the
//! platform config directory, environment variables, command-line flags.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const DB_FILE_NAME: &str = "financeflow.db";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_MODEL: &str = "llama3.2";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) insights: InsightsConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct InsightsConfig {
    /// Base URL of an Ollama-compatible server. Insights are disabled when unset.
    pub(crate) host: Option<String>,
    pub(crate) model: String,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            host: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    insights: InsightsConfig,
}

impl Config {
    /// Load configuration for this run. `data_dir_flag` comes from `--data-dir`.
    pub(crate) fn load(data_dir_flag: Option<&Path>) -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "financeflow", "FinanceFlow")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        let config_path = proj_dirs.config_dir().join(CONFIG_FILE_NAME);
        let file = if config_path.exists() {
            let text = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            debug!(path = %config_path.display(), "loaded config file");
            parse_file_config(&text)
                .with_context(|| format!("Invalid config file: {}", config_path.display()))?
        } else {
            FileConfig::default()
        };

        Ok(Self::resolve(
            proj_dirs.data_dir(),
            file,
            |key| std::env::var(key).ok(),
            data_dir_flag,
        ))
    }

    fn resolve(
        default_data_dir: &Path,
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
        data_dir_flag: Option<&Path>,
    ) -> Self {
        let data_dir = data_dir_flag
            .map(Path::to_path_buf)
            .or_else(|| env("FINANCEFLOW_DATA_DIR").map(PathBuf::from))
            .or(file.data_dir)
            .unwrap_or_else(|| default_data_dir.to_path_buf());

        let mut insights = file.insights;
        if let Some(host) = env("OLLAMA_HOST") {
            insights.host = Some(host);
        }
        if let Some(model) = env("OLLAMA_MODEL") {
            insights.model = model;
        }

        Self { data_dir, insights }
    }

    /// Path of the database file, creating the data directory if needed.
    pub(crate) fn db_path(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!("Failed to create data directory: {}", self.data_dir.display())
        })?;
        Ok(self.data_dir.join(DB_FILE_NAME))
    }
}

fn parse_file_config(text: &str) -> Result<FileConfig> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
