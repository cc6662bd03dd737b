use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::frontmatter::FormatMark;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    /// Directory holding the page files.
    pub content_dir: String,
    /// File suffix appended to page names (default ".md").
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Front matter format for new pages: yaml, toml or json (default toml).
    #[serde(default)]
    pub default_format: Option<String>,
    /// chrono format for the `date` field (default "%Y-%m-%d").
    #[serde(default)]
    pub date_format: Option<String>,
}

fn default_suffix() -> String {
    ".md".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub content_dir: PathBuf,
    pub suffix: String,
    pub default_format: FormatMark,
    pub date_format: String,
    pub logging: LoggingConfig,
}
