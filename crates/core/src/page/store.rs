//! Pages stored as files under a content directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use super::Page;
use crate::config::ResolvedConfig;
use crate::frontmatter::{Document, FormatMark, FrontMatterError};

// One or more segments of letters, digits, '_' and '-', separated by '/'.
static PAGE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+(/[a-zA-Z0-9_-]+)*$").unwrap());

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid page name '{0}' (use letters, digits, '_', '-' and '/')")]
    InvalidName(String),

    #[error("page '{0}' does not exist")]
    NotFound(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk content directory {0}: {1}")]
    Walk(String, #[source] walkdir::Error),

    #[error("page '{name}' has unusable front matter: {source}")]
    FrontMatter {
        name: String,
        #[source]
        source: FrontMatterError,
    },
}

/// Maps page names such as `blog/first-post` to files on disk.
#[derive(Debug, Clone)]
pub struct PageStore {
    content_dir: PathBuf,
    suffix: String,
    default_format: FormatMark,
}

impl PageStore {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            suffix: ".md".to_string(),
            default_format: FormatMark::default(),
        }
    }

    pub fn from_config(cfg: &ResolvedConfig) -> Self {
        Self::new(&cfg.content_dir)
            .with_suffix(&cfg.suffix)
            .with_default_format(cfg.default_format)
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_default_format(mut self, mark: FormatMark) -> Self {
        self.default_format = mark;
        self
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn default_format(&self) -> FormatMark {
        self.default_format
    }

    /// File path of a page, after validating its name.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        if !PAGE_NAME_RE.is_match(name) {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.content_dir.join(format!("{name}{}", self.suffix)))
    }

    pub fn load(&self, name: &str) -> Result<Page, StoreError> {
        let path = self.path_for(name)?;
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()));
            }
            Err(e) => return Err(StoreError::Io { path, source: e }),
        };

        let document = Document::parse(&raw, self.default_format)
            .map_err(|source| StoreError::FrontMatter { name: name.to_string(), source })?;
        debug!(page = name, format = %document.mark(), "loaded page");
        Ok(Page { name: name.to_string(), document })
    }

    /// Load a page, or start a new one in the default format if it does
    /// not exist yet.
    pub fn load_or_new(&self, name: &str) -> Result<Page, StoreError> {
        match self.load(name) {
            Err(StoreError::NotFound(_)) => {
                debug!(page = name, format = %self.default_format, "creating new page");
                Ok(Page::new(name, self.default_format))
            }
            other => other,
        }
    }

    /// Write the whole page, creating parent directories as needed.
    pub fn save(&self, page: &Page) -> Result<PathBuf, StoreError> {
        let path = self.path_for(&page.name)?;
        let bytes = page
            .document
            .to_bytes()
            .map_err(|source| StoreError::FrontMatter { name: page.name.clone(), source })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io { path: parent.to_path_buf(), source: e })?;
        }
        fs::write(&path, bytes).map_err(|e| StoreError::Io { path: path.clone(), source: e })?;
        debug!(page = %page.name, path = %path.display(), "saved page");
        Ok(path)
    }

    /// Names of all pages, sorted. Hidden entries are skipped.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.content_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.content_dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = entry
                .map_err(|e| StoreError::Walk(self.content_dir.display().to_string(), e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.content_dir) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if let Some(name) = relative.strip_suffix(&self.suffix)
                && PAGE_NAME_RE.is_match(name)
            {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}
