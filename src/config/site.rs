//! Site configuration (folio.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::{RawRecord, SearchOptions};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directory
    pub content_dir: String,
    pub navigation_dir: String,

    // Rendering
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,

    // Search
    #[serde(default)]
    pub search: SearchConfig,

    /// Front-matter values applied to every post that doesn't set them
    #[serde(default)]
    pub defaults: RawRecord,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "content/blogs".to_string(),
            navigation_dir: "content/navigation".to_string(),
            highlight: HighlightConfig::default(),
            markdown: MarkdownConfig::default(),
            search: SearchConfig::default(),
            defaults: RawRecord::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Pass hand-written HTML through; when off it is escaped as text
    pub raw_html: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { raw_html: true }
    }
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_edits: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_edits: SearchOptions::default().max_edits,
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        SearchOptions {
            max_edits: config.max_edits,
        }
    }
}
