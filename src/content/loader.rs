//! Content source - finds and reads post and navigation files

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ContentError, Result};

/// A post file discovered on disk, named `{slug}.{lang}.md`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub slug: String,
    pub lang: String,
    pub path: PathBuf,
}

impl ContentEntry {
    /// Name used for this entry in errors and logs
    pub fn document(&self) -> String {
        format!("{}.{}.md", self.slug, self.lang)
    }
}

/// Where post and navigation files come from
pub trait ContentSource: Send + Sync {
    /// Every post file, in a stable order
    fn entries(&self) -> Result<Vec<ContentEntry>>;

    /// The full text of a post file
    fn read_post(&self, entry: &ContentEntry) -> Result<String>;

    /// The YAML text of the navigation menu `name` for `lang`
    fn read_navigation(&self, name: &str, lang: &str) -> Result<String>;
}

/// Reads content from directories on the local filesystem
#[derive(Debug, Clone)]
pub struct FsContentSource {
    content_dir: PathBuf,
    navigation_dir: PathBuf,
}

impl FsContentSource {
    pub fn new(content_dir: impl Into<PathBuf>, navigation_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            navigation_dir: navigation_dir.into(),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }
}

impl ContentSource for FsContentSource {
    fn entries(&self) -> Result<Vec<ContentEntry>> {
        if !self.content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", self.content_dir);
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.content_dir.clone());
                ContentError::io(path, io::Error::other(e))
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }

            match parse_file_name(path) {
                Some((slug, lang)) => entries.push(ContentEntry {
                    slug,
                    lang,
                    path: path.to_path_buf(),
                }),
                None if is_markdown_file(path) => {
                    tracing::warn!("Skipping {:?}: expected a {{slug}}.{{lang}}.md name", path);
                }
                None => {}
            }
        }

        tracing::debug!("Discovered {} post files in {:?}", entries.len(), self.content_dir);
        Ok(entries)
    }

    fn read_post(&self, entry: &ContentEntry) -> Result<String> {
        fs::read_to_string(&entry.path).map_err(|e| ContentError::io(&entry.path, e))
    }

    fn read_navigation(&self, name: &str, lang: &str) -> Result<String> {
        let path = self.navigation_dir.join(format!("{}.{}.yml", name, lang));
        fs::read_to_string(&path).map_err(|e| ContentError::io(path, e))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Split `{slug}.{lang}.md` into slug and language
fn parse_file_name(path: &Path) -> Option<(String, String)> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".md")?;
    let (slug, lang) = stem.rsplit_once('.')?;
    if slug.is_empty() || lang.is_empty() {
        return None;
    }
    Some((slug.to_string(), lang.to_string()))
}
