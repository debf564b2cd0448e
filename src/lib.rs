//! folio: blog content pipeline for a personal portfolio site
//!
//! This crate discovers markdown posts named `{slug}.{lang}.md`, renders
//! them to HTML, validates their front-matter and serves them per language
//! with search and chronological navigation.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod service;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use cache::CacheManager;
pub use content::{MenuItem, Post, PostCollection, PostRecord, SortDirection};
pub use error::ContentError;
pub use service::{ContentService, Neighbors};

const CONFIG_FILE: &str = "folio.yml";

/// A site directory together with its configuration
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Post directory
    pub content_dir: PathBuf,
    /// Navigation menu directory
    pub navigation_dir: PathBuf,
}

impl Folio {
    /// Open the site in `base_dir`, reading `folio.yml` if there is one
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let navigation_dir = base_dir.join(&config.navigation_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            navigation_dir,
        })
    }

    /// Assemble a content service reading this site's files
    pub fn content_service(&self) -> ContentService {
        let source = content::FsContentSource::new(&self.content_dir, &self.navigation_dir);
        let renderer =
            content::MarkdownRenderer::with_options(&self.config.highlight, &self.config.markdown);

        ContentService::new(
            Arc::new(source),
            Arc::new(renderer),
            Arc::new(CacheManager::new()),
        )
        .with_defaults(self.config.defaults.clone())
        .with_search_options((&self.config.search).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.content_dir, dir.path().join("content/blogs"));
        assert_eq!(folio.navigation_dir, dir.path().join("content/navigation"));
    }

    #[tokio::test]
    async fn test_service_uses_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "content_dir: posts\ndefaults:\n  author: Ana\n  authorPhoto: /ana.webp\n  authorPhotoAlt: AN\n  description: d\n  image: /i.webp\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::write(
            dir.path().join("posts/hello.en.md"),
            "---\ntitle: Hello\ncreateAt: 2023-01-01\n---\nHi",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        let service = folio.content_service();
        let post = service.get_post("en", "hello").await.unwrap().unwrap();
        assert_eq!(post.author(), "Ana");
        assert_eq!(service.list_slugs().unwrap(), vec!["hello"]);
    }

    #[test]
    fn test_bad_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "content_dir: [").unwrap();
        assert!(Folio::new(dir.path()).is_err());
    }
}
