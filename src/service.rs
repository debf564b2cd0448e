//! Content service - builds, caches and queries post collections

use serde_yaml::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::cache::CacheManager;
use crate::content::frontmatter::merge_defaults;
use crate::content::validator::{validate_front_matter, validate_post_record};
use crate::content::{
    ContentEntry, ContentSource, MarkdownRenderer, Post, PostCollection, PostRecord, RawRecord,
    SearchOptions, SortDirection,
};
use crate::error::{ContentError, Result};

const CACHE_PREFIX: &str = "posts_";

fn cache_key(lang: &str) -> String {
    format!("{}{}", CACHE_PREFIX, lang)
}

/// The posts either side of one post, by update date
#[derive(Debug, Clone, Default)]
pub struct Neighbors {
    pub next: Option<Arc<Post>>,
    pub prev: Option<Arc<Post>>,
}

/// Loads posts from a [`ContentSource`] and serves them per language
pub struct ContentService {
    source: Arc<dyn ContentSource>,
    renderer: Arc<MarkdownRenderer>,
    cache: Arc<CacheManager>,
    defaults: Arc<RawRecord>,
    search: SearchOptions,
}

impl ContentService {
    pub fn new(
        source: Arc<dyn ContentSource>,
        renderer: Arc<MarkdownRenderer>,
        cache: Arc<CacheManager>,
    ) -> Self {
        Self {
            source,
            renderer,
            cache,
            defaults: Arc::new(RawRecord::new()),
            search: SearchOptions::default(),
        }
    }

    /// Front-matter values merged under every post's own front-matter
    pub fn with_defaults(mut self, defaults: RawRecord) -> Self {
        self.defaults = Arc::new(defaults);
        self
    }

    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.search = options;
        self
    }

    /// Every distinct slug across all languages, sorted
    pub fn list_slugs(&self) -> Result<Vec<String>> {
        let slugs: BTreeSet<String> = self.source.entries()?.into_iter().map(|e| e.slug).collect();
        Ok(slugs.into_iter().collect())
    }

    /// Every language that has at least one post, sorted
    pub fn list_languages(&self) -> Result<Vec<String>> {
        let langs: BTreeSet<String> = self.source.entries()?.into_iter().map(|e| e.lang).collect();
        Ok(langs.into_iter().collect())
    }

    /// All posts for `lang`, built on first use and cached afterwards
    ///
    /// Any unreadable, unparseable or invalid file fails the whole call and
    /// nothing is cached.
    pub async fn get_posts(&self, lang: &str) -> Result<Arc<PostCollection>> {
        let key = cache_key(lang);
        if let Some(posts) = self.cache.get::<PostCollection>(&key) {
            tracing::debug!("Cache hit for {}", key);
            return Ok(posts);
        }

        let entries: Vec<ContentEntry> = self
            .source
            .entries()?
            .into_iter()
            .filter(|e| e.lang == lang)
            .collect();
        let count = entries.len();

        let mut tasks = JoinSet::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let source = Arc::clone(&self.source);
            let renderer = Arc::clone(&self.renderer);
            let defaults = Arc::clone(&self.defaults);
            tasks.spawn_blocking(move || {
                load_record(source.as_ref(), &renderer, &defaults, &entry).map(|r| (index, r))
            });
        }

        let mut records = Vec::with_capacity(count);
        while let Some(joined) = tasks.join_next().await {
            records.push(joined??);
        }
        // Tasks finish in any order; keep discovery order
        records.sort_by_key(|(index, _)| *index);

        let collection = Arc::new(PostCollection::with_search_options(
            records.into_iter().map(|(_, record)| record).collect(),
            self.search,
        ));
        tracing::info!("Loaded {} posts for language {}", collection.len(), lang);

        self.cache.set(key, Arc::clone(&collection));
        Ok(collection)
    }

    pub async fn get_post(&self, lang: &str, slug: &str) -> Result<Option<Arc<Post>>> {
        let posts = self.get_posts(lang).await?;
        Ok(posts.get(slug).cloned())
    }

    /// Chronological neighbors of `slug`
    pub async fn get_neighbors(&self, lang: &str, slug: &str) -> Result<Neighbors> {
        let posts = self.get_posts(lang).await?.sort_by_update_at(SortDirection::Asc);
        Ok(Neighbors {
            next: posts.get_next(slug).cloned(),
            prev: posts.get_prev(slug).cloned(),
        })
    }

    /// Posts for `lang` matching `query`
    pub async fn search(&self, lang: &str, query: &str) -> Result<PostCollection> {
        Ok(self.get_posts(lang).await?.search(query))
    }
}

/// Read, render and validate one post file
fn load_record(
    source: &dyn ContentSource,
    renderer: &MarkdownRenderer,
    defaults: &RawRecord,
    entry: &ContentEntry,
) -> Result<PostRecord> {
    let document = entry.document();
    tracing::debug!("Rendering {}", document);

    let text = source.read_post(entry)?;
    let rendered = renderer.render(&document, &text)?;

    let mut raw = rendered.front_matter;
    merge_defaults(&mut raw, defaults);

    let front_matter = validate_front_matter(&raw).map_err(|source| ContentError::Validation {
        document: document.clone(),
        source,
    })?;

    let navigation_menu = match front_matter.navigation.as_deref() {
        Some(name) => Some(load_navigation(source, name, &entry.lang)?),
        None => None,
    };

    raw.insert("content".to_string(), Value::String(rendered.content));
    raw.insert("contentHtml".to_string(), Value::String(rendered.content_html));
    raw.insert("slug".to_string(), Value::String(entry.slug.clone()));
    raw.insert("lang".to_string(), Value::String(entry.lang.clone()));
    if let Some(menu) = navigation_menu {
        raw.insert("navigationMenu".to_string(), menu);
    }

    validate_post_record(&raw).map_err(|source| ContentError::Validation { document, source })
}

fn load_navigation(source: &dyn ContentSource, name: &str, lang: &str) -> Result<Value> {
    let text = source.read_navigation(name, lang)?;
    serde_yaml::from_str(&text)
        .map_err(|e| ContentError::parse(format!("{}.{}.yml", name, lang), e))
}
