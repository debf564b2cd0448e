//! Ordered, searchable collection of posts for one language

use std::sync::Arc;

use super::post::{Post, PostRecord};
use super::search::{query_tokens, SearchDocument, SearchOptions};

/// Sort direction for [`PostCollection::sort_by_update_at`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Posts in a fixed order with a search index built once
///
/// Treated as a value: searching and sorting produce new collections that
/// share the already-built posts and search documents.
#[derive(Debug, Clone, Default)]
pub struct PostCollection {
    posts: Vec<Arc<Post>>,
    documents: Vec<Arc<SearchDocument>>,
    options: SearchOptions,
}

impl PostCollection {
    pub fn new(records: Vec<PostRecord>) -> Self {
        Self::with_search_options(records, SearchOptions::default())
    }

    pub fn with_search_options(records: Vec<PostRecord>, options: SearchOptions) -> Self {
        let (posts, documents) = records
            .into_iter()
            .map(|record| {
                let post = Post::new(record);
                let document = SearchDocument::new(&post);
                (Arc::new(post), Arc::new(document))
            })
            .unzip();

        Self {
            posts,
            documents,
            options,
        }
    }

    fn from_entries(entries: Vec<(Arc<Post>, Arc<SearchDocument>)>, options: SearchOptions) -> Self {
        let (posts, documents) = entries.into_iter().unzip();
        Self {
            posts,
            documents,
            options,
        }
    }

    fn entries(&self) -> impl Iterator<Item = (&Arc<Post>, &Arc<SearchDocument>)> {
        self.posts.iter().zip(self.documents.iter())
    }

    pub fn all(&self) -> &[Arc<Post>] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts matching `query`, most relevant first
    ///
    /// A blank query keeps the collection as it is.
    pub fn search(&self, query: &str) -> Self {
        let tokens = query_tokens(query);
        if tokens.is_empty() {
            return self.clone();
        }

        let mut scored: Vec<(f32, usize, (Arc<Post>, Arc<SearchDocument>))> = self
            .entries()
            .enumerate()
            .filter_map(|(position, (post, document))| {
                document
                    .score(&tokens, &self.options)
                    .map(|score| (score, position, (post.clone(), document.clone())))
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));

        tracing::debug!("Search {:?} matched {} of {} posts", query, scored.len(), self.len());

        Self::from_entries(
            scored.into_iter().map(|(_, _, entry)| entry).collect(),
            self.options,
        )
    }

    fn position(&self, slug: &str) -> Option<usize> {
        self.posts.iter().position(|p| p.slug() == slug)
    }

    /// First post with this slug
    pub fn get(&self, slug: &str) -> Option<&Arc<Post>> {
        self.position(slug).map(|i| &self.posts[i])
    }

    /// The post after `slug` in collection order
    pub fn get_next(&self, slug: &str) -> Option<&Arc<Post>> {
        let pos = self.position(slug)?;
        self.posts.get(pos + 1)
    }

    /// The post before `slug` in collection order
    pub fn get_prev(&self, slug: &str) -> Option<&Arc<Post>> {
        let pos = self.position(slug)?;
        pos.checked_sub(1).map(|i| &self.posts[i])
    }

    /// A copy ordered by last update; equal timestamps keep their order
    pub fn sort_by_update_at(&self, direction: SortDirection) -> Self {
        let mut entries: Vec<_> = self
            .entries()
            .map(|(post, document)| {
                let key = (post.updated_at_datetime(), post.update_at().to_string());
                (key, (post.clone(), document.clone()))
            })
            .collect();

        entries.sort_by(|a, b| {
            let ordering = a.0.cmp(&b.0);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        Self::from_entries(entries.into_iter().map(|(_, entry)| entry).collect(), self.options)
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.posts.iter().map(|p| p.slug()).collect()
    }

    pub fn serialize(&self) -> Vec<PostRecord> {
        self.posts.iter().map(|p| p.serialize()).collect()
    }
}

impl PartialEq for PostCollection {
    fn eq(&self, other: &Self) -> bool {
        self.posts.len() == other.posts.len()
            && self
                .posts
                .iter()
                .zip(other.posts.iter())
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b)
    }
}
