//! Fuzzy full-text search over posts
//!
//! Text is tokenized through [`slug::slugify`], which lowercases and
//! transliterates to ASCII, so `Diseño` and `diseno` index the same token.

use std::collections::HashSet;

use super::post::Post;

const TITLE_WEIGHT: f32 = 3.0;
const TAGS_WEIGHT: f32 = 2.0;
const GROUP_WEIGHT: f32 = 2.0;
const DESCRIPTION_WEIGHT: f32 = 1.5;
const CONTENT_WEIGHT: f32 = 1.0;

/// Tuning for approximate matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Upper bound on typos tolerated per query token
    pub max_edits: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { max_edits: 2 }
    }
}

impl SearchOptions {
    /// Typos tolerated for a query token of `len` characters
    fn edits_for(&self, len: usize) -> usize {
        let allowed = match len {
            0..=3 => 0,
            4..=6 => 1,
            _ => 2,
        };
        allowed.min(self.max_edits)
    }
}

#[derive(Debug, Default)]
struct Field {
    weight: f32,
    tokens: HashSet<String>,
}

impl Field {
    fn new<'a>(weight: f32, texts: impl IntoIterator<Item = &'a str>) -> Self {
        let tokens = texts.into_iter().flat_map(tokenize).collect();
        Self { weight, tokens }
    }

    fn best_match(&self, query: &str, options: &SearchOptions) -> f32 {
        if self.tokens.contains(query) {
            return 1.0;
        }
        self.tokens
            .iter()
            .map(|token| token_score(query, token, options))
            .fold(0.0, f32::max)
    }
}

/// Indexed text of a single post
#[derive(Debug)]
pub struct SearchDocument {
    fields: [Field; 5],
}

impl SearchDocument {
    pub fn new(post: &Post) -> Self {
        let tags = post.tags();
        let group = post.group();
        Self {
            fields: [
                Field::new(TITLE_WEIGHT, [post.title()]),
                Field::new(DESCRIPTION_WEIGHT, [post.description()]),
                Field::new(TAGS_WEIGHT, tags.iter().map(String::as_str)),
                Field::new(GROUP_WEIGHT, group.iter().map(String::as_str)),
                Field::new(CONTENT_WEIGHT, [post.content()]),
            ],
        }
    }

    /// Relevance of this document for the query tokens
    ///
    /// `None` unless every token matches some field.
    pub fn score(&self, query: &[String], options: &SearchOptions) -> Option<f32> {
        let mut total = 0.0;
        for token in query {
            let best = self
                .fields
                .iter()
                .map(|field| field.weight * field.best_match(token, options))
                .fold(0.0, f32::max);
            if best <= 0.0 {
                return None;
            }
            total += best;
        }
        Some(total)
    }
}

/// Split text into normalized search tokens
pub fn tokenize(text: &str) -> Vec<String> {
    slug::slugify(text)
        .split('-')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalized, de-duplicated query tokens in their original order
pub fn query_tokens(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(query)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

fn token_score(query: &str, token: &str, options: &SearchOptions) -> f32 {
    if token == query {
        return 1.0;
    }
    if token.starts_with(query) {
        return 0.9;
    }
    if token.contains(query) {
        return 0.75;
    }

    let query_len = query.chars().count();
    let allowed = options.edits_for(query_len);
    if allowed == 0 {
        return 0.0;
    }

    // A typo near the start of a longer word ("rsut" for "rustacean")
    let prefix: String = token.chars().take(query_len).collect();
    let distance = levenshtein_distance(query, token).min(levenshtein_distance(query, &prefix));
    if distance <= allowed {
        0.6 - 0.1 * distance as f32
    } else {
        0.0
    }
}

/// Edit distance between two strings, by characters
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::tests::record;

    #[test]
    fn test_tokenize_normalizes() {
        assert_eq!(tokenize("Diseño de Software!"), vec!["diseno", "de", "software"]);
        assert_eq!(tokenize("  "), Vec::<String>::new());
        assert_eq!(query_tokens("rust Rust RUST web"), vec!["rust", "web"]);
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("rust", "rust"), 0);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("patern", "pattern"), 1);
    }

    #[test]
    fn test_token_score_tiers() {
        let options = SearchOptions::default();
        assert_eq!(token_score("rust", "rust", &options), 1.0);
        assert_eq!(token_score("rus", "rustacean", &options), 0.9);
        assert_eq!(token_score("tace", "rustacean", &options), 0.75);
        assert!(token_score("patern", "pattern", &options) > 0.0);
        // Short tokens must match exactly
        assert_eq!(token_score("cat", "cut", &options), 0.0);
    }

    #[test]
    fn test_max_edits_zero_disables_fuzzy() {
        let options = SearchOptions { max_edits: 0 };
        assert_eq!(token_score("patern", "pattern", &options), 0.0);
    }

    #[test]
    fn test_document_requires_all_tokens() {
        let post = Post::new(record("hello", "2023-01-01", None));
        let doc = SearchDocument::new(&post);
        let options = SearchOptions::default();

        assert!(doc.score(&query_tokens("rust hello"), &options).is_some());
        assert!(doc.score(&query_tokens("rust kubernetes"), &options).is_none());
    }

    #[test]
    fn test_title_outweighs_content() {
        let options = SearchOptions::default();
        let mut in_title = record("a", "2023-01-01", None);
        in_title.front_matter.title = "Ownership explained".to_string();
        let mut in_body = record("b", "2023-01-01", None);
        in_body.content = "A note on ownership.".to_string();

        let query = query_tokens("ownership");
        let title_score = SearchDocument::new(&Post::new(in_title))
            .score(&query, &options)
            .unwrap();
        let body_score = SearchDocument::new(&Post::new(in_body))
            .score(&query, &options)
            .unwrap();
        assert!(title_score > body_score);
    }
}
