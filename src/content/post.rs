//! Post model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::frontmatter::{FrontMatter, RawRecord};
use super::navigation::MenuItem;
use crate::helpers::{format_post_date, parse_date};

/// A validated post record: front-matter plus the rendered body
///
/// This is the plain-data shape handed to the page layer and accepted back
/// by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(flatten)]
    pub front_matter: FrontMatter,

    /// Raw markdown body
    pub content: String,

    /// Rendered HTML body
    pub content_html: String,

    pub slug: String,

    pub lang: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_menu: Option<Vec<MenuItem>>,
}

impl PostRecord {
    /// Convert back into the unvalidated key/value shape
    pub fn to_raw(&self) -> Result<RawRecord, serde_yaml::Error> {
        serde_yaml::from_value(serde_yaml::to_value(self)?)
    }
}

/// A blog post
///
/// Immutable once built; collection-typed accessors hand out copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    record: PostRecord,
}

impl Post {
    pub fn new(record: PostRecord) -> Self {
        Self { record }
    }

    pub fn title(&self) -> &str {
        &self.record.front_matter.title
    }

    pub fn slug(&self) -> &str {
        &self.record.slug
    }

    pub fn lang(&self) -> &str {
        &self.record.lang
    }

    pub fn author(&self) -> &str {
        &self.record.front_matter.author
    }

    pub fn author_photo(&self) -> &str {
        &self.record.front_matter.author_photo
    }

    pub fn author_photo_alt(&self) -> &str {
        &self.record.front_matter.author_photo_alt
    }

    pub fn description(&self) -> &str {
        &self.record.front_matter.description
    }

    pub fn image(&self) -> &str {
        &self.record.front_matter.image
    }

    /// Raw markdown body
    pub fn content(&self) -> &str {
        &self.record.content
    }

    pub fn content_html(&self) -> &str {
        &self.record.content_html
    }

    pub fn create_at(&self) -> &str {
        &self.record.front_matter.create_at
    }

    /// Last update timestamp; the creation timestamp when never updated
    pub fn update_at(&self) -> &str {
        self.record
            .front_matter
            .update_at
            .as_deref()
            .unwrap_or(&self.record.front_matter.create_at)
    }

    pub fn is_update_at(&self) -> bool {
        self.create_at() != self.update_at()
    }

    pub fn tags(&self) -> Vec<String> {
        self.record.front_matter.tags.clone().unwrap_or_default()
    }

    pub fn group(&self) -> Vec<String> {
        self.record.front_matter.group.clone().unwrap_or_default()
    }

    /// Name of the navigation menu this post uses
    pub fn navigation(&self) -> Option<&str> {
        self.record.front_matter.navigation.as_deref()
    }

    pub fn navigation_menu(&self) -> Vec<MenuItem> {
        self.record.navigation_menu.clone().unwrap_or_default()
    }

    pub fn is_navigation(&self) -> bool {
        self.record
            .navigation_menu
            .as_ref()
            .is_some_and(|menu| !menu.is_empty())
    }

    /// Site path of the post page
    pub fn link(&self) -> String {
        format!("/{}/blogs/{}", self.record.lang, self.record.slug)
    }

    pub fn create_at_with_format(&self) -> String {
        format_post_date(self.create_at(), self.lang())
    }

    pub fn update_at_with_format(&self) -> String {
        format_post_date(self.update_at(), self.lang())
    }

    pub(crate) fn updated_at_datetime(&self) -> Option<NaiveDateTime> {
        parse_date(self.update_at())
    }

    /// The record this post was built from
    pub fn serialize(&self) -> PostRecord {
        self.record.clone()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::content::validator::validate_post_record;

    pub(crate) fn record(slug: &str, create_at: &str, update_at: Option<&str>) -> PostRecord {
        PostRecord {
            front_matter: FrontMatter {
                title: format!("Post {}", slug),
                create_at: create_at.to_string(),
                update_at: update_at.map(str::to_string),
                author: "Ana".to_string(),
                author_photo: "https://example.com/ana.webp".to_string(),
                author_photo_alt: "AN".to_string(),
                tags: Some(vec!["rust".to_string(), "web".to_string()]),
                group: None,
                description: format!("About {}", slug),
                image: "/images/cover.webp".to_string(),
                navigation: None,
            },
            content: format!("# {}\n\nBody of {}.", slug, slug),
            content_html: format!("<h1>{}</h1>\n<p>Body of {}.</p>\n", slug, slug),
            slug: slug.to_string(),
            lang: "en".to_string(),
            navigation_menu: None,
        }
    }

    #[test]
    fn test_link_and_dates() {
        let post = Post::new(record("hello", "2023-01-01", None));
        assert_eq!(post.link(), "/en/blogs/hello");
        assert_eq!(post.update_at(), "2023-01-01");
        assert!(!post.is_update_at());
        assert_eq!(post.create_at_with_format(), "1 January, 2023");
        assert_eq!(post.update_at_with_format(), "1 January, 2023");
    }

    #[test]
    fn test_is_update_at() {
        let post = Post::new(record("world", "2023-02-01", Some("2023-03-01")));
        assert!(post.is_update_at());
        assert_eq!(post.update_at_with_format(), "1 March, 2023");

        let same = Post::new(record("same", "2023-02-01", Some("2023-02-01")));
        assert!(!same.is_update_at());
    }

    #[test]
    fn test_tags_are_copies() {
        let post = Post::new(record("hello", "2023-01-01", None));
        let mut tags = post.tags();
        tags.push("mutated".to_string());
        tags[0] = "changed".to_string();
        assert_eq!(post.tags(), vec!["rust", "web"]);
        assert!(post.group().is_empty());
    }

    #[test]
    fn test_localized_dates() {
        let mut r = record("hola", "2023-01-01", None);
        r.lang = "es".to_string();
        let post = Post::new(r);
        assert_eq!(post.link(), "/es/blogs/hola");
        assert_eq!(post.create_at_with_format(), "1 enero, 2023");
    }

    #[test]
    fn test_round_trip_through_validator() {
        let mut r = record("nav", "2023-01-01", Some("2023-05-01"));
        r.front_matter.navigation = Some("design_pattern".to_string());
        r.navigation_menu = Some(vec![MenuItem::Submenu {
            title: "Creational".to_string(),
            submenu: vec![MenuItem::Link {
                title: "Builder".to_string(),
                url: "#builder".to_string(),
            }],
        }]);

        for r in [r, record("plain", "2023-01-01", None)] {
            let post = Post::new(r.clone());
            assert_eq!(post.serialize(), r);

            let raw = post.serialize().to_raw().unwrap();
            let again = Post::new(validate_post_record(&raw).unwrap());
            assert_eq!(again.serialize(), post.serialize());
        }
    }

    #[test]
    fn test_serialized_json_is_camel_case() {
        let post = Post::new(record("hello", "2023-01-01", None));
        let json = serde_json::to_value(post.serialize()).unwrap();
        assert_eq!(json["createAt"], "2023-01-01");
        assert_eq!(json["authorPhotoAlt"], "AN");
        assert_eq!(json["contentHtml"], post.content_html());
        assert!(json.get("updateAt").is_none());
        assert!(json.get("navigationMenu").is_none());
    }

    #[test]
    fn test_is_navigation() {
        let mut r = record("nav", "2023-01-01", None);
        assert!(!Post::new(r.clone()).is_navigation());
        r.navigation_menu = Some(Vec::new());
        assert!(!Post::new(r.clone()).is_navigation());
        r.navigation_menu = Some(vec![MenuItem::Link {
            title: "Top".to_string(),
            url: "#".to_string(),
        }]);
        assert!(Post::new(r).is_navigation());
    }
}
