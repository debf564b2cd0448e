//! Schema validation for front-matter and post records
//!
//! Validation never stops at the first bad field: every failing path is
//! collected so authors can fix a post in one pass.

use serde_yaml::Value;
use std::fmt;

use super::frontmatter::{FrontMatter, RawRecord};
use super::navigation::MenuItem;
use super::post::PostRecord;

/// One failing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

/// A record failed schema checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    target: &'static str,
    index: Option<usize>,
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn target(&self) -> &str {
        self.target
    }

    /// Position of the failing element when validating a list
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Paths of every failing field
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.path.as_str()).collect()
    }

    #[cfg(test)]
    pub(crate) fn has_field(&self, path: &str) -> bool {
        self.issues.iter().any(|i| i.path == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed in {}:", self.target)?;
        for issue in &self.issues {
            write!(f, "\n- {}: {}", issue.path, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Validate parsed front-matter
pub fn validate_front_matter(raw: &RawRecord) -> Result<FrontMatter, ValidationError> {
    let mut fields = Fields::new(raw, String::new());
    let front_matter = read_front_matter(&mut fields);
    fields.finish("FrontMatter", None)?;
    // Only reachable when every required field was read
    front_matter.ok_or_else(|| internal_error("FrontMatter"))
}

/// Validate a fully assembled post record
pub fn validate_post_record(raw: &RawRecord) -> Result<PostRecord, ValidationError> {
    validate_record_at(raw, String::new(), None)
}

/// Validate a list of post records, failing on the first invalid element
pub fn validate_post_records(raws: &[RawRecord]) -> Result<Vec<PostRecord>, ValidationError> {
    raws.iter()
        .enumerate()
        .map(|(i, raw)| validate_record_at(raw, format!("{}.", i), Some(i)))
        .collect()
}

fn validate_record_at(
    raw: &RawRecord,
    prefix: String,
    index: Option<usize>,
) -> Result<PostRecord, ValidationError> {
    let target = if index.is_some() {
        "PostRecords"
    } else {
        "PostRecord"
    };

    let mut fields = Fields::new(raw, prefix);
    let front_matter = read_front_matter(&mut fields);
    let content = fields.string("content");
    let content_html = fields.string("contentHtml");
    let slug = fields.non_empty_string("slug");
    let lang = fields.non_empty_string("lang");
    let navigation_menu = fields.menu("navigationMenu");
    fields.finish(target, index)?;

    match (front_matter, content, content_html, slug, lang) {
        (Some(front_matter), Some(content), Some(content_html), Some(slug), Some(lang)) => {
            Ok(PostRecord {
                front_matter,
                content,
                content_html,
                slug,
                lang,
                navigation_menu,
            })
        }
        _ => Err(internal_error(target)),
    }
}

fn read_front_matter(fields: &mut Fields<'_>) -> Option<FrontMatter> {
    let title = fields.string("title");
    let create_at = fields.string("createAt");
    let update_at = fields.optional_string("updateAt");
    let author = fields.string("author");
    let author_photo = fields.url_or_path("authorPhoto");
    let author_photo_alt = fields.string("authorPhotoAlt");
    let tags = fields.optional_string_list("tags");
    let group = fields.optional_string_list("group");
    let description = fields.string("description");
    let image = fields.url_or_path("image");
    let navigation = fields.optional_string("navigation");

    Some(FrontMatter {
        title: title?,
        create_at: create_at?,
        update_at,
        author: author?,
        author_photo: author_photo?,
        author_photo_alt: author_photo_alt?,
        tags,
        group,
        description: description?,
        image: image?,
        navigation,
    })
}

fn internal_error(target: &'static str) -> ValidationError {
    ValidationError {
        target,
        index: None,
        issues: vec![FieldIssue {
            path: String::new(),
            message: "record could not be assembled".to_string(),
        }],
    }
}

/// Field reader that records every problem it sees
struct Fields<'a> {
    raw: &'a RawRecord,
    prefix: String,
    issues: Vec<FieldIssue>,
}

impl<'a> Fields<'a> {
    fn new(raw: &'a RawRecord, prefix: String) -> Self {
        Self {
            raw,
            prefix,
            issues: Vec::new(),
        }
    }

    fn finish(self, target: &'static str, index: Option<usize>) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                target,
                index,
                issues: self.issues,
            })
        }
    }

    fn issue(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            path: format!("{}{}", self.prefix, path),
            message: message.into(),
        });
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.raw.get(key).filter(|v| !v.is_null())
    }

    fn string(&mut self, key: &str) -> Option<String> {
        match self.present(key) {
            None => {
                self.issue(key, "Required");
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.issue(key, expected("string", other));
                None
            }
        }
    }

    fn non_empty_string(&mut self, key: &str) -> Option<String> {
        let value = self.string(key)?;
        if value.trim().is_empty() {
            self.issue(key, "Must not be empty");
            return None;
        }
        Some(value)
    }

    fn optional_string(&mut self, key: &str) -> Option<String> {
        match self.present(key) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.issue(key, expected("string", other));
                None
            }
        }
    }

    fn url_or_path(&mut self, key: &str) -> Option<String> {
        let value = self.string(key)?;
        if !is_url_or_path(&value) {
            self.issue(key, "Invalid url or path");
            return None;
        }
        Some(value)
    }

    fn optional_string_list(&mut self, key: &str) -> Option<Vec<String>> {
        match self.present(key)? {
            Value::String(s) => Some(vec![s.clone()]),
            Value::Sequence(items) => {
                let mut list = Vec::with_capacity(items.len());
                let mut valid = true;
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::String(s) => list.push(s.clone()),
                        other => {
                            self.issue(&format!("{}.{}", key, i), expected("string", other));
                            valid = false;
                        }
                    }
                }
                valid.then_some(list)
            }
            other => {
                self.issue(key, expected("array", other));
                None
            }
        }
    }

    fn menu(&mut self, key: &str) -> Option<Vec<MenuItem>> {
        let value = self.present(key)?;
        self.menu_items(key, value)
    }

    fn menu_items(&mut self, path: &str, value: &Value) -> Option<Vec<MenuItem>> {
        let Value::Sequence(items) = value else {
            self.issue(path, expected("array", value));
            return None;
        };

        let mut menu = Vec::with_capacity(items.len());
        let mut valid = true;
        for (i, item) in items.iter().enumerate() {
            match self.menu_item(&format!("{}.{}", path, i), item) {
                Some(item) => menu.push(item),
                None => valid = false,
            }
        }
        valid.then_some(menu)
    }

    fn menu_item(&mut self, path: &str, value: &Value) -> Option<MenuItem> {
        let Value::Mapping(map) = value else {
            self.issue(path, expected("object", value));
            return None;
        };

        let field = |name: &str| map.get(name).filter(|v| !v.is_null());

        let title = match field("title") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.issue(&format!("{}.title", path), expected("string", other));
                None
            }
            None => {
                self.issue(&format!("{}.title", path), "Required");
                None
            }
        };

        if let Some(url) = field("url") {
            let url = match url {
                Value::String(s) => Some(s.clone()),
                other => {
                    self.issue(&format!("{}.url", path), expected("string", other));
                    None
                }
            };
            return Some(MenuItem::Link {
                title: title?,
                url: url?,
            });
        }

        if let Some(submenu) = field("submenu") {
            let submenu = self.menu_items(&format!("{}.submenu", path), submenu);
            return Some(MenuItem::Submenu {
                title: title?,
                submenu: submenu?,
            });
        }

        self.issue(path, "Expected either url or submenu");
        None
    }
}

fn expected(kind: &str, got: &Value) -> String {
    format!("Expected {}, received {}", kind, type_name(got))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "array",
        Value::Mapping(_) => "object",
        Value::Tagged(_) => "tagged value",
    }
}

/// Accepts absolute URLs (`scheme://...`, `data:`) and site or relative paths
fn is_url_or_path(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(yaml: &str) -> RawRecord {
        serde_yaml::from_str(yaml).unwrap()
    }

    const FRONT_MATTER: &str = r#"
title: Hello
createAt: "2023-01-01"
author: Ana
authorPhoto: https://example.com/ana.webp
authorPhotoAlt: AN
description: First post
image: /images/hello.webp
"#;

    fn record_yaml() -> String {
        format!(
            "{}content: \"# Hello\"\ncontentHtml: \"<h1>Hello</h1>\"\nslug: hello\nlang: en\n",
            FRONT_MATTER
        )
    }

    #[test]
    fn test_valid_front_matter() {
        let fm = validate_front_matter(&raw(FRONT_MATTER)).unwrap();
        assert_eq!(fm.title, "Hello");
        assert_eq!(fm.update_at, None);
        assert_eq!(fm.tags, None);
    }

    #[test]
    fn test_reports_every_missing_field() {
        let err = validate_front_matter(&raw("createAt: '2023-01-01'")).unwrap_err();
        let fields = err.fields();
        for field in [
            "title",
            "author",
            "authorPhoto",
            "authorPhotoAlt",
            "description",
            "image",
        ] {
            assert!(fields.contains(&field), "missing {field} in {fields:?}");
        }
        assert!(!err.has_field("createAt"));
        assert!(err.to_string().starts_with("Validation failed in FrontMatter:"));
        assert!(err.to_string().contains("- title: Required"));
    }

    #[test]
    fn test_wrong_types() {
        let yaml = format!("{}tags: [rust, 3]\ngroup: 7\nupdateAt: true\n", FRONT_MATTER);
        let err = validate_front_matter(&raw(&yaml)).unwrap_err();
        assert!(err.has_field("tags.1"));
        assert!(err.has_field("group"));
        assert!(err.has_field("updateAt"));
        assert_eq!(err.issues().len(), 3);
    }

    #[test]
    fn test_single_tag_becomes_list() {
        let yaml = format!("{}tags: notes\n", FRONT_MATTER);
        let fm = validate_front_matter(&raw(&yaml)).unwrap();
        assert_eq!(fm.tags, Some(vec!["notes".to_string()]));
    }

    #[test]
    fn test_rejects_whitespace_in_image() {
        let yaml = FRONT_MATTER.replace("/images/hello.webp", "not a path");
        let err = validate_front_matter(&raw(&yaml)).unwrap_err();
        assert_eq!(err.fields(), vec!["image"]);
    }

    #[test]
    fn test_valid_post_record() {
        let record = validate_post_record(&raw(&record_yaml())).unwrap();
        assert_eq!(record.slug, "hello");
        assert_eq!(record.lang, "en");
        assert_eq!(record.content_html, "<h1>Hello</h1>");
        assert!(record.navigation_menu.is_none());
    }

    #[test]
    fn test_post_record_requires_body_fields() {
        let err = validate_post_record(&raw(FRONT_MATTER)).unwrap_err();
        assert_eq!(err.target(), "PostRecord");
        for field in ["content", "contentHtml", "slug", "lang"] {
            assert!(err.has_field(field));
        }
    }

    #[test]
    fn test_navigation_menu_paths() {
        let yaml = format!(
            r##"{}navigationMenu:
  - title: Intro
    url: "#intro"
  - title: Patterns
    submenu:
      - title: Singleton
      - title: Factory
        url: "#factory"
  - title: Broken
"##,
            record_yaml()
        );
        let err = validate_post_record(&raw(&yaml)).unwrap_err();
        assert!(err.has_field("navigationMenu.1.submenu.0"));
        assert!(err.has_field("navigationMenu.2"));
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn test_navigation_menu_valid() {
        let yaml = format!(
            "{}navigationMenu:\n  - title: Patterns\n    submenu:\n      - title: Singleton\n        url: '#singleton'\n",
            record_yaml()
        );
        let record = validate_post_record(&raw(&yaml)).unwrap();
        let menu = record.navigation_menu.unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].link_count(), 1);
    }

    #[test]
    fn test_records_report_first_bad_index() {
        let good = raw(&record_yaml());
        let mut bad = good.clone();
        bad.shift_remove("slug");
        let mut also_bad = good.clone();
        also_bad.shift_remove("title");

        let err = validate_post_records(&[good.clone(), bad, also_bad]).unwrap_err();
        assert_eq!(err.index(), Some(1));
        assert_eq!(err.fields(), vec!["1.slug"]);

        let ok = validate_post_records(&[good.clone(), good]).unwrap();
        assert_eq!(ok.len(), 2);
    }

    #[test]
    fn test_empty_slug_rejected() {
        let yaml = record_yaml().replace("slug: hello", "slug: ''");
        let err = validate_post_record(&raw(&yaml)).unwrap_err();
        assert_eq!(err.fields(), vec!["slug"]);
    }
}
