//! Front-matter parsing

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{ContentError, Result};

/// Unvalidated key/value data, in document order
pub type RawRecord = IndexMap<String, Value>;

const FENCE: &str = "---";

/// Validated front-matter of a blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: String,
    pub create_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<String>,
    pub author: String,
    pub author_photo: String,
    pub author_photo_alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<String>>,
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<String>,
}

/// Split a document into its raw front-matter and the markdown body
///
/// A document without a leading `---` line has empty front-matter. Once the
/// opening fence is present the block must be closed and hold a YAML mapping
/// with string keys.
pub fn parse<'a>(document: &str, content: &'a str) -> Result<(RawRecord, &'a str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some(rest) = strip_opening_fence(content) else {
        return Ok((RawRecord::new(), content));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let yaml = &rest[..offset];
            // The fence line carries its own line break; blank lines after it stay
            let body = &rest[offset + line.len()..];
            return Ok((parse_yaml(document, yaml)?, body));
        }
        offset += line.len();
    }

    Err(ContentError::parse(
        document,
        "front-matter is missing its closing `---` fence",
    ))
}

fn strip_opening_fence(content: &str) -> Option<&str> {
    let (first, rest) = match content.find('\n') {
        Some(pos) => (&content[..pos], &content[pos + 1..]),
        None => (content, ""),
    };
    (first.trim_end() == FENCE).then_some(rest)
}

fn parse_yaml(document: &str, yaml: &str) -> Result<RawRecord> {
    if yaml.trim().is_empty() {
        return Ok(RawRecord::new());
    }

    let value: Value = serde_yaml::from_str(yaml)
        .map_err(|e| ContentError::parse(document, format!("invalid YAML front-matter: {}", e)))?;

    match value {
        Value::Null => Ok(RawRecord::new()),
        Value::Mapping(mapping) => {
            let mut record = RawRecord::with_capacity(mapping.len());
            for (key, value) in mapping {
                match key {
                    Value::String(key) => {
                        record.insert(key, value);
                    }
                    other => {
                        return Err(ContentError::parse(
                            document,
                            format!("front-matter key {:?} is not a string", other),
                        ));
                    }
                }
            }
            Ok(record)
        }
        _ => Err(ContentError::parse(
            document,
            "front-matter must be a mapping of keys to values",
        )),
    }
}

/// Fill keys that are absent (or null) in `record` from `defaults`
pub fn merge_defaults(record: &mut RawRecord, defaults: &RawRecord) {
    for (key, value) in defaults {
        let missing = record.get(key).map_or(true, Value::is_null);
        if missing {
            record.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
createAt: 2024-01-15T10:30:00Z
tags:
  - rust
  - blog
---

This is the content.
"#;

        let (fm, body) = parse("hello.en.md", content).unwrap();
        assert_eq!(fm.get("title"), Some(&Value::from("Hello World")));
        assert_eq!(fm.get("createAt"), Some(&Value::from("2024-01-15T10:30:00Z")));
        assert!(fm.get("tags").unwrap().is_sequence());
        assert_eq!(body, "\nThis is the content.\n");
    }

    #[test]
    fn test_only_fence_line_break_is_removed() {
        let (_, body) = parse("gap.en.md", "---\ntitle: Gap\n---\n\n\n# Heading\n").unwrap();
        assert_eq!(body, "\n\n# Heading\n");

        let (_, body) = parse("tight.en.md", "---\ntitle: Tight\n---\n# Heading").unwrap();
        assert_eq!(body, "# Heading");

        let (_, body) = parse("crlf.en.md", "---\r\ntitle: Crlf\r\n---\r\n\r\nBody").unwrap();
        assert_eq!(body, "\r\nBody");
    }

    #[test]
    fn test_keys_keep_document_order() {
        let content = "---\nb: 1\na: 2\nc: 3\n---\nbody";
        let (fm, _) = parse("order.en.md", content).unwrap();
        let keys: Vec<_> = fm.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_no_frontmatter_is_empty() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (fm, body) = parse("plain.en.md", content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_block() {
        let (fm, body) = parse("empty.en.md", "---\n---\nBody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_invalid_yaml_names_document() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let err = parse("broken.en.md", content).unwrap_err();
        match err {
            ContentError::Parse { document, .. } => assert_eq!(document, "broken.en.md"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unclosed_fence_is_error() {
        let err = parse("open.en.md", "---\ntitle: Open\n\nBody").unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
    }

    #[test]
    fn test_scalar_frontmatter_is_error() {
        let err = parse("scalar.en.md", "---\njust a sentence\n---\nBody").unwrap_err();
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn test_crlf_fences() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let (fm, body) = parse("crlf.en.md", content).unwrap();
        assert_eq!(fm.get("title"), Some(&Value::from("Windows")));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_merge_defaults_keeps_existing() {
        let (mut fm, _) = parse("a.en.md", "---\nauthor: Ana\nimage:\n---\n").unwrap();
        let mut defaults = RawRecord::new();
        defaults.insert("author".into(), Value::from("Default Author"));
        defaults.insert("image".into(), Value::from("/img/cover.webp"));
        defaults.insert("authorPhotoAlt".into(), Value::from("DA"));

        merge_defaults(&mut fm, &defaults);

        assert_eq!(fm.get("author"), Some(&Value::from("Ana")));
        assert_eq!(fm.get("image"), Some(&Value::from("/img/cover.webp")));
        assert_eq!(fm.get("authorPhotoAlt"), Some(&Value::from("DA")));
    }
}
