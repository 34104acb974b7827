//! Front-matter parsing

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> std::result::Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Raw front-matter block of a markdown file, kept as JSON so every key
/// survives on the `Mdx` node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub data: serde_json::Map<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse<'a>(content: &'a str, path: &str) -> Result<(Self, &'a str)> {
        let trimmed = content.trim_start();
        if !trimmed.starts_with("---") {
            return Ok((FrontMatter::default(), content));
        }

        let rest = trimmed[3..].trim_start_matches(['\n', '\r']);
        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let value: serde_yaml::Value =
            serde_yaml::from_str(yaml_content).map_err(|e| Error::InvalidFrontMatter {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        match serde_json::to_value(value)? {
            Value::Object(data) => Ok((Self { data }, remaining)),
            other => Err(Error::InvalidFrontMatter {
                path: path.to_string(),
                message: format!("expected a mapping, found {}", other),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Deserialize into one of the typed front-matter shapes
    pub fn typed<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T> {
        serde_json::from_value(Value::Object(self.data.clone())).map_err(|e| {
            Error::InvalidFrontMatter {
                path: path.to_string(),
                message: e.to_string(),
            }
        })
    }
}

/// Kind of a blog post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    #[default]
    Prose,
    Tutorial,
}

/// Front-matter of a writing (blog) entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostFrontMatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    #[serde(deserialize_with = "date_string")]
    pub date: String,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
    #[serde(default, rename = "type")]
    pub post_type: PostType,
}

/// Front-matter of a garden note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenFrontMatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    #[serde(deserialize_with = "date_string")]
    pub date: String,
    #[serde(default, deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(default = "default_icon")]
    pub icon: String,
}

/// Posts are published unless they say otherwise
fn default_published() -> bool {
    true
}

fn default_icon() -> String {
    "general".to_string()
}

/// Dates may arrive as strings or, for bare years, as numbers
fn date_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a date, found {}",
            other
        ))),
    }
}

/// Treat an empty slug like an absent one
pub(crate) fn non_empty(slug: Option<String>) -> Option<String> {
    slug.filter(|s| !s.trim().is_empty())
}

/// Parse a date string in various formats
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, normalised to UTC
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
category: Rust
tags:
  - rust
  - garden
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content, "hello.mdx").unwrap();
        assert_eq!(fm.get("title").unwrap(), "Hello World");
        assert_eq!(fm.get("date").unwrap(), "2024-01-15");
        assert_eq!(fm.get("tags").unwrap().as_array().unwrap().len(), 2);
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just text.\n";
        let (fm, remaining) = FrontMatter::parse(content, "plain.md").unwrap();
        assert!(fm.data.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_unclosed_frontmatter_is_content() {
        let content = "---\ntitle: Open\n\nNo closing fence";
        let (fm, remaining) = FrontMatter::parse(content, "open.md").unwrap();
        assert!(fm.data.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unterminated\n---\nBody";
        let err = FrontMatter::parse(content, "broken.mdx").unwrap_err();
        assert!(matches!(err, Error::InvalidFrontMatter { .. }));
    }

    #[test]
    fn test_post_frontmatter_defaults() {
        let content = r#"---
title: A Post
date: 2021-03-04
category: Community
---
Body"#;
        let (fm, _) = FrontMatter::parse(content, "post.mdx").unwrap();
        let post: PostFrontMatter = fm.typed("post.mdx").unwrap();
        assert_eq!(post.title, "A Post");
        assert_eq!(post.category, "Community");
        assert!(post.published);
        assert_eq!(post.post_type, PostType::Prose);
        assert_eq!(post.slug, None);
    }

    #[test]
    fn test_post_frontmatter_requires_category() {
        let content = "---\ntitle: No Category\ndate: 2021-03-04\n---\n";
        let (fm, _) = FrontMatter::parse(content, "post.mdx").unwrap();
        assert!(fm.typed::<PostFrontMatter>("post.mdx").is_err());
    }

    #[test]
    fn test_garden_single_string_tag() {
        let content = r#"---
title: Note
date: 2022-01-01
tags: cli
icon: cli
type: tutorial
---
"#;
        let (fm, _) = FrontMatter::parse(content, "note.mdx").unwrap();
        let note: GardenFrontMatter = fm.typed("note.mdx").unwrap();
        assert_eq!(note.tags, vec!["cli"]);
        assert_eq!(note.icon, "cli");
    }

    #[test]
    fn test_parse_date() {
        let dt = parse_date("2024-01-15").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 00:00");
        let dt = parse_date("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "10:30");
        assert!(parse_date("2024-01-15T10:30:00+02:00").is_some());
        assert!(parse_date("not a date").is_none());
    }

    #[test]
    fn test_non_empty_slug() {
        assert_eq!(non_empty(Some("".to_string())), None);
        assert_eq!(non_empty(Some("x".to_string())), Some("x".to_string()));
    }
}
