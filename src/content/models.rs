//! Content Models - records loaded from the data bundle (used by serde).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    pub category: String,
    pub author: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Post {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.date)
    }

    /// Last modification date, falling back to the publication date.
    pub fn modified(&self) -> &str {
        self.updated.as_deref().unwrap_or(&self.date)
    }

    /// Image alt text, falling back to the title.
    pub fn alt(&self) -> &str {
        match self.alt_text.as_deref() {
            Some(alt) if !alt.is_empty() => alt,
            _ => &self.title,
        }
    }
}

/// Post category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// Post author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: String,
}

/// Static page keyed by slug in the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// The four collections shipped in the data bundle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub pages: BTreeMap<String, Page>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// Parse the date formats found in the content files.
///
/// Accepts RFC 3339 timestamps, bare `YYYY-MM-DDTHH:MM:SS` and plain
/// `YYYY-MM-DD` dates (read as midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
