//! Post and tag models

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use super::FrontMatter;
use crate::helpers::{parse_date, slugify_tag};

/// A blog post: front-matter plus the raw body that follows it
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// File name without its extension
    pub slug: String,

    pub frontmatter: FrontMatter,

    /// Raw body after the front-matter block, unrendered
    pub body: String,

    /// Full source file path
    pub source: PathBuf,
}

impl Post {
    /// Listing view of this post, dropping the body
    pub fn into_summary(self) -> PostSummary {
        PostSummary {
            slug: self.slug,
            title: self.frontmatter.title,
            date: self.frontmatter.date,
            tags: self.frontmatter.tags,
            description: self.frontmatter.description,
            hidden: self.frontmatter.hidden,
        }
    }
}

/// Post metadata without the body, as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub hidden: bool,
}

impl PostSummary {
    /// The date parsed for ordering; `None` when missing or unrecognized
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_date)
    }

    /// Whether any of this post's tags slugifies to `tag_slug`
    pub fn has_tag(&self, tag_slug: &str) -> bool {
        self.tags.iter().any(|t| slugify_tag(t) == tag_slug)
    }

    /// Title for display, falling back to the slug
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.slug)
    }
}

/// A tag aggregated over the visible posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    /// First raw spelling seen for this slug
    pub name: String,
    pub slug: String,
    /// Number of posts carrying the tag
    pub count: usize,
}

impl TagSummary {
    pub fn new(name: &str, slug: String) -> Self {
        Self {
            name: name.to_string(),
            slug,
            count: 0,
        }
    }
}
