//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub blog_dir: String,
    pub tag_dir: String,

    // Content
    pub content_dir: String,
    /// Content file extensions, in lookup preference order
    pub extensions: Vec<String>,
    /// File names inside the content directory that are never posts
    pub exclude: Vec<String>,

    // Feed
    pub feed_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            blog_dir: "blog".to_string(),
            tag_dir: "tags".to_string(),

            content_dir: "content/blog".to_string(),
            extensions: vec!["mdx".to_string(), "md".to_string()],
            exclude: vec!["_index.md".to_string()],

            feed_path: "rss.xml".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;

        // An empty file is a valid "all defaults" config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Whether a file name belongs to the content set
    pub fn is_content_file(&self, file_name: &str) -> bool {
        if self.exclude.iter().any(|e| e == file_name) {
            return false;
        }
        self.extensions
            .iter()
            .any(|ext| file_name.strip_suffix(ext.as_str()).is_some_and(|s| s.ends_with('.')))
    }
}
