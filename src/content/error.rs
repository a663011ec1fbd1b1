//! Content loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while parsing a frontmatter block
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors returned by the content loader
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Post not found: {slug}")]
    NotFound { slug: String },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid frontmatter in {path:?}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
}

impl ContentError {
    /// True for the "no such post" case that pages turn into a 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
