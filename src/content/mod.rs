//! Content module - front-matter parsing and the post index

mod error;
mod frontmatter;
pub mod loader;
mod post;

pub use error::{ContentError, FrontmatterError};
pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use post::{Post, PostSummary, TagSummary};
