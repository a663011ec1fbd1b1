//! Helper functions shared by the loader, the feed and the CLI

mod date;
mod slug;
mod url;

pub use date::*;
pub use slug::*;
pub use url::*;
