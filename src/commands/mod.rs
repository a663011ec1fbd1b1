//! CLI commands, one module per page the blog renders

pub mod feed;
pub mod list;
pub mod show;
pub mod tag;
