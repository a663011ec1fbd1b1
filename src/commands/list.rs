//! List site content

use anyhow::Result;

use crate::config::SiteConfig;
use crate::content::{PostSummary, TagSummary};
use crate::helpers::{display_date, tag_path};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str, include_hidden: bool, json: bool) -> Result<()> {
    let loader = site.loader();

    match content_type {
        "post" | "posts" => {
            let posts = loader.list_posts(include_hidden);
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
                return Ok(());
            }
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!("  {}", format_post_line(post));
            }
        }
        "tag" | "tags" => {
            let tags = loader.list_tags();
            if json {
                println!("{}", serde_json::to_string_pretty(&tags)?);
                return Ok(());
            }
            println!("Tags ({}):", tags.len());
            for tag in &tags {
                println!("  {}", format_tag_line(&site.config, tag));
            }
        }
        "slug" | "slugs" => {
            for slug in loader.list_slugs() {
                println!("{}", slug);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, slug",
                content_type
            );
        }
    }

    Ok(())
}

/// One listing row: date, title, slug and a hidden marker
pub fn format_post_line(post: &PostSummary) -> String {
    let date = post
        .date
        .as_deref()
        .map(display_date)
        .unwrap_or_else(|| "(no date)".to_string());
    let mut line = format!("{} - {} [{}]", date, post.display_title(), post.slug);
    if post.hidden {
        line.push_str(" (hidden)");
    }
    line
}

/// One tag row: `name (count) -> /tags/slug/`
pub fn format_tag_line(config: &SiteConfig, tag: &TagSummary) -> String {
    format!("{} ({}) -> {}", tag.name, tag.count, tag_path(config, &tag.slug))
}
