//! Show the posts under one tag

use anyhow::Result;

use super::list::format_post_line;
use crate::helpers::tag_path;
use crate::Site;

/// List visible posts carrying `tag_slug`
pub fn run(site: &Site, tag_slug: &str, json: bool) -> Result<()> {
    let loader = site.loader();
    let posts = loader.list_posts_by_tag(tag_slug);

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    let display_name = loader
        .find_tag(tag_slug)
        .map(|tag| tag.name)
        .unwrap_or_else(|| tag_slug.to_string());

    println!(
        "Posts tagged with {:?} ({}) at {}:",
        display_name,
        posts.len(),
        tag_path(&site.config, tag_slug)
    );
    for post in &posts {
        println!("  {}", format_post_line(post));
    }

    Ok(())
}
