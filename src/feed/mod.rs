//! RSS feed generation

use anyhow::Result;
use chrono::{DateTime, Utc};
use rss::extension::atom::{AtomExtension, Link};
use rss::{Category, Channel, Guid, Item};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::content::PostSummary;
use crate::helpers::{date_rfc2822, full_url_for, post_url};
use crate::Site;

/// Build the RSS channel for a list of posts, in the order given
pub fn build_channel(config: &SiteConfig, posts: &[PostSummary], now: DateTime<Utc>) -> Channel {
    let mut channel = Channel::default();
    channel.set_title(config.title.clone());
    channel.set_link(full_url_for(config, ""));
    channel.set_description(config.description.clone());
    channel.set_language(Some(config.language.clone()));
    channel.set_last_build_date(Some(date_rfc2822(&now)));
    channel.set_generator(Some(format!("folio {}", env!("CARGO_PKG_VERSION"))));
    channel.set_atom_ext(self_link(config));

    let items: Vec<Item> = posts.iter().map(|post| build_item(config, post)).collect();
    channel.set_items(items);
    channel
}

fn build_item(config: &SiteConfig, post: &PostSummary) -> Item {
    let url = post_url(config, &post.slug);

    let mut item = Item::default();
    item.set_title(Some(post.display_title().to_string()));
    item.set_description(Some(post.description.clone().unwrap_or_default()));
    item.set_link(Some(url.clone()));
    item.set_guid(Some(Guid {
        value: url,
        permalink: true,
    }));

    match post.parsed_date() {
        Some(date) => item.set_pub_date(Some(date_rfc2822(&date))),
        None => tracing::warn!("Post {} has no usable date, omitting pubDate", post.slug),
    }

    let categories: Vec<Category> = post
        .tags
        .iter()
        .map(|tag| {
            let mut category = Category::default();
            category.set_name(tag.clone());
            category
        })
        .collect();
    item.set_categories(categories);

    item
}

/// `<atom:link rel="self">` pointing at the feed's own URL
fn self_link(config: &SiteConfig) -> AtomExtension {
    let mut link = Link::default();
    link.set_href(full_url_for(config, &config.feed_path));
    link.set_rel("self");
    link.set_mime_type(Some("application/rss+xml".to_string()));

    let mut ext = AtomExtension::default();
    ext.set_links(vec![link]);
    ext
}

/// Render the feed for the site's visible posts
pub fn render(site: &Site) -> String {
    let posts = site.loader().list_posts(false);
    build_channel(&site.config, &posts, Utc::now()).to_string()
}

/// Write the feed to `output`, or to `feed_path` under the base directory
pub fn write(site: &Site, output: Option<&Path>) -> Result<PathBuf> {
    let path = match output {
        Some(p) => p.to_path_buf(),
        None => site.base_dir.join(&site.config.feed_path),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&path, render(site))?;
    tracing::info!("Generated {:?}", path);

    Ok(path)
}
