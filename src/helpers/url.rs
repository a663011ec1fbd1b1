//! URL helper functions

use crate::config::SiteConfig;

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog/") // -> "https://example.com/blog/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Site-relative path of a post page, with trailing slash
pub fn post_path(config: &SiteConfig, slug: &str) -> String {
    format!("/{}/{}/", config.blog_dir.trim_matches('/'), slug)
}

/// Site-relative path of a tag page, with trailing slash
pub fn tag_path(config: &SiteConfig, tag_slug: &str) -> String {
    format!("/{}/{}/", config.tag_dir.trim_matches('/'), tag_slug)
}

/// Absolute URL of a post page
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    full_url_for(config, &post_path(config, slug))
}
