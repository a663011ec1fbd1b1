//! Show a single post

use anyhow::Result;

use crate::content::Post;
use crate::helpers::display_date;
use crate::Site;

/// Print one post, front-matter first, then the raw body
pub fn run(site: &Site, slug: &str, json: bool) -> Result<()> {
    let post = match site.loader().get_post(slug) {
        Ok(post) => post,
        Err(e) if e.is_not_found() => anyhow::bail!("404: no post named {:?}", slug),
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        print!("{}", render_post(&post));
    }

    Ok(())
}

/// Plain-text rendering of a post
pub fn render_post(post: &Post) -> String {
    let fm = &post.frontmatter;
    let mut out = String::new();

    out.push_str(fm.title.as_deref().unwrap_or(&post.slug));
    out.push('\n');
    if let Some(date) = &fm.date {
        out.push_str(&display_date(date));
        out.push('\n');
    }
    if !fm.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", fm.tags.join(", ")));
    }
    if let Some(description) = &fm.description {
        out.push_str(description);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&post.body);
    out
}
