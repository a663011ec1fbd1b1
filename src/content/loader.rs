//! Content loader - builds the post index from the content directory
//!
//! Nothing is cached: every call lists the directory and parses every file
//! again, so results always reflect what is on disk.

use indexmap::IndexMap;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ContentError, FrontMatter, Post, PostSummary, TagSummary};
use crate::helpers::slugify_tag;
use crate::Site;

/// Loads posts from the site's content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// All posts, newest first
    ///
    /// Hidden posts are left out unless `include_hidden` is set. Posts whose
    /// date is missing or unparseable sort after every dated post; equal dates
    /// keep file name order. Files that fail to load are logged and skipped.
    pub fn list_posts(&self, include_hidden: bool) -> Vec<PostSummary> {
        let mut posts: Vec<PostSummary> = self
            .discover()
            .into_iter()
            .filter_map(|(slug, path)| match self.load_post(&slug, &path) {
                Ok(post) => Some(post.into_summary()),
                Err(e) => {
                    tracing::warn!("Skipping post: {}", e);
                    None
                }
            })
            .filter(|post| include_hidden || !post.hidden)
            .collect();

        posts.sort_by_cached_key(|post| Reverse(post.parsed_date()));

        posts
    }

    /// Look up one post by slug, hidden or not
    ///
    /// Extensions are tried in the configured preference order and the first
    /// existing file wins. Any other file for the same slug is reported.
    pub fn get_post(&self, slug: &str) -> Result<Post, ContentError> {
        let not_found = || ContentError::NotFound {
            slug: slug.to_string(),
        };

        if !is_valid_slug(slug) {
            return Err(not_found());
        }

        let mut candidates = self
            .site
            .config
            .extensions
            .iter()
            .map(|ext| self.site.content_dir.join(format!("{}.{}", slug, ext)))
            .filter(|path| path.is_file() && self.is_content_path(path));

        let path = candidates.next().ok_or_else(not_found)?;
        for shadowed in candidates {
            tracing::warn!("{:?} shadows {:?} for slug {:?}", path, shadowed, slug);
        }

        self.load_post(slug, &path)
    }

    /// Every tag on a visible post, most used first
    ///
    /// Tags are grouped by slug. The display name is the first spelling met
    /// while walking the posts newest first, and the count is the number of
    /// posts carrying the tag. Tags that slugify to nothing are dropped.
    pub fn list_tags(&self) -> Vec<TagSummary> {
        let mut tags: IndexMap<String, TagSummary> = IndexMap::new();

        for post in self.list_posts(false) {
            let mut seen = HashSet::new();
            for tag in &post.tags {
                let slug = slugify_tag(tag);
                if slug.is_empty() {
                    tracing::debug!("Tag {:?} on {} has an empty slug", tag, post.slug);
                    continue;
                }
                if !seen.insert(slug.clone()) {
                    continue;
                }
                tags.entry(slug.clone())
                    .or_insert_with(|| TagSummary::new(tag, slug))
                    .count += 1;
            }
        }

        let mut tags: Vec<TagSummary> = tags.into_values().collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count));
        tags
    }

    /// Visible posts carrying a tag with this slug, newest first
    pub fn list_posts_by_tag(&self, tag_slug: &str) -> Vec<PostSummary> {
        self.list_posts(false)
            .into_iter()
            .filter(|post| post.has_tag(tag_slug))
            .collect()
    }

    /// The aggregated entry for one tag slug
    pub fn find_tag(&self, tag_slug: &str) -> Option<TagSummary> {
        self.list_tags().into_iter().find(|tag| tag.slug == tag_slug)
    }

    /// Slugs of every content file, hidden posts included, in file name order
    pub fn list_slugs(&self) -> Vec<String> {
        self.discover().into_keys().collect()
    }

    /// Map each slug to the file that backs it
    fn discover(&self) -> IndexMap<String, PathBuf> {
        let dir = &self.site.content_dir;
        let mut found: IndexMap<String, PathBuf> = IndexMap::new();

        if !dir.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", dir);
            return found;
        }

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read entry in {:?}: {}", dir, e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                tracing::warn!("Skipping non UTF-8 file name {:?}", entry.path());
                continue;
            };

            if !self.site.config.is_content_file(file_name) {
                continue;
            }

            let Some(slug) = self.slug_for(file_name) else {
                continue;
            };

            let path = entry.into_path();
            match found.get(&slug) {
                Some(existing) if self.extension_rank(&path) < self.extension_rank(existing) => {
                    tracing::warn!("{:?} shadows {:?} for slug {:?}", path, existing, slug);
                    found.insert(slug, path);
                }
                Some(existing) => {
                    tracing::warn!("{:?} shadows {:?} for slug {:?}", existing, path, slug);
                }
                None => {
                    found.insert(slug, path);
                }
            }
        }

        found
    }

    /// Read and parse a single post file
    fn load_post(&self, slug: &str, path: &Path) -> Result<Post, ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (frontmatter, body) =
            FrontMatter::parse(&content).map_err(|source| ContentError::Frontmatter {
                path: path.to_path_buf(),
                source,
            })?;

        if frontmatter.title.is_none() || frontmatter.date.is_none() {
            tracing::debug!("Post {} is missing a title or date", slug);
        }

        Ok(Post {
            slug: slug.to_string(),
            frontmatter,
            body: body.to_string(),
            source: path.to_path_buf(),
        })
    }

    /// File name minus its content extension
    fn slug_for(&self, file_name: &str) -> Option<String> {
        self.site
            .config
            .extensions
            .iter()
            .find_map(|ext| file_name.strip_suffix(ext.as_str())?.strip_suffix('.'))
            .filter(|slug| !slug.is_empty())
            .map(str::to_string)
    }

    /// Position of the path's extension in the preference list
    fn extension_rank(&self, path: &Path) -> usize {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.site
            .config
            .extensions
            .iter()
            .position(|e| e == ext)
            .unwrap_or(usize::MAX)
    }

    fn is_content_path(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| self.site.config.is_content_file(n))
    }
}

/// Slugs name a file directly inside the content directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    fn site_with(files: &[(&str, &str)]) -> (TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        let content_dir = dir.path().join("content/blog");
        fs::create_dir_all(&content_dir).unwrap();
        for (name, text) in files {
            fs::write(content_dir.join(name), text).unwrap();
        }
        let site = Site::new(dir.path()).unwrap();
        (dir, site)
    }

    fn plus_post(title: &str, date: &str, tags: &str, extra: &str) -> String {
        format!(
            "+++\ntitle = \"{}\"\ndate = \"{}\"\ntags = [{}]\n{}\n+++\nBody of {}\n",
            title, date, tags, extra, title
        )
    }

    fn slugs(posts: &[PostSummary]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_missing_content_dir() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let loader = site.loader();

        assert!(loader.list_posts(false).is_empty());
        assert!(loader.list_posts(true).is_empty());
        assert!(loader.list_tags().is_empty());
        assert!(loader.list_slugs().is_empty());
        assert!(loader.get_post("anything").unwrap_err().is_not_found());
    }

    #[test]
    fn test_no_content_files() {
        let (_dir, site) = site_with(&[
            ("_index.md", "+++\ntitle = \"Blog\"\n+++\n"),
            ("notes.txt", "not a post"),
        ]);
        let loader = site.loader();

        assert!(loader.list_posts(false).is_empty());
        assert!(loader.list_tags().is_empty());
        assert!(loader.get_post("_index").unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_posts_newest_first() {
        let (_dir, site) = site_with(&[
            ("old.md", &plus_post("Old", "2023-05-01", "", "")),
            ("new.mdx", &plus_post("New", "2024-03-10", "", "")),
            ("middle.md", &plus_post("Middle", "2023-11-20", "", "")),
        ]);

        let posts = site.loader().list_posts(false);
        assert_eq!(slugs(&posts), vec!["new", "middle", "old"]);
        for pair in posts.windows(2) {
            assert!(pair[0].parsed_date() >= pair[1].parsed_date());
        }
    }

    #[test]
    fn test_undated_posts_sort_last_and_ties_keep_file_order() {
        let (_dir, site) = site_with(&[
            ("b-tie.md", &plus_post("B", "2024-01-01", "", "")),
            ("a-tie.md", &plus_post("A", "2024-01-01", "", "")),
            ("undated.md", "+++\ntitle = \"No date\"\n+++\nbody\n"),
            ("newest.md", &plus_post("N", "2024-06-01", "", "")),
        ]);

        let posts = site.loader().list_posts(false);
        assert_eq!(slugs(&posts), vec!["newest", "a-tie", "b-tie", "undated"]);
        assert_eq!(posts[3].date, None);
    }

    #[test]
    fn test_hidden_posts() {
        let (_dir, site) = site_with(&[
            ("public.md", &plus_post("Public", "2024-01-01", "db", "")),
            ("secret.md", &plus_post("Secret", "2024-02-01", "draft", "hidden = true")),
        ]);
        let loader = site.loader();

        assert_eq!(slugs(&loader.list_posts(false)), vec!["public"]);
        assert_eq!(slugs(&loader.list_posts(true)), vec!["secret", "public"]);

        let secret = loader.get_post("secret").unwrap();
        assert!(secret.frontmatter.hidden);

        // Hidden posts contribute no tags
        let tags = loader.list_tags();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].slug, "db");
        assert!(loader.list_posts_by_tag("draft").is_empty());

        assert_eq!(loader.list_slugs(), vec!["public", "secret"]);
    }

    #[test]
    fn test_get_post_round_trip() {
        let text = "+++\ntitle = \"Test\"\ndate = \"2024-01-01\"\ntags = [a, b]\n+++\n# Hello\n\nSome *markdown*.\n";
        let (_dir, site) = site_with(&[("test.md", text)]);

        let post = site.loader().get_post("test").unwrap();
        assert_eq!(post.slug, "test");
        assert_eq!(
            post.frontmatter,
            FrontMatter {
                title: Some("Test".to_string()),
                date: Some("2024-01-01".to_string()),
                tags: vec!["a".to_string(), "b".to_string()],
                description: None,
                hidden: false,
            }
        );
        assert_eq!(post.body, "# Hello\n\nSome *markdown*.\n");
        assert!(post.source.ends_with("test.md"));
    }

    #[test]
    fn test_get_post_not_found() {
        let (_dir, site) = site_with(&[("real.md", &plus_post("Real", "2024-01-01", "", ""))]);
        let loader = site.loader();

        let err = loader.get_post("nonexistent").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Post not found: nonexistent");

        assert!(loader.get_post("").unwrap_err().is_not_found());
        assert!(loader.get_post("../real").unwrap_err().is_not_found());
        assert!(loader.get_post("real.md").unwrap_err().is_not_found());
    }

    #[test]
    fn test_mdx_preferred_over_md() {
        let (_dir, site) = site_with(&[
            ("dup.md", &plus_post("From md", "2024-01-01", "", "")),
            ("dup.mdx", &plus_post("From mdx", "2024-01-01", "", "")),
        ]);
        let loader = site.loader();

        let post = loader.get_post("dup").unwrap();
        assert_eq!(post.frontmatter.title.as_deref(), Some("From mdx"));

        let posts = loader.list_posts(false);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title.as_deref(), Some("From mdx"));
    }

    #[test]
    fn test_extension_preference_is_configurable() {
        let dir = tempfile::tempdir().unwrap();
        let content_dir = dir.path().join("posts");
        fs::create_dir_all(&content_dir).unwrap();
        fs::write(content_dir.join("dup.md"), plus_post("From md", "2024-01-01", "", "")).unwrap();
        fs::write(content_dir.join("dup.mdx"), plus_post("From mdx", "2024-01-01", "", "")).unwrap();

        let config = SiteConfig {
            content_dir: "posts".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string()],
            ..SiteConfig::default()
        };
        let site = Site::with_config(dir.path(), config);

        let post = site.loader().get_post("dup").unwrap();
        assert_eq!(post.frontmatter.title.as_deref(), Some("From md"));
        assert_eq!(site.loader().list_posts(false)[0].title.as_deref(), Some("From md"));
    }

    #[test]
    fn test_tags_merge_by_slug() {
        let (_dir, site) = site_with(&[
            ("first.md", &plus_post("First", "2024-02-01", "Go", "")),
            (
                "second.md",
                "---\ntitle: Second\ndate: 2024-01-01\ntags: [\"go \", Databases]\n---\nbody\n",
            ),
        ]);

        let tags = site.loader().list_tags();
        assert_eq!(
            tags,
            vec![
                TagSummary {
                    name: "Go".to_string(),
                    slug: "go".to_string(),
                    count: 2,
                },
                TagSummary {
                    name: "Databases".to_string(),
                    slug: "databases".to_string(),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_tag_counted_once_per_post() {
        let (_dir, site) = site_with(&[(
            "repeat.md",
            &plus_post("Repeat", "2024-01-01", "Rust, rust, RUST", ""),
        )]);

        let tags = site.loader().list_tags();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "Rust");
        assert_eq!(tags[0].count, 1);
    }

    #[test]
    fn test_tags_ordered_by_count() {
        let (_dir, site) = site_with(&[
            ("a.md", &plus_post("A", "2024-03-01", "rare, common", "")),
            ("b.md", &plus_post("B", "2024-02-01", "common, mid", "")),
            ("c.md", &plus_post("C", "2024-01-01", "common, mid", "")),
        ]);

        let tags = site.loader().list_tags();
        let order: Vec<(&str, usize)> = tags.iter().map(|t| (t.slug.as_str(), t.count)).collect();
        assert_eq!(order, vec![("common", 3), ("mid", 2), ("rare", 1)]);
    }

    #[test]
    fn test_list_posts_by_tag_and_find_tag() {
        let (_dir, site) = site_with(&[
            ("wal.md", &plus_post("WAL", "2024-01-01", "Write Ahead Log, Databases", "")),
            ("aries.md", &plus_post("ARIES", "2024-02-01", "databases", "")),
            ("life.md", &plus_post("Life", "2024-03-01", "personal", "")),
        ]);
        let loader = site.loader();

        assert_eq!(slugs(&loader.list_posts_by_tag("databases")), vec!["aries", "wal"]);
        assert_eq!(slugs(&loader.list_posts_by_tag("write-ahead-log")), vec!["wal"]);
        assert!(loader.list_posts_by_tag("Databases").is_empty());

        let tag = loader.find_tag("databases").unwrap();
        assert_eq!(tag.name, "databases");
        assert_eq!(tag.count, 2);
        assert!(loader.find_tag("missing").is_none());
    }

    #[test]
    fn test_bad_yaml_skipped_in_listing() {
        let (_dir, site) = site_with(&[
            ("broken.md", "---\ntitle: [oops\n---\nbody\n"),
            ("fine.md", &plus_post("Fine", "2024-01-01", "", "")),
        ]);
        let loader = site.loader();

        assert_eq!(slugs(&loader.list_posts(false)), vec!["fine"]);
        assert!(matches!(
            loader.get_post("broken"),
            Err(ContentError::Frontmatter { .. })
        ));
    }

    #[test]
    fn test_yaml_quoted_hidden_and_numeric_tags() {
        let (_dir, site) = site_with(&[
            (
                "draft.md",
                "---\ntitle: Draft\ndate: 2024-03-01\nhidden: \"true\"\n---\nbody\n",
            ),
            (
                "yearly.md",
                "---\ntitle: Yearly\ndate: 2024-01-01\ntags: 2024\n---\nbody\n",
            ),
        ]);
        let loader = site.loader();

        assert_eq!(slugs(&loader.list_posts(false)), vec!["yearly"]);
        assert_eq!(slugs(&loader.list_posts(true)), vec!["draft", "yearly"]);

        let draft = loader.get_post("draft").unwrap();
        assert!(draft.frontmatter.hidden);

        let yearly = loader.get_post("yearly").unwrap();
        assert_eq!(yearly.frontmatter.tags, vec!["2024"]);
        assert_eq!(slugs(&loader.list_posts_by_tag("2024")), vec!["yearly"]);
    }

    #[test]
    fn test_missing_title_is_not_defaulted() {
        let (_dir, site) = site_with(&[("bare.md", "No front-matter at all.\n")]);

        let post = site.loader().get_post("bare").unwrap();
        assert_eq!(post.frontmatter.title, None);
        assert_eq!(post.frontmatter.date, None);
        assert_eq!(post.body, "No front-matter at all.\n");
    }

    #[test]
    fn test_subdirectories_ignored() {
        let (dir, site) = site_with(&[("top.md", &plus_post("Top", "2024-01-01", "", ""))]);
        let nested = dir.path().join("content/blog/nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("deep.md"), plus_post("Deep", "2024-01-01", "", "")).unwrap();

        assert_eq!(site.loader().list_slugs(), vec!["top"]);
    }

    #[test]
    fn test_reflects_disk_changes() {
        let (dir, site) = site_with(&[]);
        let loader = site.loader();
        assert!(loader.list_posts(false).is_empty());

        fs::write(
            dir.path().join("content/blog/later.md"),
            plus_post("Later", "2024-01-01", "", ""),
        )
        .unwrap();
        assert_eq!(slugs(&loader.list_posts(false)), vec!["later"]);
    }
}
