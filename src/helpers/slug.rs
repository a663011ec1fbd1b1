//! Tag slugs

/// Normalize a raw tag into its URL slug.
///
/// Lowercases, turns each whitespace run into a single `-`, drops every
/// character outside `[a-z0-9-]`, then collapses repeated hyphens and trims
/// them from both ends. Applying it twice gives the same result as once.
///
/// # Examples
/// ```
/// use folio::helpers::slugify_tag;
///
/// assert_eq!(slugify_tag("Hello World!"), "hello-world");
/// assert_eq!(slugify_tag("C++ & Go"), "c-go");
/// ```
pub fn slugify_tag(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_hyphen = false;

    for c in raw.trim().to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        }
    }

    slug
}
