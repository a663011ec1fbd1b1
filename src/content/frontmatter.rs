//! Front-matter parsing
//!
//! Two dialects are recognized, chosen by the opening delimiter:
//!
//! * `+++` blocks holding line-oriented `key = value` pairs, plus the
//!   `tags = [a, b]` and `taxonomies = { tags = [a, b] }` list forms. This is
//!   not full TOML: list items may be bare words.
//! * `---` blocks holding YAML, parsed with `serde_yaml`.
//!
//! Both produce the same closed [`FrontMatter`] record. Keys outside that
//! record are ignored.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::FrontmatterError;

lazy_static! {
    static ref PLUS_BLOCK: Regex =
        Regex::new(r"^\+\+\+\s*\n([\s\S]*?)\n\+\+\+\s*\n([\s\S]*)$").expect("valid regex");
    static ref TAXONOMY_TAGS: Regex =
        Regex::new(r"^taxonomies\s*=\s*\{\s*tags\s*=\s*\[(.*)\]\s*\}$").expect("valid regex");
    static ref TAGS_LIST: Regex = Regex::new(r"^tags\s*=\s*\[(.*)\]$").expect("valid regex");
    static ref KEY_VALUE: Regex =
        Regex::new(r"^([A-Za-z0-9_]+)\s*=\s*(.+)$").expect("valid regex");
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<serde_yaml::Value>()? {
                match yaml_scalar_string(&item) {
                    Some(tag) => vec.push(tag),
                    None => tracing::warn!("Ignoring non-scalar tag: {:?}", item),
                }
            }
            Ok(vec)
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            tracing::warn!("Ignoring mapping given as tags");
            Ok(Vec::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Accepts a YAML boolean or the strings `"true"`/`"false"`; anything else
/// leaves the post visible
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_yaml::Value::Bool(b) => b,
        serde_yaml::Value::String(s) if s == "true" => true,
        serde_yaml::Value::String(s) if s == "false" => false,
        serde_yaml::Value::Null => false,
        other => {
            tracing::warn!("Ignoring non-boolean hidden value: {:?}", other);
            false
        }
    })
}

/// Text of a scalar YAML value, `None` for null and collections
fn yaml_scalar_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Metadata block at the top of a post
///
/// `title` and `date` are required by convention but never defaulted: a file
/// that omits them yields `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub hidden: bool,
}

/// A scalar value from a `+++` block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar<'a> {
    Bool(bool),
    Str(&'a str),
}

impl Scalar<'_> {
    fn into_string(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Str(s) => s.to_string(),
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontmatterError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        if let Some((fm, body)) = Self::parse_plus(content) {
            return Ok((fm, body));
        }

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        if content.starts_with("+++") {
            tracing::warn!("Unterminated +++ front-matter, treating file as body");
        }

        Ok((FrontMatter::default(), content))
    }

    /// `+++` dialect. `None` when the text is not a complete `+++` block.
    fn parse_plus(content: &str) -> Option<(Self, &str)> {
        let caps = PLUS_BLOCK.captures(content)?;
        let block = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        let mut fm = FrontMatter::default();

        for (index, line) in block.split('\n').enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(caps) = TAXONOMY_TAGS.captures(line) {
                fm.tags = parse_list(&caps[1]);
                continue;
            }

            if let Some(caps) = TAGS_LIST.captures(line) {
                fm.tags = parse_list(&caps[1]);
                continue;
            }

            if let Some(caps) = KEY_VALUE.captures(line) {
                let value = parse_scalar(caps.get(2).map_or("", |m| m.as_str()).trim());
                fm.apply(&caps[1], value);
                continue;
            }

            tracing::warn!(
                "Skipping unrecognized front-matter line {}: {:?}",
                index + 2,
                line
            );
        }

        Some((fm, body))
    }

    /// Assign one `key = value` pair from a `+++` block
    fn apply(&mut self, key: &str, value: Scalar<'_>) {
        match key {
            "title" => self.title = Some(value.into_string()),
            "date" => self.date = Some(value.into_string()),
            "description" => self.description = Some(value.into_string()),
            "tags" => match value {
                Scalar::Str(s) if !s.is_empty() => self.tags = vec![s.to_string()],
                _ => tracing::warn!("Ignoring non-list tags value: {:?}", value),
            },
            "hidden" => match value {
                Scalar::Bool(b) => self.hidden = b,
                Scalar::Str("true") => self.hidden = true,
                Scalar::Str("false") => self.hidden = false,
                Scalar::Str(other) => {
                    tracing::warn!("Ignoring non-boolean hidden value: {:?}", other)
                }
            },
            _ => tracing::trace!("Ignoring unknown front-matter key: {}", key),
        }
    }

    /// `---` dialect, parsed as YAML
    fn parse_yaml(content: &str) -> Result<(Self, &str), FrontmatterError> {
        // `----` and longer rules are not an opening delimiter
        if content[3..].starts_with('-') {
            return Ok((FrontMatter::default(), content));
        }

        // The opening line may carry a language tag (`---yaml`)
        let rest = match content.find('\n') {
            Some(pos) => &content[pos + 1..],
            None => "",
        };

        let (yaml_content, remaining) = if rest.starts_with("---") {
            (&rest[..0], &rest[3..])
        } else if let Some(end_pos) = rest.find("\n---") {
            (&rest[..end_pos], &rest[end_pos + 4..])
        } else {
            tracing::warn!("Unterminated --- front-matter, treating file as body");
            return Ok((FrontMatter::default(), content));
        };

        let remaining = remaining.strip_prefix('\r').unwrap_or(remaining);
        let remaining = remaining.strip_prefix('\n').unwrap_or(remaining);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)?;
        Ok((fm, remaining))
    }
}

/// Split the inside of `[a, "b", 'c']` into items
fn parse_list(inner: &str) -> Vec<String> {
    inner
        .split(',')
        .map(|item| {
            let item = item.trim();
            let item = item.strip_prefix(['"', '\'']).unwrap_or(item);
            item.strip_suffix(['"', '\'']).unwrap_or(item)
        })
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Bare `true`/`false` become booleans, anything else a string with one pair
/// of matching quotes removed
fn parse_scalar(raw: &str) -> Scalar<'_> {
    match raw {
        "true" => return Scalar::Bool(true),
        "false" => return Scalar::Bool(false),
        _ => {}
    }

    for quote in ['"', '\''] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return Scalar::Str(&raw[1..raw.len() - 1]);
        }
    }

    Scalar::Str(raw)
}
