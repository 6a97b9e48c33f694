use std::collections::HashMap;

const DELIMITER: &str = "---";
const DEFAULT_TITLE: &str = "Weekly Bites";

/// `key: value` pairs from the `---` block at the top of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Frontmatter {
    fields: HashMap<String, String>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// `date` value, if present and non-empty.
    pub fn date(&self) -> Option<&str> {
        self.get("date").filter(|d| !d.is_empty())
    }

    pub fn title(&self) -> &str {
        self.get("title").unwrap_or(DEFAULT_TITLE)
    }
}

/// Splits `content` into frontmatter and body.
///
/// Never fails: anything that does not look like a delimited header block
/// leaves the whole input as body and an empty mapping.
pub(crate) fn parse_frontmatter(content: &str) -> (Frontmatter, String) {
    let mut frontmatter = Frontmatter::default();

    if !content.starts_with(DELIMITER) {
        return (frontmatter, content.to_string());
    }

    let parts: Vec<&str> = content.splitn(3, DELIMITER).collect();
    if parts.len() < 3 {
        return (frontmatter, content.to_string());
    }

    for line in parts[1].trim().split('\n') {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
        frontmatter
            .fields
            .insert(key.trim().to_string(), value.to_string());
    }

    (frontmatter, parts[2].trim().to_string())
}
