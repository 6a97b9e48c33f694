use once_cell::sync::Lazy;
use regex::Regex;

use super::data::Source;

// order matters: bold has to consume `**` before italic sees single `*`
static INLINE_RULES: Lazy<[(Regex, &'static str); 5]> = Lazy::new(|| {
    [
        (rule(r"\*\*(.+?)\*\*"), "<strong>${1}</strong>"),
        (rule(r"__(.+?)__"), "<strong>${1}</strong>"),
        (rule(r"\*(.+?)\*"), "<em>${1}</em>"),
        (rule(r"_(.+?)_"), "<em>${1}</em>"),
        (
            rule(r"\[(.+?)\]\((.+?)\)"),
            r#"<a href="${2}" target="_blank">${1}</a>"#,
        ),
    ]
});

static SOURCES_HEADING: Lazy<Regex> = Lazy::new(|| rule(r"##\s+(?:This Week's )?Sources"));
static SOURCE_ITEM: Lazy<Regex> = Lazy::new(|| rule(r"^[-*]\s+\[(.+?)\]\((.+?)\)"));

const SOURCES_MARKERS: [&str; 2] = ["## Sources", "## This Week's Sources"];
const PARAGRAPH_INDENT: &str = "            ";

fn rule(pattern: &str) -> Regex {
    // patterns are literals
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pattern {pattern:?}: {e}"))
}

/// Renders bold, italic and links, then wraps each blank-line separated
/// block in an indented `<p>`.
pub(crate) fn markdown_to_html(markdown: &str) -> String {
    let mut html = markdown.to_string();
    for (pattern, replacement) in INLINE_RULES.iter() {
        html = pattern.replace_all(&html, *replacement).into_owned();
    }

    html.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("{PARAGRAPH_INDENT}<p>{p}</p>"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Collects the bullet links under a `## Sources` heading, in order.
pub(crate) fn extract_sources(markdown: &str) -> Vec<Source> {
    if !SOURCES_MARKERS.iter().any(|m| markdown.contains(m)) {
        return vec![];
    }

    let Some(section) = SOURCES_HEADING.split(markdown).nth(1) else {
        return vec![];
    };

    section
        .trim()
        .split('\n')
        .filter_map(|line| SOURCE_ITEM.captures(line.trim()))
        .map(|caps| Source {
            title: caps[1].to_string(),
            url: caps[2].to_string(),
        })
        .collect()
}

/// Body text preceding the Sources heading, trimmed.
pub(crate) fn strip_sources(markdown: &str) -> String {
    SOURCES_HEADING
        .split(markdown)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
