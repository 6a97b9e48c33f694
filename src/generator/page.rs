use std::fmt::Write as _;

use chrono::NaiveDate;
use log::debug;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex, RegexBuilder};

use super::data::{page_file_name, RenderedPost, Source};
use super::markdown::{extract_sources, markdown_to_html, strip_sources};
use crate::metadata::parse_frontmatter;

const DATE_PLACEHOLDERS: [&str; 2] = ["[MONTH DAY, YEAR]", "[DATE]"];
const TEMPLATE_SELF_REFERENCE: &str = "weekly-bites-template.html";
const ISO_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%B %d, %Y";
const EXCERPT_CHARS: usize = 150;

static STORY_BLOCK: Lazy<Regex> = Lazy::new(|| dotall(r#"<div class="story">.*?</div>"#));
static SOURCES_LIST: Lazy<Regex> = Lazy::new(|| dotall(r"<ul>.*?</ul>"));
static USAGE_COMMENT: Lazy<Regex> = Lazy::new(|| dotall(r"<!--\s*USAGE INSTRUCTIONS:.*?-->"));

fn dotall(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .dot_matches_new_line(true)
        .build()
        .unwrap_or_else(|e| panic!("invalid pattern {pattern:?}: {e}"))
}

/// Display date and file-name date for a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostDate {
    pub formatted: String,
    pub file_date: String,
}

/// Resolves the `date` frontmatter value, falling back to `today`.
///
/// An unparsable value is still shown as-is; only the file name falls back.
pub(crate) fn resolve_date(date: Option<&str>, today: NaiveDate) -> PostDate {
    match date {
        Some(raw) => match NaiveDate::parse_from_str(raw, ISO_FORMAT) {
            Ok(parsed) => PostDate {
                formatted: parsed.format(DISPLAY_FORMAT).to_string(),
                file_date: raw.to_string(),
            },
            Err(e) => {
                debug!("date {raw:?} is not {ISO_FORMAT}: {e}");
                PostDate {
                    formatted: raw.to_string(),
                    file_date: today.format(ISO_FORMAT).to_string(),
                }
            }
        },
        None => PostDate {
            formatted: today.format(DISPLAY_FORMAT).to_string(),
            file_date: today.format(ISO_FORMAT).to_string(),
        },
    }
}

fn render_story(body_html: &str) -> String {
    format!("<div class=\"story\">\n{body_html}\n        </div>")
}

fn render_sources(sources: &[Source]) -> String {
    let mut res = String::from("<ul>\n");
    for source in sources {
        let _ = writeln!(
            res,
            "                <li>→ <a href=\"{}\" target=\"_blank\">{}</a></li>",
            source.url, source.title
        );
    }
    res.push_str("            </ul>");
    res
}

/// Fills `template` with a post's markdown `content`.
pub(crate) fn generate_page(content: &str, template: &str, today: NaiveDate) -> RenderedPost {
    let (frontmatter, body) = parse_frontmatter(content);
    debug!("title: {}", frontmatter.title());

    let date = resolve_date(frontmatter.date(), today);
    let sources = extract_sources(&body);
    let body = strip_sources(&body);
    let body_html = markdown_to_html(&body);

    let mut html = template.to_string();
    for placeholder in DATE_PLACEHOLDERS {
        html = html.replace(placeholder, &date.formatted);
    }

    html = STORY_BLOCK
        .replace(&html, NoExpand(&render_story(&body_html)))
        .into_owned();

    // an empty list leaves whatever sample list the template ships with
    if !sources.is_empty() {
        html = SOURCES_LIST
            .replace(&html, NoExpand(&render_sources(&sources)))
            .into_owned();
    }

    html = html.replace(TEMPLATE_SELF_REFERENCE, &page_file_name(&date.file_date));
    html = USAGE_COMMENT.replace_all(&html, "").into_owned();

    RenderedPost {
        html,
        file_date: date.file_date,
        formatted_date: date.formatted,
        excerpt: body.chars().take(EXCERPT_CHARS).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r##"<html>
<head>
    <meta property="og:url" content="https://example.com/weekly-bites-template.html">
    <title>Weekly Bites - [MONTH DAY, YEAR]</title>
</head>
<body>
    <!-- USAGE INSTRUCTIONS:
         copy this file and fill in the story.
    -->
    <div class="date">[DATE]</div>
        <div class="story">
            <p>Sample story.</p>
        </div>
        <div class="sources">
            <ul>
                <li>→ <a href="#">Sample source</a></li>
            </ul>
        </div>
</body>
</html>
"##;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn valid_date_is_formatted_and_kept_for_file_name() {
        let date = resolve_date(Some("2024-01-05"), today());
        assert_eq!(date.formatted, "January 05, 2024");
        assert_eq!(date.file_date, "2024-01-05");
    }

    #[test]
    fn invalid_date_is_shown_raw() {
        let date = resolve_date(Some("spring 2024"), today());
        assert_eq!(date.formatted, "spring 2024");
        assert_eq!(date.file_date, "2026-10-18");
    }

    #[test]
    fn missing_date_uses_today() {
        let date = resolve_date(None, today());
        assert_eq!(date.formatted, "October 18, 2026");
        assert_eq!(date.file_date, "2026-10-18");
    }

    #[test]
    fn fills_template() {
        let post = "---\ndate: 2024-02-01\ntitle: Cob Walls\n---\n**Hi** there.\n\n## Sources\n- [A](http://a)\n- [B](http://b)\n";
        let page = generate_page(post, TEMPLATE, today());

        assert_eq!(page.file_date, "2024-02-01");
        assert_eq!(page.formatted_date, "February 01, 2024");
        assert_eq!(page.file_name(), "weekly-bites-2024-02-01.html");
        assert_eq!(page.excerpt, "**Hi** there.");

        let html = &page.html;
        assert!(html.contains("<title>Weekly Bites - February 01, 2024</title>"));
        assert!(html.contains(r#"<div class="date">February 01, 2024</div>"#));
        assert!(html.contains(
            "<div class=\"story\">\n            <p><strong>Hi</strong> there.</p>\n        </div>"
        ));
        assert!(html.contains(concat!(
            "<ul>\n",
            "                <li>→ <a href=\"http://a\" target=\"_blank\">A</a></li>\n",
            "                <li>→ <a href=\"http://b\" target=\"_blank\">B</a></li>\n",
            "            </ul>",
        )));
        assert!(html.contains("https://example.com/weekly-bites-2024-02-01.html"));
        assert!(!html.contains("Sample story"));
        assert!(!html.contains("Sample source"));
        assert!(!html.contains("USAGE INSTRUCTIONS"));
        assert!(!html.contains("Sources</"));
    }

    #[test]
    fn sample_sources_survive_when_post_has_none() {
        let page = generate_page("---\ndate: 2024-02-01\n---\nNo sources.", TEMPLATE, today());
        assert!(page.html.contains(r##"<li>→ <a href="#">Sample source</a></li>"##));
    }

    #[test]
    fn dollar_signs_are_literal() {
        let page = generate_page("It cost $1 and ${2}.", TEMPLATE, today());
        assert!(page.html.contains("<p>It cost $1 and ${2}.</p>"));
    }

    #[test]
    fn excerpt_counts_characters() {
        let body = "é".repeat(200);
        let page = generate_page(&body, TEMPLATE, today());
        assert_eq!(page.excerpt.chars().count(), 150);
    }

    #[test]
    fn same_input_same_output() {
        let post = "---\ndate: 2024-02-01\n---\n*Same* every time.";
        let a = generate_page(post, TEMPLATE, today());
        let b = generate_page(post, TEMPLATE, today());
        assert_eq!(a.html, b.html);
    }
}
