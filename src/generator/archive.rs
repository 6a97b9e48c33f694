use std::{fmt::Write as _, path::Path};

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::data::{page_file_name, PostSummary};
use super::utils::{read_text, sort_summary};

const SUBTITLE_OPEN: &str = r#"<div class="subtitle">"#;

static ENTRY_REGION: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r#"(<div class="subtitle">.*?</div>)(.*?)(</div>\s*<div class="nav">)"#)
        .dot_matches_new_line(true)
        .build()
        .unwrap_or_else(|e| panic!("invalid entry region pattern: {e}"))
});
static NAV_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"</div>\s*<div class="nav">"#)
        .unwrap_or_else(|e| panic!("invalid nav pattern: {e}"))
});

/// Result of an archive rewrite attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArchiveUpdate {
    /// The archive was rewritten with this many entries.
    Updated(usize),
    /// The subtitle/nav anchors were missing; the file was left alone.
    AnchorNotFound,
}

fn render_entry(res: &mut String, post: &PostSummary) {
    let _ = write!(
        res,
        concat!(
            "        <div class=\"entry\">\n",
            "            <div class=\"entry-date\">{}</div>\n",
            "            <div class=\"entry-excerpt\">{}...</div>\n",
            "            <a href=\"{}\" class=\"entry-link\">Read more →</a>\n",
            "        </div>\n",
            "\n",
        ),
        post.formatted_date,
        post.excerpt.replace('\n', " "),
        page_file_name(&post.date),
    );
}

/// Replaces the entries between the subtitle and nav of `archive` with
/// `posts`, newest first. Returns `None` when the anchors are missing.
///
/// Entries already on the page are not kept; only `posts` end up listed.
pub(crate) fn rebuild_archive(archive: &str, posts: &[PostSummary]) -> Option<String> {
    let caps = ENTRY_REGION.captures(archive)?;
    let header = caps.get(1)?.as_str();
    let footer = caps.get(3)?;
    let tail = &archive[footer.end()..];

    let mut posts: Vec<&PostSummary> = posts.iter().collect();
    posts.sort_by(sort_summary);

    let mut entries = String::from("\n\n");
    for post in posts {
        render_entry(&mut entries, post);
    }

    let before = archive.split(SUBTITLE_OPEN).next().unwrap_or_default();
    let rebuilt = format!("{before}{header}{entries}    {}", footer.as_str());

    // only the separator in front of the footer is normalised; the tail stays verbatim
    let mut rebuilt = NAV_SEPARATOR
        .replace_all(&rebuilt, "</div>\n\n    <div class=\"nav\">")
        .into_owned();
    rebuilt.push_str(tail);

    Some(rebuilt)
}

/// Rewrites the archive page at `archive_path` in place.
pub(crate) fn update_archive(
    posts: &[PostSummary],
    archive_path: &Path,
) -> anyhow::Result<ArchiveUpdate> {
    let archive = read_text(archive_path)?;

    let Some(rebuilt) = rebuild_archive(&archive, posts) else {
        return Ok(ArchiveUpdate::AnchorNotFound);
    };

    std::fs::write(archive_path, rebuilt)
        .with_context(|| format!("while writing {:?}", archive_path))?;
    Ok(ArchiveUpdate::Updated(posts.len()))
}
