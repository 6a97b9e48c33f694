use std::{
    cmp::Ordering,
    path::{Path, PathBuf},
};

use anyhow::Context;

use super::data::PostSummary;

/// Reads a UTF-8 file with line endings normalised to `\n`.
pub(super) fn read_text(path: &Path) -> anyhow::Result<String> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("while reading {:?}", path))?;
    Ok(content.replace("\r\n", "\n"))
}

/// Markdown files directly under `dir`, ordered by file name.
pub(super) fn find_posts(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut posts = vec![];
    for entry in std::fs::read_dir(dir).with_context(|| format!("while listing {:?}", dir))? {
        let entry = entry?;
        let path = entry.path();
        // follows symlinks
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            posts.push(path);
        }
    }
    posts.sort();

    Ok(posts)
}

/// Newest first; ISO dates compare correctly as strings.
pub(super) fn sort_summary(a: &&PostSummary, b: &&PostSummary) -> Ordering {
    b.date.cmp(&a.date)
}
