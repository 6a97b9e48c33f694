use std::path::Path;

use anyhow::{bail, Context as _};
use chrono::NaiveDate;
use log::{error, info, warn};

use crate::context::Context;

mod archive;
mod data;
mod markdown;
mod page;
mod utils;

use archive::{update_archive, ArchiveUpdate};
use data::PostSummary;
use page::generate_page;
use utils::{find_posts, read_text};

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Renders one post into the output directory.
fn generate_post(
    post_path: &Path,
    template: &str,
    ctx: &Context,
    today: NaiveDate,
) -> anyhow::Result<PostSummary> {
    let content = read_text(post_path)?;
    let post = generate_page(&content, template, today);

    let out_path = ctx.out_dir.join(post.file_name());
    std::fs::write(&out_path, &post.html)
        .with_context(|| format!("while writing {:?}", out_path))?;
    info!("  ✓ Generated: {}", file_name(&out_path));

    Ok(PostSummary::from(&post))
}

/// Generates a page per post and refreshes the archive.
///
/// Returns the number of pages written. Failing posts are logged and
/// skipped; only a missing posts directory or template is an error.
pub(crate) fn generate(ctx: &Context, today: NaiveDate) -> anyhow::Result<usize> {
    if !ctx.posts_dir.is_dir() {
        bail!("Posts directory {:?} not found", ctx.posts_dir);
    }
    if !ctx.template_path.is_file() {
        bail!("Template file {:?} not found", ctx.template_path);
    }

    let posts = find_posts(&ctx.posts_dir)?;
    if posts.is_empty() {
        info!("No markdown files found in {:?}", ctx.posts_dir);
        return Ok(0);
    }
    info!("Found {} markdown posts", posts.len());

    let template = read_text(&ctx.template_path)?;
    if !ctx.out_dir.exists() {
        std::fs::create_dir_all(&ctx.out_dir)
            .with_context(|| format!("while creating {:?}", ctx.out_dir))?;
    }

    let mut summaries = vec![];
    for post_path in posts.iter() {
        info!("Processing: {}", file_name(post_path));
        match generate_post(post_path, &template, ctx, today) {
            Ok(summary) => summaries.push(summary),
            Err(e) => error!("  ✗ Error: {e:#}"),
        }
    }

    if !summaries.is_empty() {
        if ctx.archive_path.is_file() {
            match update_archive(&summaries, &ctx.archive_path)? {
                ArchiveUpdate::Updated(count) => info!("✓ Updated archive with {count} posts"),
                ArchiveUpdate::AnchorNotFound => {
                    warn!("Could not find insertion point in archive")
                }
            }
        } else {
            warn!("Archive {:?} not found, skipping", ctx.archive_path);
        }
    }

    info!("✓ Done! Generated {} HTML files", summaries.len());
    Ok(summaries.len())
}
