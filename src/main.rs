use clap::{command, value_parser, Arg};
use context::Context;
use generator::generate;
use log::error;
use std::path::PathBuf;

mod context;
mod generator;
mod metadata;

fn path_arg(
    id: &'static str,
    flag: &'static str,
    help: &'static str,
    default: &'static str,
) -> Arg {
    Arg::new(id)
        .long(flag)
        .help(help)
        .value_parser(value_parser!(PathBuf))
        .default_value(default)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let matches = command!()
        .about("Generate weekly bites pages from markdown posts")
        .args(&[
            path_arg(
                "posts_dir",
                "posts-dir",
                "Directory containing markdown posts",
                "blog/posts",
            ),
            path_arg(
                "output_dir",
                "output-dir",
                "Output directory for HTML files",
                ".",
            ),
            path_arg(
                "template",
                "template",
                "HTML template file",
                "weekly-bites-template.html",
            ),
            path_arg(
                "archive",
                "archive",
                "Archive page to update",
                "weekly-bites-archive.html",
            ),
        ])
        .get_matches();

    let path = |id: &str| -> PathBuf {
        matches
            .get_one::<PathBuf>(id)
            .cloned()
            .unwrap_or_default()
    };
    let ctx = Context::new(
        path("posts_dir"),
        path("output_dir"),
        path("template"),
        path("archive"),
    );

    // failures are reported, never turned into a non-zero exit status
    if let Err(e) = generate(&ctx, chrono::Local::now().date_naive()) {
        error!("{e:#}");
    }

    Ok(())
}
