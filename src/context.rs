use std::path::PathBuf;

/// Paths resolved from the command line for one run.
#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub posts_dir: PathBuf,
    pub out_dir: PathBuf,
    pub template_path: PathBuf,
    pub archive_path: PathBuf,
}

impl Context {
    pub fn new(
        posts_dir: PathBuf,
        out_dir: PathBuf,
        template_path: PathBuf,
        archive_path: PathBuf,
    ) -> Self {
        Self {
            posts_dir,
            out_dir,
            template_path,
            archive_path,
        }
    }
}
