/// One `[title](url)` bullet from a post's Sources section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Source {
    pub title: String,
    pub url: String,
}

/// A post rendered into the page template.
#[derive(Debug, Clone)]
pub(crate) struct RenderedPost {
    pub html: String,
    /// ISO date used in the output file name.
    pub file_date: String,
    pub formatted_date: String,
    /// Leading characters of the markdown body, before rendering.
    pub excerpt: String,
}

impl RenderedPost {
    pub fn file_name(&self) -> String {
        page_file_name(&self.file_date)
    }
}

/// What the archive page needs to know about a generated post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostSummary {
    pub date: String,
    pub formatted_date: String,
    pub excerpt: String,
}

impl From<&RenderedPost> for PostSummary {
    fn from(post: &RenderedPost) -> Self {
        Self {
            date: post.file_date.clone(),
            formatted_date: post.formatted_date.clone(),
            excerpt: post.excerpt.replace('\n', " ").trim().to_string(),
        }
    }
}

pub(crate) fn page_file_name(date: &str) -> String {
    format!("weekly-bites-{date}.html")
}
