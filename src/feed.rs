//! Turns [`Article`]s into [`FeedEntry`]s. Each entry carries a preview of the
//! article's HTML, cut off before its N-th paragraph, followed by a link back
//! to the full article on the site.

use crate::article::Article;
use crate::nth::{self, nth_index};
use chrono::NaiveDate;
use pulldown_cmark::escape::{escape_href, escape_html};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::warn;

/// The marker whose occurrences are counted as paragraphs.
pub const PARAGRAPH_MARKER: &str = "<p>";

/// The number of the paragraph before which previews are cut, unless
/// configured otherwise.
pub const DEFAULT_PARAGRAPH_LIMIT: usize = 5;

/// The label of the link appended to every preview, unless configured
/// otherwise.
pub const DEFAULT_CONTINUE_READING: &str = "Continue reading on the site";

/// One item of the feed, built from one [`Article`]. Only the fields listed
/// here make it into the feed; any other front-matter is dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedEntry {
    /// The article's title.
    pub title: String,

    /// The article's excerpt.
    pub description: String,

    /// The article's site-relative path.
    pub path: String,

    /// The article's creation date.
    pub date: NaiveDate,

    /// The absolute URL of the article (`{base_url}{path}`).
    pub url: String,

    /// The entry's unique identifier. Always equal to `url`.
    pub guid: String,

    /// The preview HTML followed by the continue-reading link.
    pub content: String,
}

/// Builds [`FeedEntry`]s from [`Article`]s.
pub struct FeedItemBuilder<'a> {
    /// The site's base URL, e.g. `https://example.com`. Article paths are
    /// appended to it to form entry URLs.
    pub base_url: &'a str,

    /// The label of the link back to the article that ends every preview.
    pub continue_reading: &'a str,

    /// Previews stop right before this paragraph. Articles with fewer
    /// paragraphs are included in full. Must be at least 1.
    pub paragraph_limit: usize,
}

impl<'a> FeedItemBuilder<'a> {
    /// Constructs a builder with the default paragraph limit
    /// ([`DEFAULT_PARAGRAPH_LIMIT`]).
    pub fn new(base_url: &'a str, continue_reading: &'a str) -> FeedItemBuilder<'a> {
        FeedItemBuilder {
            base_url,
            continue_reading,
            paragraph_limit: DEFAULT_PARAGRAPH_LIMIT,
        }
    }

    /// Builds the entries for `articles`, in the same order.
    ///
    /// Articles that lack a `path` or `created` date, and articles whose
    /// `path` was already used by an earlier entry, are skipped with a
    /// warning. An invalid paragraph limit fails the whole build.
    pub fn build(&self, articles: &[Article]) -> Result<Vec<FeedEntry>> {
        let mut seen: HashSet<String> = HashSet::with_capacity(articles.len());
        let mut entries: Vec<FeedEntry> = Vec::with_capacity(articles.len());

        for article in articles {
            let entry = match self.entry(article) {
                Ok(entry) => entry,
                Err(err @ Error::MissingMetadata { .. }) => {
                    warn!(error = %err, "Skipping article");
                    continue;
                }
                Err(err) => return Err(err),
            };

            if !seen.insert(entry.path.clone()) {
                let err = Error::DuplicatePath {
                    article: article.source.clone(),
                    path: entry.path,
                };
                warn!(error = %err, "Skipping article");
                continue;
            }

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Builds the entry for a single article.
    pub fn entry(&self, article: &Article) -> Result<FeedEntry> {
        let preview = match nth_index(&article.html, PARAGRAPH_MARKER, self.paragraph_limit)? {
            Some(cut) => &article.html[..cut],
            None => &article.html,
        };

        let missing = |field| Error::MissingMetadata {
            article: article.source.clone(),
            field,
        };
        let path = article.path.as_deref().ok_or_else(|| missing("path"))?;
        let date = article.created.ok_or_else(|| missing("created"))?;

        let url = self.url(path);
        let mut content = String::with_capacity(preview.len() + url.len() + 64);
        content.push_str(preview);
        self.push_continue_reading(&mut content, &url);

        Ok(FeedEntry {
            title: article.title.clone(),
            description: article.excerpt.clone(),
            path: path.to_owned(),
            date,
            guid: url.clone(),
            url,
            content,
        })
    }

    fn url(&self, path: &str) -> String {
        let base_url = match path.starts_with('/') {
            true => self.base_url.strip_suffix('/').unwrap_or(self.base_url),
            false => self.base_url,
        };
        format!("{}{}", base_url, path)
    }

    fn push_continue_reading(&self, w: &mut String, url: &str) {
        // Writing into a `String` can't fail.
        w.push_str("<p><a href=\"");
        let _ = escape_href(&mut *w, url);
        w.push_str("\">");
        let _ = escape_html(&mut *w, self.continue_reading);
        w.push_str("</a></p>");
    }
}

/// The result of building feed entries.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem building a [`FeedEntry`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when an article lacks front-matter the feed requires. The
    /// article is left out of the feed.
    #[error("article `{}` is missing required front-matter field `{field}`", .article.display())]
    MissingMetadata { article: PathBuf, field: &'static str },

    /// Returned when an article's path was already used by another article.
    /// The later article is left out of the feed.
    #[error("article `{}` repeats path `{path}`", .article.display())]
    DuplicatePath { article: PathBuf, path: String },

    /// Returned when the paragraph limit is invalid.
    #[error(transparent)]
    InvalidArgument(#[from] nth::Error),
}
