//! Exports the [`build_feed`] function which stitches together the steps of
//! building the feed: parsing the articles ([`crate::article`]), turning them
//! into feed entries ([`crate::feed`]), and writing the Atom document to disk
//! ([`crate::write`]).

use crate::article::{Error as ParseError, Parser as ArticleParser};
use crate::config::Config;
use crate::feed::{Error as FeedError, FeedEntry, FeedItemBuilder};
use crate::write::{write_feed, Error as WriteError, FeedConfig};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

/// Parses the articles under [`Config::content_directory`] and builds their
/// feed entries, newest first.
pub fn feed_entries(config: &Config) -> Result<Vec<FeedEntry>> {
    let articles = ArticleParser::new(&config.posts_folder)
        .parse_articles(&config.content_directory)?;

    let builder = FeedItemBuilder {
        base_url: &config.base_url,
        continue_reading: &config.continue_reading,
        paragraph_limit: config.paragraph_limit,
    };
    let entries = builder.build(&articles)?;

    info!(
        articles = articles.len(),
        entries = entries.len(),
        skipped = articles.len() - entries.len(),
        "Built feed entries"
    );
    Ok(entries)
}

/// Builds the feed from a [`Config`] and writes it to
/// `{output_directory}/{feed_path}`, creating directories as needed. Returns
/// the path of the written file.
pub fn build_feed(config: &Config) -> Result<PathBuf> {
    let entries = feed_entries(config)?;

    let feed_file = config.output_directory.join(&config.feed_path);
    if let Some(dir) = feed_file.parent() {
        std::fs::create_dir_all(dir).map_err(|err| Error::CreateDirectory {
            path: dir.to_owned(),
            err,
        })?;
    }

    let file = File::create(&feed_file).map_err(|err| Error::CreateFile {
        path: feed_file.clone(),
        err,
    })?;
    write_feed(
        &FeedConfig {
            title: config.title.clone(),
            id: config.base_url.clone(),
            author: config.author.clone(),
            home_page: config.base_url.clone(),
        },
        &entries,
        BufWriter::new(file),
    )?;

    info!(path = %feed_file.display(), entries = entries.len(), "Wrote feed");
    Ok(feed_file)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a feed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned for errors parsing articles.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Returned for errors building feed entries.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Returned for errors serializing the feed.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// Returned for I/O problems creating the output directory.
    #[error("Creating directory '{}'", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// Returned for I/O problems creating the feed file.
    #[error("Creating feed file '{}'", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}
