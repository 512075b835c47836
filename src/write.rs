//! Serializes [`FeedEntry`]s into an Atom document.

use crate::config::Author;
use crate::feed::FeedEntry;
use atom_syndication::{Content, Entry, Error as AtomError, Feed, Link, Person, Text};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use std::io::Write;

/// Bundled configuration for writing a feed.
pub struct FeedConfig {
    /// The feed's title.
    pub title: String,

    /// The feed's unique identifier; conventionally the site's base URL.
    pub id: String,

    /// The author credited on the feed and on every entry.
    pub author: Option<Author>,

    /// The site's home page, linked from the feed.
    pub home_page: String,
}

/// Writes an Atom feed made of `entries` to `w`. The feed's `updated`
/// timestamp is the newest entry's date, so writing the same entries twice
/// produces identical output.
pub fn write_feed<W: Write>(config: &FeedConfig, entries: &[FeedEntry], w: W) -> Result<()> {
    let mut w = feed(config, entries).write_to(w)?;
    w.flush()?;
    Ok(())
}

fn feed(config: &FeedConfig, entries: &[FeedEntry]) -> Feed {
    let updated = entries
        .iter()
        .map(|e| e.date)
        .max()
        .unwrap_or_else(|| NaiveDate::from_ymd(1970, 1, 1));

    let mut feed = Feed::default();
    feed.set_title(config.title.as_str());
    feed.set_id(config.id.as_str());
    feed.set_updated(midnight_utc(updated));
    feed.set_authors(author_to_people(config.author.as_ref()));
    feed.set_links(vec![alternate(&config.home_page)]);
    feed.set_entries(
        entries
            .iter()
            .map(|e| feed_entry(config, e))
            .collect::<Vec<Entry>>(),
    );
    feed
}

fn feed_entry(config: &FeedConfig, entry: &FeedEntry) -> Entry {
    let date = midnight_utc(entry.date);

    let mut content = Content::default();
    content.set_content_type("html".to_owned());
    content.set_value(entry.content.clone());

    let mut out = Entry::default();
    out.set_id(entry.guid.as_str());
    out.set_title(entry.title.as_str());
    out.set_updated(date);
    out.set_published(date);
    out.set_authors(author_to_people(config.author.as_ref()));
    out.set_links(vec![alternate(&entry.url)]);
    out.set_summary(Text::plain(entry.description.as_str()));
    out.set_content(content);
    out
}

fn alternate(href: &str) -> Link {
    let mut link = Link::default();
    link.set_href(href);
    link.set_rel("alternate");
    link
}

// Entry dates carry no time of day, so they're pinned to midnight UTC.
fn midnight_utc(date: NaiveDate) -> DateTime<FixedOffset> {
    FixedOffset::east(0).from_utc_datetime(&date.and_hms(0, 0, 0))
}

fn author_to_people(author: Option<&Author>) -> Vec<Person> {
    match author {
        Some(author) => {
            let mut person = Person::default();
            person.set_name(author.name.as_str());
            person.set_email(author.email.clone());
            vec![person]
        }
        None => Vec::new(),
    }
}

/// The result of a fallible feed-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem writing a feed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when there is a generic I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Returned when there is an Atom-related error.
    #[error(transparent)]
    Atom(#[from] AtomError),
}
