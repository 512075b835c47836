//! End-to-end tests for building a feed from the fixture project in
//! `testdata/`: configuration lookup, article loading, preview truncation,
//! and the Atom document written to disk.

use atom_syndication::Feed;
use blogfeed::build::{build_feed, feed_entries};
use blogfeed::config::Config;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const CONTINUE_READING: &str = "Continue reading on Test Blog";

fn config(output: &Path) -> Config {
    Config::from_directory(Path::new("./testdata"), output).unwrap()
}

#[test]
fn test_entries_are_newest_first_and_skip_incomplete_articles() {
    let entries = feed_entries(&config(Path::new("/unused"))).unwrap();

    // `untitled-draft.md` has neither path nor date; `pages/about.md` is
    // outside the posts folder.
    let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        vec!["/blog/long-read", "/blog/short-note", "/blog/first-post"],
        paths
    );

    for entry in &entries {
        assert_eq!(format!("https://site.test{}", entry.path), entry.url);
        assert_eq!(entry.url, entry.guid);
    }
}

#[test]
fn test_long_article_is_truncated() {
    let entries = feed_entries(&config(Path::new("/unused"))).unwrap();
    let long_read = &entries[0];

    assert_eq!("A long read", long_read.title);
    assert_eq!(
        "Seven paragraphs about nothing in particular.",
        long_read.description
    );
    assert_eq!(
        format!(
            "<p>One.</p>\n<p>Two.</p>\n<p>Three.</p>\n<p>Four.</p>\n\
             <p><a href=\"https://site.test/blog/long-read\">{}</a></p>",
            CONTINUE_READING
        ),
        long_read.content
    );
}

#[test]
fn test_short_article_is_kept_whole() {
    let entries = feed_entries(&config(Path::new("/unused"))).unwrap();
    let short_note = &entries[1];

    assert_eq!(
        format!(
            "<p>A <em>single</em> paragraph.</p>\n\
             <p><a href=\"https://site.test/blog/short-note\">{}</a></p>",
            CONTINUE_READING
        ),
        short_note.content
    );
}

#[test]
fn test_build_feed_writes_atom_document() {
    let output = tempfile::tempdir().unwrap();
    let config = config(output.path());

    let feed_file = build_feed(&config).unwrap();
    assert_eq!(output.path().join("atom.xml"), feed_file);

    let feed = Feed::read_from(BufReader::new(File::open(&feed_file).unwrap())).unwrap();
    assert_eq!("https://site.test", feed.id());
    let ids: Vec<&str> = feed.entries().iter().map(|e| e.id()).collect();
    assert_eq!(
        vec![
            "https://site.test/blog/long-read",
            "https://site.test/blog/short-note",
            "https://site.test/blog/first-post",
        ],
        ids
    );

    // Building again over the same content gives the same bytes.
    let first = std::fs::read(&feed_file).unwrap();
    build_feed(&config).unwrap();
    assert_eq!(first, std::fs::read(&feed_file).unwrap());
}

#[test]
fn test_build_feed_creates_nested_output_directories() {
    let output = tempfile::tempdir().unwrap();
    let config = Config {
        feed_path: "feeds/blog/atom.xml".into(),
        ..config(output.path())
    };

    let feed_file = build_feed(&config).unwrap();
    assert_eq!(output.path().join("feeds/blog/atom.xml"), feed_file);
    assert!(feed_file.is_file());
}
