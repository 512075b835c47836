//! Defines the [`Article`], [`Parser`], and [`Error`] types. Also defines the
//! logic for loading articles from the content directory into memory: walking
//! the directory, splitting front-matter from the body, decoding the
//! front-matter, and rendering the body to HTML.

use std::{
    ffi::OsStr,
    fs::File,
    path::{Component, Path, PathBuf},
};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::markdown;

const MARKDOWN_EXTENSION: &str = "md";

/// The format of the `created` front-matter field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An article as read from the content directory. Articles are never mutated
/// after loading.
#[derive(Clone, Debug, PartialEq)]
pub struct Article {
    /// The rendered HTML body.
    pub html: String,

    /// The article's title.
    pub title: String,

    /// The author-written summary. Empty if the front-matter has none.
    pub excerpt: String,

    /// The site-relative URL path, e.g. `/blog/some-slug`. `None` if the
    /// front-matter has none.
    pub path: Option<String>,

    /// The publication date. `None` if the front-matter has none or if it
    /// isn't a `YYYY-MM-DD` date.
    pub created: Option<NaiveDate>,

    /// The source file, for diagnostics.
    pub source: PathBuf,
}

impl Article {
    /// Parses an article from the contents of a markdown file. The input must
    /// be structured as follows:
    ///
    /// 1. Initial front-matter fence (`---`)
    /// 2. YAML front-matter with fields `title`, `path`, `created`, `excerpt`
    ///    (all optional here; `tags` and `updated` are accepted and ignored)
    /// 3. Terminal front-matter fence (`---`)
    /// 4. Markdown body
    ///
    /// For example:
    ///
    /// ```md
    /// ---
    /// title: Hello, world!
    /// path: /blog/hello-world
    /// created: 2021-04-16
    /// excerpt: A greeting.
    /// tags: [greet]
    /// ---
    /// # Hello
    ///
    /// World
    /// ```
    pub fn parse(source: &Path, input: &str) -> Result<Article> {
        fn frontmatter_indices(input: &str) -> Result<(usize, usize, usize)> {
            const FENCE: &str = "---";
            if !input.starts_with(FENCE) {
                return Err(Error::FrontmatterMissingStartFence);
            }
            // The closing fence must start a line, so `---` inside a value
            // doesn't end the front-matter.
            const END_FENCE: &str = "\n---";
            match input[FENCE.len()..].find(END_FENCE) {
                None => Err(Error::FrontmatterMissingEndFence),
                Some(offset) => Ok((
                    FENCE.len(),                            // yaml_start
                    FENCE.len() + offset,                   // yaml_stop
                    FENCE.len() + offset + END_FENCE.len(), // body_start
                )),
            }
        }

        let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input)?;
        let frontmatter: Frontmatter =
            serde_yaml::from_str(&input[yaml_start..yaml_stop])?;

        let created = frontmatter.created.as_deref().and_then(|date| {
            match NaiveDate::parse_from_str(date.trim(), DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(err) => {
                    warn!(
                        source = %source.display(),
                        date,
                        error = %err,
                        "Ignoring unparseable `created` date"
                    );
                    None
                }
            }
        });

        let mut html = String::new();
        markdown::to_html(&mut html, &input[body_start..]);

        Ok(Article {
            html,
            title: frontmatter.title,
            excerpt: frontmatter.excerpt,
            path: frontmatter.path,
            created,
            source: source.to_owned(),
        })
    }
}

/// Loads [`Article`]s from a content directory.
pub struct Parser<'a> {
    /// Only articles with a directory of this name somewhere between the
    /// content directory and the file are loaded (e.g., `posts` selects
    /// `content/posts/foo.md` and `content/posts/2021/bar.md` but not
    /// `content/pages/about.md`).
    posts_folder: &'a str,
}

impl<'a> Parser<'a> {
    /// Constructs a new parser. See fields on [`Parser`] for argument
    /// descriptions.
    pub fn new(posts_folder: &'a str) -> Parser<'a> {
        Parser { posts_folder }
    }

    /// Reads and parses a single article file, annotating any error with the
    /// file's path.
    pub fn parse_article(&self, path: &Path) -> Result<Article> {
        let parse = || -> Result<Article> {
            use std::io::Read;
            let mut contents = String::new();
            File::open(path)?.read_to_string(&mut contents)?;
            Article::parse(path, &contents)
        };
        parse().map_err(|e| Error::Annotated(path.to_owned(), Box::new(e)))
    }

    /// Recursively searches `content_directory` for markdown files under the
    /// posts folder and returns them as [`Article`]s sorted by `created`, most
    /// recent first. Articles without a date sort last. Files are visited in
    /// file-name order so ties are stable across runs.
    pub fn parse_articles(&self, content_directory: &Path) -> Result<Vec<Article>> {
        let mut articles = Vec::new();
        let walker = WalkDir::new(content_directory)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()));
        for result in walker {
            let entry = result?;
            if !entry.file_type().is_file()
                || entry.path().extension() != Some(OsStr::new(MARKDOWN_EXTENSION))
            {
                continue;
            }

            // strip_prefix() should never fail; walkdir yields paths under
            // the root it was given.
            let relative = entry
                .path()
                .strip_prefix(content_directory)
                .unwrap_or_else(|_| entry.path());
            if !self.in_posts_folder(relative) {
                debug!(path = %relative.display(), "Skipping article outside posts folder");
                continue;
            }

            let article = self.parse_article(entry.path())?;
            debug!(path = %relative.display(), title = %article.title, "Parsed article");
            articles.push(article);
        }

        articles.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(articles)
    }

    fn in_posts_folder(&self, relative: &Path) -> bool {
        match relative.parent() {
            None => false,
            Some(dir) => dir
                .components()
                .any(|c| c == Component::Normal(OsStr::new(self.posts_folder))),
        }
    }
}

/// The subset of front-matter the feed uses. Unknown fields (e.g., `tags`,
/// `updated`) are ignored.
#[derive(Deserialize)]
struct Frontmatter {
    #[serde(default)]
    title: String,

    #[serde(default)]
    path: Option<String>,

    #[serde(default)]
    created: Option<String>,

    #[serde(default)]
    excerpt: String,
}

/// Represents the result of an [`Article`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading [`Article`]s.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when an article source file is missing its starting
    /// front-matter fence (`---`).
    #[error("article must begin with `---`")]
    FrontmatterMissingStartFence,

    /// Returned when an article source file is missing its terminal
    /// front-matter fence.
    #[error("missing closing `---`")]
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the front-matter as YAML.
    #[error(transparent)]
    DeserializeYaml(#[from] serde_yaml::Error),

    /// Returned for I/O errors reading an article.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Returned for errors walking the content directory.
    #[error(transparent)]
    WalkDir(#[from] walkdir::Error),

    /// An error while parsing a specific article file.
    #[error("parsing article `{}`", .0.display())]
    Annotated(PathBuf, #[source] Box<Error>),
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(input: &str) -> Result<Article> {
        Article::parse(Path::new("posts/test.md"), input)
    }

    #[test]
    fn test_parse_article() -> Result<()> {
        let article = parse(
            "---\n\
             title: Hello\n\
             path: /blog/hello\n\
             created: 2021-04-16\n\
             updated: 2021-05-01\n\
             excerpt: A greeting.\n\
             tags: [greet, misc]\n\
             ---\n\
             Hello\n\nWorld\n",
        )?;

        assert_eq!(
            Article {
                html: String::from("<p>Hello</p>\n<p>World</p>\n"),
                title: String::from("Hello"),
                excerpt: String::from("A greeting."),
                path: Some(String::from("/blog/hello")),
                created: Some(NaiveDate::from_ymd(2021, 4, 16)),
                source: PathBuf::from("posts/test.md"),
            },
            article
        );
        Ok(())
    }

    #[test]
    fn test_parse_article_missing_metadata() -> Result<()> {
        let article = parse("---\ntitle: Untitled draft\n---\nbody\n")?;
        assert_eq!(None, article.path);
        assert_eq!(None, article.created);
        assert_eq!("", article.excerpt);
        Ok(())
    }

    #[test]
    fn test_parse_article_bad_date_is_missing() -> Result<()> {
        let article = parse("---\npath: /x\ncreated: last tuesday\n---\n")?;
        assert_eq!(None, article.created);
        assert_eq!(Some(String::from("/x")), article.path);
        Ok(())
    }

    #[test]
    fn test_parse_article_missing_start_fence() {
        assert!(matches!(
            parse("title: nope\n---\n"),
            Err(Error::FrontmatterMissingStartFence)
        ));
    }

    #[test]
    fn test_parse_article_missing_end_fence() {
        assert!(matches!(
            parse("---\ntitle: nope\n"),
            Err(Error::FrontmatterMissingEndFence)
        ));
    }

    #[test]
    fn test_parse_article_dashes_inside_value() -> Result<()> {
        let article = parse(
            "---\n\
             title: A---B\n\
             path: /blog/a-b\n\
             created: 2021-04-16\n\
             ---\n\
             Body\n",
        )?;
        assert_eq!("A---B", article.title);
        assert_eq!(Some(String::from("/blog/a-b")), article.path);
        assert_eq!(Some(NaiveDate::from_ymd(2021, 4, 16)), article.created);
        assert_eq!("<p>Body</p>\n", article.html);
        Ok(())
    }

    #[test]
    fn test_parse_article_invalid_yaml() {
        assert!(matches!(
            parse("---\ntitle: [unclosed\n---\n"),
            Err(Error::DeserializeYaml(_))
        ));
    }

    #[test]
    fn test_in_posts_folder() {
        let parser = Parser::new("posts");
        assert!(parser.in_posts_folder(Path::new("posts/a.md")));
        assert!(parser.in_posts_folder(Path::new("blog/posts/2021/a.md")));
        assert!(!parser.in_posts_folder(Path::new("pages/a.md")));
        assert!(!parser.in_posts_folder(Path::new("posts.md")));
        assert!(!parser.in_posts_folder(Path::new("postscript/a.md")));
    }

    #[test]
    fn test_parse_articles() -> Result<()> {
        let articles =
            Parser::new("posts").parse_articles(Path::new("./testdata/content"))?;

        let paths: Vec<Option<&str>> =
            articles.iter().map(|a| a.path.as_deref()).collect();
        assert_eq!(
            vec![
                Some("/blog/long-read"),
                Some("/blog/short-note"),
                Some("/blog/first-post"),
                None,
            ],
            paths
        );
        Ok(())
    }

    #[test]
    fn test_parse_articles_annotates_errors() {
        let err = Parser::new("posts")
            .parse_articles(Path::new("./testdata/broken"))
            .unwrap_err();
        match err {
            Error::Annotated(path, inner) => {
                assert!(path.ends_with("posts/no-fence.md"));
                assert!(matches!(*inner, Error::FrontmatterMissingStartFence));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
