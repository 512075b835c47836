//! Loads the project file (`blogfeed.yaml`) and resolves it into a [`Config`].

use crate::feed::{DEFAULT_CONTINUE_READING, DEFAULT_PARAGRAPH_LIMIT};
use crate::util::open;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file.
pub const PROJECT_FILE: &str = "blogfeed.yaml";

/// The feed file written under the output directory unless `feed_path` says
/// otherwise. The document is Atom, hence the name.
pub const DEFAULT_FEED_PATH: &str = "atom.xml";

/// An author credited in the feed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Author {
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct ParagraphLimit(usize);
impl Default for ParagraphLimit {
    fn default() -> Self {
        ParagraphLimit(DEFAULT_PARAGRAPH_LIMIT)
    }
}

#[derive(Deserialize)]
struct Project {
    title: String,
    base_url: String,

    #[serde(default)]
    author: Option<Author>,

    #[serde(default)]
    content_directory: Option<PathBuf>,

    #[serde(default)]
    posts_folder: Option<String>,

    #[serde(default)]
    paragraph_limit: ParagraphLimit,

    #[serde(default)]
    continue_reading: Option<String>,

    #[serde(default)]
    feed_path: Option<PathBuf>,
}

/// The resolved configuration for a feed build. Built once and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub title: String,
    pub base_url: String,
    pub author: Option<Author>,
    pub content_directory: PathBuf,
    pub posts_folder: String,
    pub paragraph_limit: usize,
    pub continue_reading: String,
    pub feed_path: PathBuf,
    pub output_directory: PathBuf,
}

impl Config {
    /// Looks for [`PROJECT_FILE`] in `dir` and then in each of its parents,
    /// and loads the first one found. `dir` is canonicalized first so relative
    /// paths like `.` still reach their parents.
    pub fn from_directory(dir: &Path, output_directory: &Path) -> Result<Config> {
        let dir = dir
            .canonicalize()
            .with_context(|| format!("Resolving project directory `{}`", dir.display()))?;
        Config::search(&dir, output_directory)
    }

    fn search(dir: &Path, output_directory: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            match Config::from_project_file(&path, output_directory) {
                Ok(config) => Ok(config),
                Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
            }
        } else {
            match dir.parent() {
                Some(dir) => Config::search(dir, output_directory),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    /// Loads the project file at `path`. Relative paths in the project file
    /// are resolved against the file's directory.
    pub fn from_project_file(path: &Path, output_directory: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => Config::from_project(project, project_root, output_directory),
        }
    }

    fn from_project(project: Project, project_root: &Path, output_directory: &Path) -> Result<Config> {
        if let Err(e) = Url::parse(&project.base_url) {
            return Err(anyhow!("Invalid `base_url` '{}': {}", project.base_url, e));
        }
        if project.paragraph_limit.0 < 1 {
            return Err(anyhow!("`paragraph_limit` must be at least 1"));
        }

        Ok(Config {
            title: project.title,
            base_url: project.base_url,
            author: project.author,
            content_directory: project_root.join(
                project
                    .content_directory
                    .unwrap_or_else(|| PathBuf::from("content")),
            ),
            posts_folder: project.posts_folder.unwrap_or_else(|| "posts".to_owned()),
            paragraph_limit: project.paragraph_limit.0,
            continue_reading: project
                .continue_reading
                .unwrap_or_else(|| DEFAULT_CONTINUE_READING.to_owned()),
            feed_path: project.feed_path.unwrap_or_else(|| PathBuf::from(DEFAULT_FEED_PATH)),
            output_directory: output_directory.to_owned(),
        })
    }
}
