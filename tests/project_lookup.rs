//! Finding `blogfeed.yaml` from a working directory below the project root.
//!
//! This file holds a single test because it changes the process's current
//! directory, which would race with other tests in the same binary.

use blogfeed::config::Config;
use std::fs;
use std::path::Path;

#[test]
fn test_from_directory_finds_project_above_current_directory() {
    let project = tempfile::tempdir().unwrap();
    let root = project.path().canonicalize().unwrap();
    let posts = root.join("content").join("posts");
    fs::create_dir_all(&posts).unwrap();
    fs::write(
        root.join("blogfeed.yaml"),
        "title: Nested\nbase_url: https://nested.test\n",
    )
    .unwrap();

    std::env::set_current_dir(&posts).unwrap();

    let config = Config::from_directory(Path::new("."), Path::new("public")).unwrap();
    assert_eq!("Nested", config.title);
    assert_eq!(root.join("content"), config.content_directory);

    // A relative path that isn't `.` walks up the same way.
    std::env::set_current_dir(root.join("content")).unwrap();
    let config = Config::from_directory(Path::new("posts"), Path::new("public")).unwrap();
    assert_eq!(root.join("content"), config.content_directory);

    std::env::set_current_dir(std::env::temp_dir()).unwrap();
}
