//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod git;
pub mod logs;

pub use self::fixtures::{create_many_projects, TestTree, TestTreeBuilder};
pub use self::git::{create_test_commit, is_git_available, setup_git_repo};
pub use self::logs::CapturedLogs;

use projector::core::{find, Completion, Filters, Flow, SearchError, SearchOptions};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Runs a search and returns every reported project as a set, asserting that
/// no project is reported twice.
pub async fn search_set(
    roots: &[PathBuf],
    filters: &Filters,
) -> Result<BTreeSet<PathBuf>, SearchError> {
    let mut found = BTreeSet::new();
    let completion = find(roots, filters, &SearchOptions::default(), |project| {
        assert!(
            found.insert(project.to_path_buf()),
            "project reported twice: {}",
            project.display()
        );
        Ok(Flow::Continue)
    })
    .await?;

    assert_eq!(completion, Completion::Exhausted);
    Ok(found)
}
