//! Project marker detection

use std::io;
use std::path::Path;

use super::config::MARKER_NAME;

/// Checks whether `dir` holds a `.git` entry (directory, or file for
/// worktrees and submodules).
///
/// A missing marker is `Ok(false)`, as is a `dir` that is really a file.
/// Any other failure, such as permission denied on `dir`, is returned so the
/// caller can skip the branch.
pub async fn is_project(dir: &Path) -> io::Result<bool> {
    match tokio::fs::try_exists(dir.join(MARKER_NAME)).await {
        Err(e) if e.kind() == io::ErrorKind::NotADirectory => Ok(false),
        result => result,
    }
}
