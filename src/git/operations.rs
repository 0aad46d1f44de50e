//! Basic git operations and command execution

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::core::config::GIT_OPERATION_TIMEOUT_SECS;

// Git command arguments
const GIT_DIFF_INDEX_ARGS: &[&str] = &["diff-index", "--quiet", "HEAD", "--"];
const GIT_UNTRACKED_ARGS: &[&str] = &["ls-files", "--exclude-standard", "--others"];

/// Captured result of one git invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs git in `path`, killing it if it outlives the operation timeout
pub async fn run_git(path: &Path, args: &[&str]) -> Result<GitOutput> {
    let child = Command::new("git")
        .args(args)
        .current_dir(path)
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS), child)
        .await
        .map_err(|_| {
            anyhow::anyhow!(
                "git {} timed out after {} seconds",
                args.first().copied().unwrap_or_default(),
                GIT_OPERATION_TIMEOUT_SECS
            )
        })??;

    Ok(GitOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

/// Checks for staged or unstaged changes to tracked files
///
/// `git diff-index` exits non-zero when the index or work tree differs from
/// HEAD, which includes repositories without any commit yet.
pub async fn has_uncommitted_changes(path: &Path) -> Result<bool> {
    let output = run_git(path, GIT_DIFF_INDEX_ARGS).await?;
    Ok(!output.success)
}

/// Checks for untracked files that are not ignored
pub async fn has_untracked_files(path: &Path) -> Result<bool> {
    let output = run_git(path, GIT_UNTRACKED_ARGS).await?;
    if !output.success {
        anyhow::bail!("git ls-files failed: {}", output.stderr);
    }
    Ok(!output.stdout.is_empty())
}

/// A repository is dirty when it has uncommitted, unstaged or untracked changes
pub async fn is_dirty(path: &Path) -> Result<bool> {
    if has_uncommitted_changes(path).await? {
        return Ok(true);
    }
    has_untracked_files(path).await
}

/// Keeps only the dirty repositories, checking up to `concurrency` at a time.
///
/// Repositories whose state cannot be determined (git missing, timeout) are
/// dropped. The result preserves the input order.
pub async fn filter_dirty(projects: Vec<PathBuf>, concurrency: usize) -> Vec<PathBuf> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut futures = FuturesUnordered::new();

    for (index, project) in projects.into_iter().enumerate() {
        let semaphore_clone = Arc::clone(&semaphore);
        futures.push(async move {
            let Ok(_permit) = semaphore_clone.acquire().await else {
                return None;
            };

            match is_dirty(&project).await {
                Ok(true) => Some((index, project)),
                Ok(false) => None,
                Err(e) => {
                    debug!(path = %project.display(), "unable to check git state: {e}");
                    None
                }
            }
        });
    }

    let mut dirty = Vec::new();
    while let Some(result) = futures.next().await {
        if let Some(entry) = result {
            dirty.push(entry);
        }
    }

    dirty.sort_by_key(|(index, _)| *index);
    dirty.into_iter().map(|(_, project)| project).collect()
}
