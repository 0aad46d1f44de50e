//! Search coordinator
//!
//! Owns the bounded project queue and drains it on the caller's task, so the
//! project callback is never invoked concurrently and need not be thread-safe.

use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::debug;

use super::config::{get_search_concurrency, PROJECT_QUEUE_CAPACITY};
use super::error::SearchError;
use super::filter::Filters;
use super::walker::{Candidate, SearchState};

/// What the project callback wants the search to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// How a successful search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Every reachable directory was explored
    Exhausted,
    /// The callback asked to stop early
    Stopped,
}

/// Tuning knobs for a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum concurrent filesystem operations
    pub concurrency: usize,
    /// Follow symlinked directories (cycles are detected either way)
    pub follow_symlinks: bool,
    /// Capacity of the project queue
    pub queue_capacity: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            concurrency: get_search_concurrency(None),
            follow_symlinks: true,
            queue_capacity: PROJECT_QUEUE_CAPACITY,
        }
    }
}

impl SearchOptions {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_follow_symlinks(mut self, follow_symlinks: bool) -> Self {
        self.follow_symlinks = follow_symlinks;
        self
    }
}

/// Searches `roots` for projects and calls `on_project` for each one found.
///
/// Filter patterns are compiled before anything touches the filesystem, so a
/// malformed pattern returns [`SearchError::InvalidPattern`] without a single
/// directory being listed. Unreadable or missing directories (including the
/// roots themselves) contribute no projects and are not errors.
///
/// Returning [`Flow::Stop`] or an error from `on_project` cancels the walk.
/// In both cases this function only returns once every in-flight exploration
/// has unwound. Discovery order is unspecified.
pub async fn find<F>(
    roots: &[PathBuf],
    filters: &Filters,
    options: &SearchOptions,
    mut on_project: F,
) -> Result<Completion, SearchError>
where
    F: FnMut(&Path) -> anyhow::Result<Flow>,
{
    let filter_set = filters.compile()?;
    let start_time = Instant::now();

    let state = SearchState::new(filter_set, options.concurrency, options.follow_symlinks);
    let (tx, mut rx) = mpsc::channel(options.queue_capacity.max(1));

    for root in roots {
        debug!(root = %root.display(), "searching");
        state.spawn(Candidate::root(root.clone()), &tx);
    }
    // Every task owns a sender; the queue closes once the last one finishes.
    drop(tx);

    let mut found = 0usize;
    let mut outcome = Ok(Completion::Exhausted);
    while let Some(project) = rx.recv().await {
        found += 1;
        match on_project(&project) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Stop) => {
                outcome = Ok(Completion::Stopped);
                break;
            }
            Err(e) => {
                outcome = Err(SearchError::Consumer(e));
                break;
            }
        }
    }

    if !matches!(outcome, Ok(Completion::Exhausted)) {
        debug!(
            outstanding = state.outstanding(),
            "stopping search, waiting for in-flight work"
        );
        state.cancel();
    }
    drop(rx);
    state.wait().await;

    debug!(
        projects = found,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "search finished"
    );
    outcome
}

/// Collects every project under `roots`, sorted by path
pub async fn find_all(
    roots: &[PathBuf],
    filters: &Filters,
    options: &SearchOptions,
) -> Result<Vec<PathBuf>, SearchError> {
    let mut projects = Vec::new();
    find(roots, filters, options, |project| {
        projects.push(project.to_path_buf());
        Ok(Flow::Continue)
    })
    .await?;

    projects.sort();
    Ok(projects)
}
