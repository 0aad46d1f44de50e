//! Concurrent tree walker
//!
//! Every directory expansion runs as its own tokio task. A task classifies its
//! candidate (project, expandable directory, or nothing) and either sends the
//! project to the consumer or spawns one task per surviving subdirectory.
//!
//! Shared per-search state:
//! - `CancellationToken` checked before any I/O, before spawning children and
//!   before every send
//! - `TaskTracker` acting as the outstanding-work counter
//! - a `Semaphore` bounding concurrent filesystem operations
//! - a `DashSet` of canonical paths so symlink cycles and overlapping roots
//!   are explored once
//!
//! When include patterns are present an excluded directory is still walked,
//! but the candidates beneath it carry a flag so only included projects are
//! reported from there.

use dashmap::DashSet;
use futures::future::{BoxFuture, FutureExt};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, trace, warn};

use super::config::MARKER_NAME;
use super::filter::FilterSet;
use super::marker::is_project;

/// A directory awaiting classification
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    path: PathBuf,
    /// Some ancestor (or the directory itself) matched an exclude pattern
    beneath_excluded: bool,
}

impl Candidate {
    pub(crate) fn root(path: PathBuf) -> Self {
        Self {
            path,
            beneath_excluded: false,
        }
    }
}

/// Result of expanding a single candidate directory
#[derive(Debug)]
enum Expansion {
    /// The candidate holds a marker; its subtree is not explored
    Project,
    /// Subdirectories that passed the filter
    Children(Vec<Candidate>),
    /// Missing, unreadable, already visited, or cancelled
    Nothing,
}

/// State shared by every task of one search
pub(crate) struct SearchState {
    filters: FilterSet,
    follow_symlinks: bool,
    cancel: CancellationToken,
    tracker: TaskTracker,
    limiter: Semaphore,
    visited: DashSet<PathBuf>,
}

impl SearchState {
    pub(crate) fn new(filters: FilterSet, concurrency: usize, follow_symlinks: bool) -> Arc<Self> {
        Arc::new(Self {
            filters,
            follow_symlinks,
            cancel: CancellationToken::new(),
            tracker: TaskTracker::new(),
            limiter: Semaphore::new(concurrency.max(1)),
            visited: DashSet::new(),
        })
    }

    /// Registers one unit of outstanding work and starts exploring `candidate`
    pub(crate) fn spawn(self: &Arc<Self>, candidate: Candidate, projects: &mpsc::Sender<PathBuf>) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.tracker
            .spawn(explore(Arc::clone(self), candidate, projects.clone()));
    }

    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Explorations spawned but not yet finished
    pub(crate) fn outstanding(&self) -> usize {
        self.tracker.len()
    }

    /// Waits until every spawned exploration has unwound
    pub(crate) async fn wait(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }

    async fn expand(&self, candidate: &Candidate) -> Expansion {
        // The limiter is never closed, so acquire only fails if that changes.
        let Ok(_permit) = self.limiter.acquire().await else {
            return Expansion::Nothing;
        };

        if self.cancel.is_cancelled() {
            return Expansion::Nothing;
        }

        let candidate_path = candidate.path.as_path();
        let identity = match fs::canonicalize(candidate_path).await {
            Ok(identity) => identity,
            Err(e) => {
                log_branch_error(candidate_path, "resolve", &e);
                return Expansion::Nothing;
            }
        };

        if !self.visited.insert(identity) {
            debug!(path = %candidate_path.display(), "already visited, skipping");
            return Expansion::Nothing;
        }

        match is_project(candidate_path).await {
            Ok(true) => return Expansion::Project,
            Ok(false) => {}
            Err(e) => {
                log_branch_error(candidate_path, "classify", &e);
                return Expansion::Nothing;
            }
        }

        let mut entries = match fs::read_dir(candidate_path).await {
            Ok(entries) => entries,
            Err(e) => {
                log_branch_error(candidate_path, "list", &e);
                return Expansion::Nothing;
            }
        };

        let mut children = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    if let Some(child) = self.child_candidate(candidate, &entry).await {
                        children.push(child);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    // Keep what was read so far; the rest of the listing is lost.
                    log_branch_error(candidate_path, "read entry in", &e);
                    break;
                }
            }
        }

        Expansion::Children(children)
    }

    /// Returns the entry as a new candidate if it is a directory worth exploring
    async fn child_candidate(
        &self,
        parent: &Candidate,
        entry: &fs::DirEntry,
    ) -> Option<Candidate> {
        if entry.file_name() == MARKER_NAME {
            return None;
        }

        let file_type = entry.file_type().await.ok()?;
        let path = entry.path();
        let is_dir = if file_type.is_dir() {
            true
        } else if file_type.is_symlink() && self.follow_symlinks {
            // Broken links resolve to an error and are dropped here.
            fs::metadata(&path).await.is_ok_and(|meta| meta.is_dir())
        } else {
            false
        };

        if !is_dir {
            return None;
        }

        if self.filters.prunes(&path) {
            trace!(path = %path.display(), "excluded, not descending");
            return None;
        }

        let beneath_excluded = parent.beneath_excluded || self.filters.is_excluded(&path);
        Some(Candidate {
            path,
            beneath_excluded,
        })
    }

    async fn emit(&self, project: Candidate, projects: &mpsc::Sender<PathBuf>) {
        if !self
            .filters
            .accepts_beneath(&project.path, project.beneath_excluded)
        {
            trace!(path = %project.path.display(), "project filtered out");
            return;
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                trace!("cancelled, discarding project");
            }
            sent = projects.send(project.path) => {
                if sent.is_err() {
                    debug!("project queue closed, consumer is gone");
                }
            }
        }
    }
}

/// One unit of outstanding work: classify `candidate`, then emit or fan out.
///
/// Boxed because the task spawns copies of itself.
fn explore(
    state: Arc<SearchState>,
    candidate: Candidate,
    projects: mpsc::Sender<PathBuf>,
) -> BoxFuture<'static, ()> {
    async move {
        if state.is_cancelled() {
            return;
        }

        match state.expand(&candidate).await {
            Expansion::Project => state.emit(candidate, &projects).await,
            Expansion::Children(children) => {
                trace!(
                    path = %candidate.path.display(),
                    children = children.len(),
                    "expanding"
                );
                for child in children {
                    if state.is_cancelled() {
                        break;
                    }
                    state.spawn(child, &projects);
                }
            }
            Expansion::Nothing => {}
        }
    }
    .boxed()
}

fn log_branch_error(path: &Path, action: &str, error: &io::Error) {
    match error.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => {
            trace!(path = %path.display(), "{action}: not found");
        }
        io::ErrorKind::PermissionDenied => {
            debug!(path = %path.display(), "unable to {action} directory: {error}");
        }
        _ => {
            warn!(path = %path.display(), "unable to {action} directory: {error}");
        }
    }
}
