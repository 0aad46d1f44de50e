//! Test fixtures and builders

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};

/// A temporary directory tree with automatic cleanup
pub struct TestTree {
    pub temp_dir: TempDir,
}

impl TestTree {
    /// Get the root of the tree
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a tree-relative path
    pub fn join(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            return self.path().to_path_buf();
        }
        self.path().join(relative)
    }

    /// Set of absolute paths for the given tree-relative paths
    pub fn expected(&self, relatives: &[&str]) -> BTreeSet<PathBuf> {
        relatives.iter().map(|r| self.join(r)).collect()
    }

    /// Create a new file in the tree
    pub fn create_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.join(relative);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }
}

/// Builder for directory trees containing projects
#[derive(Default)]
pub struct TestTreeBuilder {
    dirs: Vec<String>,
    projects: Vec<String>,
    worktrees: Vec<String>,
}

impl TestTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain directory (created with all parents)
    pub fn with_dir(mut self, relative: impl Into<String>) -> Self {
        self.dirs.push(relative.into());
        self
    }

    /// Directory containing a `.git` directory
    pub fn with_project(mut self, relative: impl Into<String>) -> Self {
        self.projects.push(relative.into());
        self
    }

    /// Directory containing a `.git` file, like a worktree or submodule
    #[allow(dead_code)]
    pub fn with_worktree(mut self, relative: impl Into<String>) -> Self {
        self.worktrees.push(relative.into());
        self
    }

    pub fn build(self) -> Result<TestTree> {
        // Fixed suffix keeps the random part of the name away from
        // path-separator anchored patterns like `b/`
        let tree = TestTree {
            temp_dir: Builder::new().prefix("projector-").suffix(".tree").tempdir()?,
        };

        for dir in &self.dirs {
            std::fs::create_dir_all(tree.join(dir))?;
        }

        for project in &self.projects {
            std::fs::create_dir_all(tree.join(project).join(".git"))?;
        }

        for worktree in &self.worktrees {
            let path = tree.join(worktree);
            std::fs::create_dir_all(&path)?;
            std::fs::write(path.join(".git"), "gitdir: /elsewhere/.git/worktrees/wt\n")?;
        }

        Ok(tree)
    }
}

/// Creates `count` sibling projects named `project-N` under `parent`
#[allow(dead_code)]
pub fn create_many_projects(parent: &Path, count: usize) -> Result<Vec<PathBuf>> {
    let mut projects = Vec::with_capacity(count);
    for i in 0..count {
        let project = parent.join(format!("project-{}", i + 1));
        std::fs::create_dir_all(project.join(".git"))?;
        projects.push(project);
    }
    Ok(projects)
}
