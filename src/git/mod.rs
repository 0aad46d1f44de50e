//! Git working tree inspection for discovered projects

pub mod operations;

// Re-export commonly used items
pub use operations::{
    filter_dirty, has_uncommitted_changes, has_untracked_files, is_dirty, run_git, GitOutput,
};
