//! Command implementations built on top of the project search
//!
//! Each command receives a [`SearchContext`] resolved from config file,
//! environment and flags.

pub mod find;
pub mod list;
pub mod run;

use std::path::PathBuf;

use crate::core::{Filters, SearchOptions, Settings};

/// Where and how to search, shared by every command
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    pub roots: Vec<PathBuf>,
    pub filters: Filters,
    pub options: SearchOptions,
}

impl SearchContext {
    pub fn new(roots: Vec<PathBuf>, filters: Filters, options: SearchOptions) -> Self {
        Self {
            roots,
            filters,
            options,
        }
    }

    /// Resolves a context from fully merged settings
    pub fn from_settings(settings: &Settings, home: Option<&std::path::Path>) -> Self {
        Self::new(
            settings.roots(home),
            settings.filters(),
            settings.search_options(),
        )
    }
}
