//! Public API for the core module.
//!
//! This module provides the stable public API for project search:
//! - Concurrent project discovery with early cancellation
//! - Include/exclude filtering
//! - Config file settings
//!
//! Internal implementation details (the walker and its shared state) are not
//! exposed through this API.

// Search
pub use super::search::{find, find_all, Completion, Flow, SearchOptions};
pub use super::marker::is_project;

// Filtering
pub use super::filter::{FilterSet, Filters};

// Errors
pub use super::error::{PatternKind, SearchError};

// Settings
pub use super::settings::{config_locations, Settings, SettingsError};

// Configuration
pub use super::config::{
    get_search_concurrency, CODE_DIR_ENV, MARKER_NAME, PROJECT_QUEUE_CAPACITY,
};

// User-facing messages
pub use super::config::{NO_MATCH_MESSAGE, NO_PROJECTS_MESSAGE, SCANNING_MESSAGE};
