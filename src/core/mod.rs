// Internal modules - not part of public API
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod filter;
pub(crate) mod marker;
pub(crate) mod search;
pub(crate) mod settings;
pub(crate) mod walker;

// Public API - curated exports only
pub mod api;

// Re-export key items at module level for convenience
pub use api::*;
