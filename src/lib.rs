//! # projector
//!
//! `projector` discovers version-controlled projects (directories holding a
//! `.git` entry) beneath one or more code directories and hands them to a
//! consumer as they are found. It powers the `projector` CLI tool.
//!
//! ## Core Features
//!
//! - **Concurrent Discovery**: one tokio task per directory, bounded by a
//!   semaphore on filesystem operations.
//! - **Early Cancellation**: the consumer can stop the search at any project;
//!   in-flight work unwinds before `find` returns.
//! - **Filtering**: regex include/exclude patterns where includes override
//!   excludes.
//! - **Commands**: list (optionally only dirty repositories), fuzzy find, and
//!   run a command in every project.
//!
//! ## Example
//!
//! ```rust,no_run
//! use projector::core::{find, Filters, Flow, SearchOptions};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let roots = vec![PathBuf::from("/home/me/Code")];
//!     let filters = Filters::new().with_excludes(["node_modules"]);
//!
//!     find(&roots, &filters, &SearchOptions::default(), |project| {
//!         println!("{}", project.display());
//!         Ok(Flow::Continue)
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod utils;
