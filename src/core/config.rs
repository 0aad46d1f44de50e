//! Configuration constants and settings

// Search Configuration
//
// Directory expansion is I/O-bound: each task spends most of its time in
// canonicalize/metadata/read_dir calls. The limiter caps how many of those are
// in flight so very wide trees cannot exhaust file descriptors.

/// Name of the entry that marks a directory as a project root
pub const MARKER_NAME: &str = ".git";

/// Capacity of the queue between the tree walker and the consumer
pub const PROJECT_QUEUE_CAPACITY: usize = 10;

/// Upper bound on concurrent filesystem operations during a search
pub const SEARCH_CONCURRENT_CAP: usize = 16;

/// Determines the concurrency limit for directory expansion
///
/// Priority order:
/// 1. --jobs N flag (or `jobs` in the config file) → N
/// 2. Smart default → min(CPU_CORES * 2, 16)
pub fn get_search_concurrency(jobs: Option<usize>) -> usize {
    if let Some(n) = jobs {
        return n.max(1); // Ensure at least 1
    }

    let cpu_count = num_cpus::get();
    (cpu_count * 2).clamp(1, SEARCH_CONCURRENT_CAP)
}

// Git configuration
pub const GIT_OPERATION_TIMEOUT_SECS: u64 = 60;

// Config file locations
pub const CONFIG_FILE_NAME: &str = ".projector.toml";
pub const CONFIG_DIR_NAME: &str = "projector";
pub const CONFIG_DIR_FILE_NAME: &str = "config.toml";
pub const CODE_DIR_ENV: &str = "CODE_DIR";
pub const DEFAULT_CODE_DIR_NAME: &str = "Code";

// UI Constants
pub const NO_PROJECTS_MESSAGE: &str = "No projects found.";
pub const NO_MATCH_MESSAGE: &str = "No projects matched that search.";
pub const SCANNING_MESSAGE: &str = "🔍 Scanning for projects...";
pub const SPINNER_TEMPLATE: &str = "{spinner} {wide_msg}";
pub const SPINNER_TICK_MS: u64 = 80;

// Display formatting constants
pub const PATH_DISPLAY_WIDTH: usize = 40;
pub const SEPARATOR_WIDTH: usize = 70;
