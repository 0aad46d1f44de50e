//! File system path utilities

use std::path::{Path, PathBuf};

/// Expands a leading `~` to `home`. Paths without one are returned as-is,
/// as is `~` when no home directory is known.
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') || rest.starts_with('\\') => {
            home.join(&rest[1..])
        }
        _ => PathBuf::from(path),
    }
}

/// Shortens long paths for display, keeping the last two components.
///
/// Both `/` and `\` count as separators; the output uses whichever one the
/// path uses.
pub fn shorten_path(path: &str, max_length: usize) -> String {
    if path.len() <= max_length {
        return path.to_string();
    }

    let components: Vec<&str> = path.split(['/', '\\']).filter(|s| !s.is_empty()).collect();
    if components.len() <= 2 {
        return path.to_string();
    }

    let separator = if path.contains('/') { '/' } else { '\\' };
    let prefix = if path.starts_with(&format!(".{separator}")) {
        format!(".{separator}")
    } else {
        String::new()
    };
    let parent = components[components.len() - 2];
    let name = components[components.len() - 1];
    format!("{prefix}...{separator}{parent}{separator}{name}")
}
