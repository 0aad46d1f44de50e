//! Include/exclude path filtering
//!
//! Patterns are regular expressions matched anywhere in the full path string.
//! A path is accepted unless it matches an exclude pattern, and an include
//! match always overrides an exclude match.

use regex::RegexSet;
use serde::Deserialize;
use std::path::Path;

use super::error::{PatternKind, SearchError};

/// Uncompiled filter patterns as supplied by the CLI or the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Filters {
    pub excludes: Vec<String>,
    pub includes: Vec<String>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = excludes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_includes<I, S>(mut self, includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes = includes.into_iter().map(Into::into).collect();
        self
    }

    /// Compiles both pattern collections, failing on the first malformed one
    pub fn compile(&self) -> Result<FilterSet, SearchError> {
        Ok(FilterSet {
            excludes: compile_patterns(&self.excludes, PatternKind::Exclude)?,
            includes: compile_patterns(&self.includes, PatternKind::Include)?,
        })
    }
}

fn compile_patterns(patterns: &[String], kind: PatternKind) -> Result<RegexSet, SearchError> {
    RegexSet::new(patterns).map_err(|source| SearchError::InvalidPattern {
        kind,
        patterns: patterns.join(" "),
        source,
    })
}

/// Compiled, immutable filter shared by every explorer of one search
#[derive(Debug, Clone)]
pub struct FilterSet {
    excludes: RegexSet,
    includes: RegexSet,
}

impl FilterSet {
    /// A filter that accepts every path
    pub fn accept_all() -> Self {
        Self {
            excludes: RegexSet::empty(),
            includes: RegexSet::empty(),
        }
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.excludes.is_match(&path.to_string_lossy())
    }

    pub fn is_included(&self, path: &Path) -> bool {
        self.includes.is_match(&path.to_string_lossy())
    }

    /// `!excluded || included`
    pub fn accepts(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        !self.excludes.is_match(&path) || self.includes.is_match(&path)
    }

    /// Whether the walker may skip the subtree under `dir` entirely.
    ///
    /// With include patterns present an excluded directory can still hold an
    /// included project deeper down, so it is walked and its projects go
    /// through [`FilterSet::accepts_beneath`] instead.
    pub fn prunes(&self, dir: &Path) -> bool {
        self.includes.is_empty() && self.is_excluded(dir)
    }

    /// Report check for a project found under a (possibly) excluded directory.
    ///
    /// Below an excluded directory only an include match lets a project
    /// through.
    pub fn accepts_beneath(&self, path: &Path, beneath_excluded: bool) -> bool {
        if beneath_excluded {
            self.is_included(path)
        } else {
            self.accepts(path)
        }
    }
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::accept_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(excludes: &[&str], includes: &[&str]) -> FilterSet {
        Filters::new()
            .with_excludes(excludes.iter().copied())
            .with_includes(includes.iter().copied())
            .compile()
            .expect("patterns should compile")
    }

    #[test]
    fn test_empty_filters_accept_everything() {
        let filters = FilterSet::accept_all();
        assert!(filters.accepts(Path::new("/home/me/Code/anything")));
        assert!(!filters.prunes(Path::new("/home/me/Code/anything")));
    }

    #[test]
    fn test_exclude_matches_any_component() {
        let filters = compile(&["vendor"], &[]);
        assert!(!filters.accepts(Path::new("/code/go/vendor/lib")));
        assert!(!filters.accepts(Path::new("/code/vendored")));
        assert!(filters.accepts(Path::new("/code/app")));
    }

    #[test]
    fn test_include_overrides_exclude() {
        let filters = compile(&["ignored"], &["included"]);
        assert!(!filters.accepts(Path::new("/code/ignored")));
        assert!(filters.accepts(Path::new("/code/ignored_but_included")));
        assert!(filters.accepts(Path::new("/code/plain")));
    }

    #[test]
    fn test_empty_include_never_overrides() {
        let filters = compile(&[".*"], &[]);
        assert!(!filters.accepts(Path::new("/code/a")));
        assert!(!filters.is_included(Path::new("")));
    }

    #[test]
    fn test_multiple_patterns_are_alternatives() {
        let filters = compile(&["node_modules", "target$"], &[]);
        assert!(filters.is_excluded(Path::new("/code/web/node_modules")));
        assert!(filters.is_excluded(Path::new("/code/rust/target")));
        assert!(!filters.is_excluded(Path::new("/code/rust/target-specs")));
    }

    #[test]
    fn test_prune_only_without_includes() {
        let without_includes = compile(&["b/"], &[]);
        assert!(without_includes.prunes(Path::new("/root/b/c")));
        assert!(!without_includes.prunes(Path::new("/root/b")));

        let with_includes = compile(&[".*"], &["b/c"]);
        assert!(!with_includes.prunes(Path::new("/root/b")));
        assert!(!with_includes.accepts(Path::new("/root/a")));
        assert!(with_includes.accepts(Path::new("/root/b/c")));
    }

    #[test]
    fn test_beneath_excluded_needs_include_match() {
        let filters = compile(&["/skip$"], &["wanted"]);
        let nested = Path::new("/root/skip/deep/one");

        // The project path itself does not match the exclude
        assert!(filters.accepts(nested));
        assert!(!filters.accepts_beneath(nested, true));
        assert!(filters.accepts_beneath(Path::new("/root/skip/wanted"), true));
        assert!(filters.accepts_beneath(Path::new("/root/keep/three"), false));
    }

    #[test]
    fn test_malformed_pattern_is_configuration_error() {
        let err = Filters::new()
            .with_includes(["ok", "(unclosed"])
            .compile()
            .unwrap_err();

        assert!(err.is_configuration());
        let message = err.to_string();
        assert!(message.contains("include"), "got: {message}");
        assert!(message.contains("(unclosed"), "got: {message}");
    }
}
