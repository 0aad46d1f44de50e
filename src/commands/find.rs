//! `find` command: pick the project whose path best matches a search regex
//!
//! Candidates are scored by where the first match ends relative to the path
//! length, so `proj` prefers `/code/proj` over `/code/proj/docs` and over
//! `/code/proj-old`. `--reverse` prefers the leftmost match instead.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rayon::prelude::*;
use regex::Regex;
use std::cmp::Ordering;
use std::io::Write;
use std::time::Duration;

use super::SearchContext;
use crate::core::config::{SPINNER_TEMPLATE, SPINNER_TICK_MS};
use crate::core::{find, Flow, NO_MATCH_MESSAGE, SCANNING_MESSAGE};

/// Flags for the find command
#[derive(Debug, Clone, Copy, Default)]
pub struct FindArgs {
    /// Prefer the leftmost match instead of the rightmost
    pub reverse: bool,
    /// Print every match, best first
    pub verbose: bool,
    /// Stop at the first matching project instead of ranking all of them
    pub first: bool,
    /// Show a spinner on stderr while scanning
    pub progress: bool,
}

/// A project path that matched the search, with its score
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatch {
    pub path: String,
    pub score: f64,
}

/// Score of `path` for `rgx`: match end divided by path length
pub fn match_score(path: &str, rgx: &Regex) -> Option<f64> {
    if path.is_empty() {
        return None;
    }
    rgx.find(path).map(|m| m.end() as f64 / path.len() as f64)
}

/// Returns the matching projects, best candidate first.
///
/// Higher scores win (lower with `reverse`); equal scores prefer the shorter
/// path.
pub fn rank_matches(projects: &[String], rgx: &Regex, reverse: bool) -> Vec<RankedMatch> {
    let mut ranked: Vec<RankedMatch> = projects
        .par_iter()
        .filter_map(|path| {
            match_score(path, rgx).map(|score| RankedMatch {
                path: path.clone(),
                score,
            })
        })
        .collect();

    ranked.par_sort_by(|a, b| {
        let by_score = if reverse {
            a.score.total_cmp(&b.score)
        } else {
            b.score.total_cmp(&a.score)
        };
        match by_score {
            Ordering::Equal => a.path.len().cmp(&b.path.len()).then_with(|| a.path.cmp(&b.path)),
            other => other,
        }
    });
    ranked
}

/// The single best match, if any
pub fn best_match(projects: &[String], rgx: &Regex, reverse: bool) -> Option<String> {
    rank_matches(projects, rgx, reverse)
        .into_iter()
        .next()
        .map(|m| m.path)
}

/// Handles `projector find SEARCH...`
pub async fn handle_find_command<W: Write>(
    context: &SearchContext,
    search: &[String],
    args: FindArgs,
    out: &mut W,
) -> Result<()> {
    let search_term = search.join(" ");
    let rgx = Regex::new(&search_term).with_context(|| format!("invalid regex: {search_term}"))?;

    let spinner = create_spinner(args.progress);
    let mut projects: Vec<String> = Vec::new();

    find(&context.roots, &context.filters, &context.options, |project| {
        let path = project.to_string_lossy().into_owned();
        if !rgx.is_match(&path) {
            return Ok(Flow::Continue);
        }

        projects.push(path);
        spinner.set_message(format!("{} {} matched", SCANNING_MESSAGE, projects.len()));
        if args.first {
            Ok(Flow::Stop)
        } else {
            Ok(Flow::Continue)
        }
    })
    .await?;
    spinner.finish_and_clear();

    if projects.is_empty() {
        anyhow::bail!(NO_MATCH_MESSAGE);
    }

    if args.verbose {
        for ranked in rank_matches(&projects, &rgx, args.reverse) {
            writeln!(out, "{}", ranked.path)?;
        }
        return Ok(());
    }

    if let Some(best) = best_match(&projects, &rgx, args.reverse) {
        writeln!(out, "{best}")?;
    }
    Ok(())
}

fn create_spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
        spinner.set_style(style);
    }
    spinner.set_message(SCANNING_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    spinner
}
