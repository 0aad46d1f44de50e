//! `run` command: execute a program inside every project

use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use super::SearchContext;
use crate::core::config::{PATH_DISPLAY_WIDTH, SEPARATOR_WIDTH};
use crate::core::{find_all, NO_PROJECTS_MESSAGE};
use crate::utils::{set_terminal_title, set_terminal_title_and_flush, shorten_path};

/// Outcome of running a command across projects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    /// (project path, reason)
    pub failed: Vec<(PathBuf, String)>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed.len()
    }

    /// Detailed failure listing, empty when everything succeeded
    pub fn generate_detailed_summary(&self) -> String {
        if self.failed.is_empty() {
            return String::new();
        }

        let mut lines = Vec::new();
        lines.push(format!("🔴 FAILED ({} of {})", self.failed.len(), self.total()));
        for (i, (path, reason)) in self.failed.iter().enumerate() {
            let tree_char = if i == self.failed.len() - 1 { "└─" } else { "├─" };
            let short_path = shorten_path(&path.to_string_lossy(), PATH_DISPLAY_WIDTH);
            lines.push(format!(
                "   {} {:width$} # {}",
                tree_char,
                short_path,
                reason,
                width = PATH_DISPLAY_WIDTH
            ));
        }
        lines.join("\n")
    }
}

/// Runs `command` sequentially in each project directory, sorted by path.
///
/// The child inherits stdin, stdout and stderr. A project whose command
/// cannot be spawned or exits unsuccessfully is recorded in the summary and
/// the loop moves on.
pub async fn handle_run_command<W: Write>(
    context: &SearchContext,
    command: &[String],
    out: &mut W,
) -> Result<RunSummary> {
    let Some((program, arguments)) = command.split_first() else {
        anyhow::bail!("No command given");
    };

    let projects = find_all(&context.roots, &context.filters, &context.options).await?;
    let mut summary = RunSummary::default();
    if projects.is_empty() {
        eprintln!("{NO_PROJECTS_MESSAGE}");
        return Ok(summary);
    }

    set_terminal_title(&format!("🚀 projector run {program}"));
    for project in projects {
        writeln!(out, "\n\n{}:", project.display())?;
        out.flush()?;

        match run_in(&project, program, arguments).await {
            Ok(()) => summary.succeeded += 1,
            Err(reason) => {
                eprintln!("ERROR: {reason}");
                summary.failed.push((project, reason));
            }
        }
    }
    set_terminal_title_and_flush("✅ projector");

    let detailed_summary = summary.generate_detailed_summary();
    if !detailed_summary.is_empty() {
        writeln!(out, "\n{}", "━".repeat(SEPARATOR_WIDTH))?;
        writeln!(out, "{detailed_summary}")?;
        writeln!(out, "{}", "━".repeat(SEPARATOR_WIDTH))?;
    }

    Ok(summary)
}

async fn run_in(project: &Path, program: &str, arguments: &[String]) -> Result<(), String> {
    debug!(path = %project.display(), program, "running command");
    let status = Command::new(program)
        .args(arguments)
        .current_dir(project)
        .status()
        .await
        .map_err(|e| format!("unable to start {program}: {e}"))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("{program} exited with {status}"))
    }
}
