//! `list` command: print projects as they are discovered

use anyhow::{Context, Result};
use std::io::{self, Write};

use super::SearchContext;
use crate::core::{find, find_all, Completion, Flow};
use crate::git::filter_dirty;

/// Prints every project under the context's roots, one per line.
///
/// Projects are written as soon as the walker reports them. A closed output
/// (for example `projector list | head`) stops the search instead of failing.
/// With `dirty_only` the projects are collected first, checked with git
/// concurrently, and printed in path order.
///
/// Returns the number of projects written.
pub async fn handle_list_command<W: Write>(
    context: &SearchContext,
    dirty_only: bool,
    out: &mut W,
) -> Result<usize> {
    if dirty_only {
        return list_dirty(context, out).await;
    }

    let mut written = 0usize;
    let completion = find(&context.roots, &context.filters, &context.options, |project| {
        match writeln!(out, "{}", project.display()) {
            Ok(()) => {
                written += 1;
                Ok(Flow::Continue)
            }
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(Flow::Stop),
            Err(e) => Err(e).context("unable to write project"),
        }
    })
    .await?;

    if completion == Completion::Exhausted {
        flush(out)?;
    }
    Ok(written)
}

async fn list_dirty<W: Write>(context: &SearchContext, out: &mut W) -> Result<usize> {
    let projects = find_all(&context.roots, &context.filters, &context.options).await?;
    let dirty = filter_dirty(projects, context.options.concurrency).await;

    let mut written = 0usize;
    for project in &dirty {
        match writeln!(out, "{}", project.display()) {
            Ok(()) => written += 1,
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(written),
            Err(e) => return Err(e).context("unable to write project"),
        }
    }
    flush(out)?;
    Ok(written)
}

fn flush<W: Write>(out: &mut W) -> Result<()> {
    match out.flush() {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
            Err(e).context("unable to flush output")
        }
        _ => Ok(()),
    }
}
