//! projector: find and operate on version-controlled projects
//!
//! Scans code directories for git repositories and lists them, picks the best
//! match for a search, or runs a command in each of them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use projector::commands::find::{handle_find_command, FindArgs};
use projector::commands::list::handle_list_command;
use projector::commands::run::handle_run_command;
use projector::commands::SearchContext;
use projector::core::{Settings, CODE_DIR_ENV, NO_PROJECTS_MESSAGE};

#[derive(Parser)]
#[command(author, version, about = "A code repository manager", long_about = None)]
struct Cli {
    /// A regex which will be used to include directories. Overrides
    /// excludes, so a directory matched by both is included.
    #[arg(short, long, global = true)]
    includes: Vec<String>,

    /// A regex which will be used to exclude directories.
    #[arg(short, long, global = true)]
    excludes: Vec<String>,

    /// A directory to search for projects. Can be repeated. Also configurable
    /// with the CODE_DIR environment variable.
    #[arg(short, long = "code-dir", global = true)]
    code_dir: Vec<String>,

    /// Maximum number of concurrent filesystem or git operations
    #[arg(short, long, global = true)]
    jobs: Option<usize>,

    /// Use this config file instead of searching the default locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (and print every match for find)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all projects projector would operate on
    List {
        /// Only list projects with a dirty git state
        #[arg(short, long)]
        dirty: bool,
    },

    /// Find projects by matching their paths. If multiple projects match
    /// SEARCH then prints the path with the rightmost match.
    #[command(visible_aliases = ["f", "search"])]
    Find {
        /// Find the leftmost match instead of the rightmost match
        #[arg(short, long)]
        reverse: bool,

        /// Stop at the first project that matches
        #[arg(long)]
        first: bool,

        #[arg(required = true)]
        search: Vec<String>,
    },

    /// Run a command on all matching projects
    #[command(visible_alias = "x")]
    Run {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("projector=debug,warn")
        } else {
            EnvFilter::new("projector=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())
        .context("unable to load configuration")?
        .with_env_code_dir(std::env::var(CODE_DIR_ENV).ok())
        .with_overrides(cli.code_dir, cli.excludes, cli.includes, cli.jobs);
    let context = SearchContext::from_settings(&settings, dirs::home_dir().as_deref());
    debug!(roots = ?context.roots, "resolved search roots");

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::List { dirty } => {
            let written = handle_list_command(&context, dirty, &mut stdout).await?;
            if written == 0 {
                eprintln!("{NO_PROJECTS_MESSAGE}");
            }
        }
        Commands::Find {
            reverse,
            first,
            search,
        } => {
            let args = FindArgs {
                reverse,
                verbose: cli.verbose,
                first,
                progress: io::stderr().is_terminal(),
            };
            handle_find_command(&context, &search, args, &mut stdout).await?;
        }
        Commands::Run { command } => {
            let summary = handle_run_command(&context, &command, &mut stdout).await?;
            if !summary.failed.is_empty() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
