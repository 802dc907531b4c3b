//! branch-sync - keeps a feature branch's `feature/test/<name>` counterpart
//! synchronized and ensures a review request into the shared `test` branch.

mod adapters;

use adapters::{GhReviewService, GitWorkingCopy};
use anyhow::Context;
use branch_sync_orchestrator::{resolve, run, ReviewOutcome};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Branch synchronization command-line interface.
#[derive(Parser)]
#[command(name = "branch-sync")]
#[command(about = "Sync the current feature branch into its feature/test counterpart")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Repository working copy to operate on. Defaults to the current directory
    #[arg(long)]
    repo: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    if let Err(err) = sync(cli).await {
        error!("branch sync failed: {err:#}");
        std::process::exit(1);
    }
}

async fn sync(cli: Cli) -> anyhow::Result<()> {
    let repo = match cli.repo {
        Some(path) => path,
        None => std::env::current_dir().context("failed to resolve the current directory")?,
    };

    let current = git_cli_ops::current_branch(&repo)
        .await
        .context("failed to read the current branch")?;
    info!(branch = %current, "current branch");

    let plan = resolve(&current)?;

    let mut working_copy = GitWorkingCopy::new(repo.clone());
    let review_service = GhReviewService::new(repo);

    let report = run(&mut working_copy, &review_service, &plan).await?;

    match &report.review {
        ReviewOutcome::Created { url } => info!(url = %url, "review request created"),
        ReviewOutcome::AlreadyExists { number, .. } => {
            info!(number = number, "review request already open")
        }
        ReviewOutcome::ServiceUnavailable { .. } => info!(
            target = %report.target_branch,
            "branch pushed; create the review request manually or install the GitHub CLI"
        ),
    }
    info!(
        target = %report.target_branch,
        action = ?report.action,
        "all steps completed; branch synchronized"
    );

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
