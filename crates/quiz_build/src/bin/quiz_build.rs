//! quiz-build: pre-render quiz markdown under a docs tree.
//! `*quiz-source.md` → `*quiz.md` by default, `*.md` → `*.html` with `--html`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quiz_build::walk::DEFAULT_SKIP_PREFIX;
use quiz_build::{run_batch, BatchOptions, Naming};

#[derive(Debug, Parser)]
#[command(name = "quiz-build", version, about = "Pre-render documentation quizzes")]
struct Cli {
    /// Root of the docs tree
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Render every `*.md` to a sibling `*.html` instead of quiz sources
    #[arg(long)]
    html: bool,

    /// Skip subdirectories whose name starts with this prefix
    #[arg(long, default_value = DEFAULT_SKIP_PREFIX)]
    skip_prefix: String,

    /// List outputs without writing them
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quiz_build=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let options = BatchOptions {
        naming: if cli.html { Naming::html() } else { Naming::quiz() },
        skip_prefix: cli.skip_prefix,
        dry_run: cli.dry_run,
        ..BatchOptions::default()
    };

    let report = run_batch(&cli.root, &options)
        .with_context(|| format!("failed to scan {}", cli.root.display()))?;

    for (_, output) in &report.written {
        println!("{}", output.display());
    }
    println!(
        "{} {}, {} failed",
        report.written.len(),
        if cli.dry_run { "to write" } else { "written" },
        report.failed.len()
    );
    Ok(())
}
