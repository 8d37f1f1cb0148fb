//! docs-qa: ask the documentation search service from the terminal.
//! Reads config, sends the question given as argument (or each stdin line),
//! prints the answer with its source. In the stdin loop `+` / `-` rates the
//! last answer.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use docs_qa_client::{config, ChatPanel, SearchClient};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "docs-qa", version, about = "Ask the documentation search service")]
struct Cli {
    /// Config file (defaults to $DOCS_QA_CONFIG, then ~/.docs-qa/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Question to ask; omit to read questions from stdin
    question: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("docs_qa_client=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config_path = config::resolve_config_path(cli.config.as_deref())
        .context("unable to determine config path (set --config or DOCS_QA_CONFIG)")?;
    let cfg = config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let client = SearchClient::from_config(&cfg)?;
    let panel = ChatPanel::new(client, cfg.notify.on_answer);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create runtime")?;

    rt.block_on(async {
        if cli.question.is_empty() {
            interactive(&panel).await?;
        } else {
            let question = cli.question.join(" ");
            let exchange = panel.submit(question.trim()).await;
            println!("{}", exchange.reply);
        }
        panel.drain_notifications().await;
        Ok(())
    })
}

/// Reads stdin asynchronously so notification tasks keep running while the
/// user is typing.
async fn interactive(panel: &ChatPanel) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => continue,
            rating @ ("+" | "-") => match panel.last_answered() {
                Some(id) if panel.feedback(id, rating == "+") => println!("Thanks for the feedback!"),
                Some(_) => println!("Feedback is not configured."),
                None => println!("Nothing to rate yet."),
            },
            question => {
                let exchange = panel.submit(question).await;
                println!("{}", exchange.reply);
            }
        }
        io::stdout().flush()?;
    }
    Ok(())
}
