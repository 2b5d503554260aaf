//! InsightFlow CLI - Review analysis dashboard
//!
//! Usage:
//!   insightflow analyze --subject "연남동 카페"   Run one analysis and print the report
//!   insightflow serve --port 3000                Start the web server
//!   insightflow corpus                           Validate the review corpus
//!   insightflow provider test                    Check the configured provider

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use insightflow_core::ProviderClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    // Stub vs remote is decided here, once, from the environment
    let provider = ProviderClient::from_env();

    match cli.command {
        Commands::Analyze {
            subject,
            category,
            tier,
            json,
        } => {
            let category = category.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let tier = tier.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            commands::cmd_analyze(
                &provider,
                cli.corpus.as_deref(),
                &subject,
                category,
                tier,
                json,
            )
            .await
        }
        Commands::Serve {
            port,
            host,
            static_dir,
            origin,
        } => {
            commands::cmd_serve(
                provider,
                cli.corpus.as_deref(),
                &host,
                port,
                static_dir.as_deref(),
                origin,
            )
            .await
        }
        Commands::Corpus => commands::cmd_corpus(cli.corpus.as_deref()),
        Commands::Prompts { action } => match action {
            None | Some(PromptsAction::List) => commands::cmd_prompts_list(),
            Some(PromptsAction::Show { prompt_id }) => commands::cmd_prompts_show(&prompt_id),
            Some(PromptsAction::Path) => commands::cmd_prompts_path(),
        },
        Commands::Provider { action } => match action {
            ProviderAction::Test { subject } => {
                commands::cmd_provider_test(&provider, cli.corpus.as_deref(), &subject).await
            }
        },
    }
}
