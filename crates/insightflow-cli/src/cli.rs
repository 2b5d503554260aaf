//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// InsightFlow - Turn customer reviews into an insight dashboard
#[derive(Parser)]
#[command(name = "insightflow")]
#[command(about = "AI review analysis for small business owners", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Review corpus JSON file (defaults to the embedded demo corpus)
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze the review corpus for a subject and print the report
    Analyze {
        /// Business or listing name
        #[arg(short, long)]
        subject: String,

        /// Analysis profile: store, mall
        #[arg(short, long, default_value = "store")]
        category: String,

        /// Analysis tier: basic, trend, consulting
        #[arg(short, long, default_value = "consulting")]
        tier: String,

        /// Print the rendered report as JSON instead of the terminal view
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origin (repeatable)
        #[arg(long)]
        origin: Vec<String>,
    },

    /// Validate and summarize the review corpus
    Corpus,

    /// Manage analysis prompts (list, show, path)
    Prompts {
        #[command(subcommand)]
        action: Option<PromptsAction>,
    },

    /// Test the configured insight provider
    Provider {
        #[command(subcommand)]
        action: ProviderAction,
    },
}

#[derive(Subcommand)]
pub enum PromptsAction {
    /// List all prompts and their override status
    List,
    /// Show the content of a specific prompt
    Show {
        /// Prompt ID (e.g., analyze_basic)
        prompt_id: String,
    },
    /// Show the prompt override directory path
    Path,
}

#[derive(Subcommand)]
pub enum ProviderAction {
    /// Health check plus one analysis round trip
    Test {
        /// Subject for the test analysis
        #[arg(short, long, default_value = "연남동 카페")]
        subject: String,
    },
}
