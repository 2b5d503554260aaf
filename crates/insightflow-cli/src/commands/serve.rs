//! Serve command implementation

use std::path::Path;

use anyhow::Result;
use insightflow_core::ProviderClient;
use insightflow_server::ServerConfig;

use super::load_corpus;

/// Start the web server
pub async fn cmd_serve(
    provider: ProviderClient,
    corpus_path: Option<&Path>,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    origins: Vec<String>,
) -> Result<()> {
    // The corpus is loaded once here and held immutable for the server's
    // lifetime
    let corpus = load_corpus(corpus_path)?;
    println!("📚 Loaded {} reviews", corpus.len());

    let config = ServerConfig {
        allowed_origins: origins,
    };

    let static_dir = static_dir.map(|p| p.display().to_string());

    insightflow_server::serve(
        corpus,
        provider,
        host,
        port,
        static_dir.as_deref(),
        config,
    )
    .await
}
