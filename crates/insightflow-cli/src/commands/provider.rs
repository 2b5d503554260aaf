//! Provider-related command implementations

use std::path::Path;

use anyhow::Result;
use insightflow_core::{AnalysisRequest, Category, InsightProvider, ProviderClient, Tier};

use super::load_corpus;

/// Test the configured provider: health check plus one analysis round
/// trip
pub async fn cmd_provider_test(
    provider: &ProviderClient,
    corpus_path: Option<&Path>,
    subject: &str,
) -> Result<()> {
    println!("🔍 Testing insight provider...\n");
    println!("  Backend: {}", provider.backend());
    println!("  Host:    {}", provider.host());
    println!("  Model:   {}", provider.model());
    println!();

    // Health check
    print!("Checking provider availability... ");
    if provider.health_check().await {
        println!("✅ Connected");
    } else {
        println!("❌ Failed");
        println!("\n⚠️  Could not reach the provider at {}", provider.host());
        println!("\nTo use a remote provider:");
        println!("  1. Set INSIGHTFLOW_API_KEY to your credential");
        println!("  2. Optionally set INSIGHTFLOW_API_HOST and INSIGHTFLOW_MODEL");
        println!("  3. Or set INSIGHTFLOW_PROVIDER=stub for the demo stub");
        return Ok(());
    }

    // One basic-tier round trip
    let corpus = load_corpus(corpus_path)?;
    println!("\n📋 Running a basic analysis for \"{}\"...\n", subject);

    let request = AnalysisRequest::new(
        subject,
        corpus.reviews().to_vec(),
        Category::Store,
        Tier::Basic,
    )?;

    match provider.request_insight(&request).await {
        Ok(insight) => {
            println!("  Sentiment:     {}/100", insight.sentiment_score);
            println!("  Popular items: {}", insight.popular_items.join(", "));
            println!(
                "  Strengths/risks: {}/{}",
                insight.strengths.len(),
                insight.risks.len()
            );
            if insight.has_urgent_issue() {
                println!("  Urgent issue:  {}", insight.urgent_issue);
            } else {
                println!("  Urgent issue:  (none)");
            }
        }
        Err(e) => {
            println!("  ❌ Error: {}", e);
        }
    }

    println!("\n✅ Provider test complete!");
    Ok(())
}
