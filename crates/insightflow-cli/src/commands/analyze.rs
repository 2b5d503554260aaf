//! Analyze command implementation

use std::path::Path;

use anyhow::Result;
use insightflow_core::{
    render, AnalysisRequest, Category, GrowthStyle, InsightProvider, ProviderClient,
    RenderedReport, Section, Tier, Tone,
};

use super::{load_corpus, truncate};

/// Run one request -> render cycle and print the report
pub async fn cmd_analyze(
    provider: &ProviderClient,
    corpus_path: Option<&Path>,
    subject: &str,
    category: Category,
    tier: Tier,
    json: bool,
) -> Result<()> {
    let corpus = load_corpus(corpus_path)?;
    let request = AnalysisRequest::new(subject, corpus.reviews().to_vec(), category, tier)?;

    if !json {
        println!("🔍 Collected {} reviews", corpus.len());
        println!(
            "🤖 Analyzing with {} ({})...",
            provider.model(),
            provider.backend()
        );
        println!();
    }

    let insight = provider.request_insight(&request).await?;
    let rendered = render(&request.subject, &insight, request.category, request.tier)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        print!("{}", format_report(&rendered));
    }
    Ok(())
}

/// Format a rendered report for the terminal
pub fn format_report(rendered: &RenderedReport) -> String {
    let report = &rendered.report;
    let mut out = String::new();

    out.push_str(&format!(
        "📊 {} — {} report ({})\n",
        report.subject, report.tier, report.category
    ));
    out.push_str(&format!("   Brand health: {}/100\n", report.sentiment_score));

    for section in &report.sections {
        out.push('\n');
        match section {
            Section::Tags { title, items } => {
                out.push_str(&format!("🔥 {}: {}\n", title, items.join(" · ")));
            }
            Section::Panel { title, tone, items } => {
                let mark = match tone {
                    Tone::Positive => "✅",
                    Tone::Negative => "⚠️",
                };
                out.push_str(&format!("{} {}\n", mark, title));
                for item in items {
                    out.push_str(&format!("   - {}\n", item));
                }
            }
            Section::Consulting {
                issue_definition,
                root_cause,
                expected_impact,
                detail_page_advice,
                action_plan,
            } => {
                out.push_str("🎯 Consulting\n");
                out.push_str(&format!("   Issue:    {}\n", issue_definition));
                out.push_str(&format!("   Cause:    {}\n", root_cause));
                out.push_str(&format!("   Impact:   {}\n", expected_impact));
                out.push_str(&format!("   Copy:     {}\n", detail_page_advice));
                out.push_str("   Action plan:\n");
                out.push_str(&format!("     now       {}\n", action_plan.immediate));
                out.push_str(&format!("     mid-term  {}\n", action_plan.mid_term));
                out.push_str(&format!("     upsell    {}\n", action_plan.upsell));
            }
            Section::BenchmarkBars {
                metric,
                my_score,
                competitor_score,
                gap,
            } => {
                out.push_str(&format!("📐 Benchmark: {}\n", metric));
                out.push_str(&format!(
                    "   mine        {} {}\n",
                    score_bar(*my_score),
                    my_score
                ));
                out.push_str(&format!(
                    "   competitor  {} {}   (gap {})\n",
                    score_bar(*competitor_score),
                    competitor_score,
                    gap
                ));
            }
            Section::RevenueTable { rows } => {
                out.push_str("💰 Revenue by item\n");
                for row in rows {
                    let arrow = match row.growth_style {
                        GrowthStyle::Positive => "▲",
                        GrowthStyle::Negative => "▼",
                    };
                    out.push_str(&format!(
                        "   {}  {} KRW  {} {}\n",
                        row.item, row.revenue_display, arrow, row.growth_label
                    ));
                }
            }
            Section::PeakHours { text } => {
                out.push_str(&format!("⏰ Peak hours: {}\n", text));
            }
            Section::Quotes { reviews } => {
                out.push_str("💬 Representative reviews\n");
                for review in reviews {
                    out.push_str(&format!(
                        "   [{}] {}\n",
                        review.rating,
                        truncate(&review.comment, 60)
                    ));
                }
            }
            Section::TrendChart { bars } => {
                out.push_str("📉 Monthly trend\n");
                for bar in bars {
                    out.push_str(&format!(
                        "   M{} │{} {}\n",
                        bar.month_index + 1,
                        trend_bar(bar.value),
                        bar.value
                    ));
                }
            }
        }
    }

    if let Some(ref alert) = rendered.alert {
        out.push('\n');
        out.push_str(&format!("🚨 URGENT: {}\n", alert.message));
    }

    out
}

/// Horizontal bar for a 0-100 score, one block per 5 points
fn score_bar(score: u8) -> String {
    "█".repeat((score / 5) as usize)
}

/// Horizontal bar for a trend index value; bar length tracks the value
fn trend_bar(value: i64) -> String {
    "█".repeat((value.max(0) / 5) as usize)
}
