//! Tier contract validation at the provider boundary
//!
//! The completion provider is trusted for structure only as far as serde
//! gets us; everything the renderer will read for the requested tier is
//! checked here so a malformed payload fails as a contract violation
//! instead of rendering as missing content.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{Insight, Tier};

fn growth_label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+-]\d+%$").expect("valid growth label pattern"))
}

/// Length of the monthly trend series
pub const TREND_MONTHS: usize = 6;

/// Validate an insight against the shape its tier requires
///
/// Missing or out-of-range required fields return
/// [`Error::ContractViolation`]. A `growth_label` that does not match
/// `[+-]\d+%` is logged but accepted: the renderer's coloring rule is a
/// pass-through on the leading character, not a validated enum.
pub fn validate_for_tier(insight: &Insight, tier: Tier) -> Result<()> {
    // Basic shape, required at every tier
    if insight.popular_items.is_empty() {
        return Err(violation("popularItems is empty"));
    }
    if insight.strengths.is_empty() {
        return Err(violation("strengths is empty"));
    }
    if insight.risks.is_empty() {
        return Err(violation("risks is empty"));
    }
    if insight.sentiment_score > 100 {
        return Err(violation(&format!(
            "sentimentScore {} outside 0..=100",
            insight.sentiment_score
        )));
    }

    if tier >= Tier::Trend {
        if insight.revenue_by_item.is_empty() {
            return Err(violation("revenueByItem is empty for trend tier"));
        }
        if insight.representative_reviews.is_empty() {
            return Err(violation("representativeReviews is empty for trend tier"));
        }
        if insight.peak_hours.trim().is_empty() {
            return Err(violation("peakHours is empty for trend tier"));
        }
        if insight.monthly_trend.len() != TREND_MONTHS {
            return Err(violation(&format!(
                "monthlyTrend has {} entries, expected {}",
                insight.monthly_trend.len(),
                TREND_MONTHS
            )));
        }
        for review in &insight.representative_reviews {
            if !(1..=5).contains(&review.rating) {
                return Err(violation(&format!(
                    "representative review rating {} outside 1..=5",
                    review.rating
                )));
            }
        }
        for row in &insight.revenue_by_item {
            if !growth_label_pattern().is_match(&row.growth_label) {
                warn!(
                    item = %row.item,
                    growth_label = %row.growth_label,
                    "growth label does not match [+-]N%, passing through"
                );
            }
        }
    }

    if tier >= Tier::Consulting {
        require_text(insight.issue_definition.as_deref(), "issueDefinition")?;
        require_text(insight.root_cause.as_deref(), "rootCause")?;
        require_text(insight.expected_impact.as_deref(), "expectedImpact")?;
        require_text(insight.detail_page_advice.as_deref(), "detailPageAdvice")?;
        if insight.action_plan.is_none() {
            return Err(violation("actionPlan is missing for consulting tier"));
        }
        let benchmark = insight
            .benchmark
            .as_ref()
            .ok_or_else(|| violation("benchmark is missing for consulting tier"))?;
        if benchmark.my_score > 100 || benchmark.competitor_score > 100 {
            return Err(violation("benchmark scores outside 0..=100"));
        }
        let expected_gap = i16::from(benchmark.my_score) - i16::from(benchmark.competitor_score);
        if benchmark.gap != expected_gap {
            return Err(violation(&format!(
                "benchmark gap {} does not equal myScore - competitorScore ({})",
                benchmark.gap, expected_gap
            )));
        }
    }

    Ok(())
}

fn require_text(value: Option<&str>, field: &str) -> Result<()> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(violation(&format!("{} is missing for consulting tier", field))),
    }
}

fn violation(detail: &str) -> Error {
    Error::ContractViolation(detail.to_string())
}
