//! Insight renderer
//!
//! Pure projection from a tier-complete [`Insight`] into a presentation
//! tree plus the derived urgent-issue alert. No I/O, no clock: rendering
//! the same inputs twice yields the same tree.
//!
//! Missing optional fields omit their section. A field the requested
//! tier requires being absent is a contract violation upstream and fails
//! loudly here rather than rendering empty content.

use serde::{Deserialize, Serialize};

use crate::contract::validate_for_tier;
use crate::error::Result;
use crate::models::{ActionPlan, Category, Insight, Review, Tier};

/// Visual tone of a list panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
}

/// Growth label coloring, decided by the label's leading character
///
/// `+` maps to positive; any other leading character (including `-` and
/// unexpected characters) maps to negative. A pass-through rule, not a
/// validated enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStyle {
    Positive,
    Negative,
}

impl GrowthStyle {
    pub fn from_label(label: &str) -> Self {
        match label.chars().next() {
            Some('+') => Self::Positive,
            _ => Self::Negative,
        }
    }
}

/// One row of the revenue table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueRow {
    pub item: String,
    pub revenue: u64,
    /// Amount with thousands separators, e.g. "4,200,000"
    pub revenue_display: String,
    pub growth_label: String,
    pub growth_style: GrowthStyle,
}

/// One bar of the monthly trend chart; bar height equals `value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendBar {
    /// 0-based position, oldest month first
    pub month_index: usize,
    pub value: i64,
}

/// A section of the rendered report, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    /// Popular item tag list
    Tags { title: String, items: Vec<String> },
    /// Strengths or risks list panel
    Panel {
        title: String,
        tone: Tone,
        items: Vec<String>,
    },
    /// Consulting deep-dive block
    Consulting {
        issue_definition: String,
        root_cause: String,
        expected_impact: String,
        detail_page_advice: String,
        action_plan: ActionPlan,
    },
    /// Benchmark bar pair
    BenchmarkBars {
        metric: String,
        my_score: u8,
        competitor_score: u8,
        gap: i16,
    },
    /// Revenue table, one row per item
    RevenueTable { rows: Vec<RevenueRow> },
    /// Peak visiting/ordering hours
    PeakHours { text: String },
    /// Representative customer quotes
    Quotes { reviews: Vec<Review> },
    /// Monthly trend bar chart
    TrendChart { bars: Vec<TrendBar> },
}

/// The rendered report: header fields plus ordered sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub subject: String,
    pub category: Category,
    pub tier: Tier,
    /// 0..=100, shown in the header next to the subject
    pub sentiment_score: u8,
    pub sections: Vec<Section>,
}

/// Urgent-issue alert, displayed as a dismissible banner
///
/// Dismissal is a caller-local UI action, not part of this contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPayload {
    pub message: String,
}

/// A report plus its derived alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedReport {
    pub report: Report,
    pub alert: Option<AlertPayload>,
}

/// Project an insight into a presentation tree
///
/// Every populated field appears exactly once. Emits one alert payload
/// iff `urgent_issue` is non-empty.
pub fn render(
    subject: &str,
    insight: &Insight,
    category: Category,
    tier: Tier,
) -> Result<RenderedReport> {
    validate_for_tier(insight, tier)?;

    let mut sections = Vec::new();

    sections.push(Section::Tags {
        title: "인기 키워드".to_string(),
        items: insight.popular_items.clone(),
    });
    sections.push(Section::Panel {
        title: "핵심 강점".to_string(),
        tone: Tone::Positive,
        items: insight.strengths.clone(),
    });
    sections.push(Section::Panel {
        title: "리스크 요소".to_string(),
        tone: Tone::Negative,
        items: insight.risks.clone(),
    });

    // Consulting block only when the deep-dive fields are present
    if let (
        Some(issue_definition),
        Some(root_cause),
        Some(expected_impact),
        Some(detail_page_advice),
        Some(action_plan),
    ) = (
        insight.issue_definition.as_ref(),
        insight.root_cause.as_ref(),
        insight.expected_impact.as_ref(),
        insight.detail_page_advice.as_ref(),
        insight.action_plan.as_ref(),
    ) {
        sections.push(Section::Consulting {
            issue_definition: issue_definition.clone(),
            root_cause: root_cause.clone(),
            expected_impact: expected_impact.clone(),
            detail_page_advice: detail_page_advice.clone(),
            action_plan: action_plan.clone(),
        });
    }

    if let Some(benchmark) = insight.benchmark.as_ref() {
        sections.push(Section::BenchmarkBars {
            metric: benchmark.metric.clone(),
            my_score: benchmark.my_score,
            competitor_score: benchmark.competitor_score,
            gap: benchmark.gap,
        });
    }

    if !insight.revenue_by_item.is_empty() {
        let rows = insight
            .revenue_by_item
            .iter()
            .map(|entry| RevenueRow {
                item: entry.item.clone(),
                revenue: entry.revenue,
                revenue_display: format_thousands(entry.revenue),
                growth_label: entry.growth_label.clone(),
                growth_style: GrowthStyle::from_label(&entry.growth_label),
            })
            .collect();
        sections.push(Section::RevenueTable { rows });
    }

    if !insight.peak_hours.trim().is_empty() {
        sections.push(Section::PeakHours {
            text: insight.peak_hours.clone(),
        });
    }

    if !insight.representative_reviews.is_empty() {
        sections.push(Section::Quotes {
            reviews: insight.representative_reviews.clone(),
        });
    }

    if !insight.monthly_trend.is_empty() {
        let bars = insight
            .monthly_trend
            .iter()
            .enumerate()
            .map(|(month_index, &value)| TrendBar { month_index, value })
            .collect();
        sections.push(Section::TrendChart { bars });
    }

    let alert = if insight.has_urgent_issue() {
        Some(AlertPayload {
            message: insight.urgent_issue.clone(),
        })
    } else {
        None
    };

    Ok(RenderedReport {
        report: Report {
            subject: subject.to_string(),
            category,
            tier,
            sentiment_score: insight.sentiment_score,
            sections,
        },
        alert,
    })
}

/// Format an amount with thousands separators: 4200000 -> "4,200,000"
pub fn format_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::TREND_MONTHS;
    use crate::error::Error;
    use crate::provider::StubProvider;

    fn store_insight() -> Insight {
        StubProvider::canned_insight(Category::Store)
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(4_200_000), "4,200,000");
        assert_eq!(format_thousands(1_234_567_890), "1,234,567,890");
    }

    #[test]
    fn test_growth_style_pass_through() {
        assert_eq!(GrowthStyle::from_label("+12%"), GrowthStyle::Positive);
        assert_eq!(GrowthStyle::from_label("-5%"), GrowthStyle::Negative);
        // Unexpected leading characters fall through to negative
        assert_eq!(GrowthStyle::from_label("~3%"), GrowthStyle::Negative);
        assert_eq!(GrowthStyle::from_label(""), GrowthStyle::Negative);
    }

    #[test]
    fn test_render_is_idempotent() {
        let insight = store_insight();
        let a = render("연남동 카페", &insight, Category::Store, Tier::Consulting).unwrap();
        let b = render("연남동 카페", &insight, Category::Store, Tier::Consulting).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_alert_emitted_iff_urgent_issue() {
        let insight = store_insight();
        let rendered = render("카페", &insight, Category::Store, Tier::Basic).unwrap();
        let alert = rendered.alert.expect("urgent issue should raise an alert");
        assert_eq!(alert.message, insight.urgent_issue);

        let mut quiet = store_insight();
        quiet.urgent_issue.clear();
        let rendered = render("카페", &quiet, Category::Store, Tier::Basic).unwrap();
        assert!(rendered.alert.is_none());
    }

    #[test]
    fn test_revenue_rows_and_trend_bars_counts() {
        let insight = store_insight();
        let rendered = render("카페", &insight, Category::Store, Tier::Trend).unwrap();

        let rows = rendered
            .report
            .sections
            .iter()
            .find_map(|s| match s {
                Section::RevenueTable { rows } => Some(rows),
                _ => None,
            })
            .expect("revenue table present");
        assert_eq!(rows.len(), insight.revenue_by_item.len());
        assert_eq!(rows[0].revenue_display, "4,200,000");

        let bars = rendered
            .report
            .sections
            .iter()
            .find_map(|s| match s {
                Section::TrendChart { bars } => Some(bars),
                _ => None,
            })
            .expect("trend chart present");
        assert_eq!(bars.len(), TREND_MONTHS);
        assert_eq!(bars[5].value, insight.monthly_trend[5]);
    }

    #[test]
    fn test_basic_tier_omits_optional_sections() {
        let mut insight = store_insight();
        insight.revenue_by_item.clear();
        insight.representative_reviews.clear();
        insight.peak_hours.clear();
        insight.monthly_trend.clear();
        insight.issue_definition = None;
        insight.root_cause = None;
        insight.expected_impact = None;
        insight.detail_page_advice = None;
        insight.action_plan = None;
        insight.benchmark = None;

        let rendered = render("카페", &insight, Category::Store, Tier::Basic).unwrap();
        // Tags plus the two panels only
        assert_eq!(rendered.report.sections.len(), 3);
    }

    #[test]
    fn test_missing_required_field_fails_loudly() {
        let mut insight = store_insight();
        insight.monthly_trend.pop();
        let err = render("카페", &insight, Category::Store, Tier::Trend).unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
    }

    #[test]
    fn test_every_populated_field_appears_once() {
        let insight = store_insight();
        let rendered = render("카페", &insight, Category::Store, Tier::Consulting).unwrap();
        let sections = &rendered.report.sections;

        let count = |matcher: fn(&Section) -> bool| sections.iter().filter(|s| matcher(s)).count();
        assert_eq!(count(|s| matches!(s, Section::Tags { .. })), 1);
        assert_eq!(count(|s| matches!(s, Section::Panel { .. })), 2);
        assert_eq!(count(|s| matches!(s, Section::Consulting { .. })), 1);
        assert_eq!(count(|s| matches!(s, Section::BenchmarkBars { .. })), 1);
        assert_eq!(count(|s| matches!(s, Section::RevenueTable { .. })), 1);
        assert_eq!(count(|s| matches!(s, Section::PeakHours { .. })), 1);
        assert_eq!(count(|s| matches!(s, Section::Quotes { .. })), 1);
        assert_eq!(count(|s| matches!(s, Section::TrendChart { .. })), 1);
    }
}
