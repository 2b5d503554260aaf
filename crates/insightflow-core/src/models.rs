//! Domain models for InsightFlow
//!
//! The `Insight` struct is the response contract shared between the
//! provider (which produces it) and the renderer (which projects it).
//! Wire field names are camelCase to match the completion provider's
//! JSON output schema as stated in the prompt templates.

use serde::{Deserialize, Serialize};

/// A single customer review
///
/// Immutable; sourced from a static corpus. Identity is positional,
/// reviews carry no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Star rating, 1..=5
    pub rating: u8,
    pub comment: String,
}

impl Review {
    pub fn new(rating: u8, comment: impl Into<String>) -> Self {
        Self {
            rating,
            comment: comment.into(),
        }
    }

    /// The serialization embedded into analysis prompts
    pub fn prompt_line(&self) -> String {
        format!("[rating {}] {}", self.rating, self.comment)
    }
}

/// Analysis profile: physical business vs. e-commerce listing
///
/// Alters vocabulary and canned stub content only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Store,
    Mall,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::Mall => "mall",
        }
    }

    /// Human-readable label used in prompts
    pub fn label(&self) -> &'static str {
        match self {
            Self::Store => "physical store",
            Self::Mall => "online mall listing",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "store" => Ok(Self::Store),
            "mall" => Ok(Self::Mall),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Analysis tier, controlling which `Insight` fields are required
///
/// The requester and renderer must agree on the tier so the renderer
/// never reads an absent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Tags, strengths/risks, sentiment, urgent issue
    Basic,
    /// Basic plus revenue table, quotes, peak hours, monthly trend
    Trend,
    /// Trend plus issue deep-dive, action plan, benchmark
    Consulting,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Trend => "trend",
            Self::Consulting => "consulting",
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "trend" => Ok(Self::Trend),
            "consulting" => Ok(Self::Consulting),
            _ => Err(format!("Unknown tier: {}", s)),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One analysis request, constructed once per user action
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub subject: String,
    pub reviews: Vec<Review>,
    pub category: Category,
    pub tier: Tier,
}

impl AnalysisRequest {
    /// Build a request, rejecting blank subjects before any provider call
    pub fn new(
        subject: impl Into<String>,
        reviews: Vec<Review>,
        category: Category,
        tier: Tier,
    ) -> crate::error::Result<Self> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(crate::error::Error::EmptyInput);
        }
        Ok(Self {
            subject,
            reviews,
            category,
            tier,
        })
    }

    /// Reviews formatted for prompt embedding, one `[rating R] comment`
    /// line per review
    pub fn review_block(&self) -> String {
        self.reviews
            .iter()
            .map(Review::prompt_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Revenue estimate for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueItem {
    pub item: String,
    /// Currency units, non-negative by type
    pub revenue: u64,
    /// Expected to match `[+-]\d+%`; the renderer only looks at the
    /// leading character
    pub growth_label: String,
}

/// Three-step action plan (consulting tier)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub immediate: String,
    pub mid_term: String,
    pub upsell: String,
}

/// Competitive benchmark on a single metric (consulting tier)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub metric: String,
    /// 0..=100
    pub my_score: u8,
    /// 0..=100
    pub competitor_score: u8,
    /// Invariant: `my_score - competitor_score`
    pub gap: i16,
}

/// The structured analysis result returned for a subject's reviews
///
/// Superset shape; which fields must be populated depends on the
/// requested [`Tier`]. Created fresh per request, never mutated,
/// discarded when a new request starts or the view resets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Short labels: menu items for stores, product names for malls
    pub popular_items: Vec<String>,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    /// 0..=100
    pub sentiment_score: u8,
    /// Empty string means "no alert"
    #[serde(default)]
    pub urgent_issue: String,

    // Trend tier
    #[serde(default)]
    pub revenue_by_item: Vec<RevenueItem>,
    #[serde(default)]
    pub representative_reviews: Vec<Review>,
    #[serde(default)]
    pub peak_hours: String,
    /// Exactly 6 relative index values when present
    #[serde(default)]
    pub monthly_trend: Vec<i64>,

    // Consulting tier
    #[serde(default)]
    pub issue_definition: Option<String>,
    #[serde(default)]
    pub root_cause: Option<String>,
    #[serde(default)]
    pub expected_impact: Option<String>,
    #[serde(default)]
    pub detail_page_advice: Option<String>,
    #[serde(default)]
    pub action_plan: Option<ActionPlan>,
    #[serde(default)]
    pub benchmark: Option<Benchmark>,
}

impl Insight {
    /// Whether this insight should raise the urgent-issue alert banner
    pub fn has_urgent_issue(&self) -> bool {
        !self.urgent_issue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_review_prompt_line() {
        let review = Review::new(4, "빵이 정말 맛있어요");
        assert_eq!(review.prompt_line(), "[rating 4] 빵이 정말 맛있어요");
    }

    #[test]
    fn test_category_round_trip() {
        assert_eq!(Category::from_str("STORE").unwrap(), Category::Store);
        assert_eq!(Category::Mall.as_str(), "mall");
        assert!(Category::from_str("bazaar").is_err());
    }

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Basic < Tier::Trend);
        assert!(Tier::Trend < Tier::Consulting);
    }

    #[test]
    fn test_request_rejects_blank_subject() {
        let err = AnalysisRequest::new("   ", vec![], Category::Store, Tier::Basic);
        assert!(matches!(err, Err(crate::error::Error::EmptyInput)));
    }

    #[test]
    fn test_review_block_joins_with_newlines() {
        let request = AnalysisRequest::new(
            "연남동 카페",
            vec![Review::new(5, "최고"), Review::new(1, "별로")],
            Category::Store,
            Tier::Basic,
        )
        .unwrap();
        assert_eq!(request.review_block(), "[rating 5] 최고\n[rating 1] 별로");
    }

    #[test]
    fn test_insight_wire_names_are_camel_case() {
        let json = serde_json::json!({
            "popularItems": ["시그니처 라떼"],
            "strengths": ["친절한 직원"],
            "risks": ["주말 대기"],
            "sentimentScore": 65,
            "urgentIssue": ""
        });

        let insight: Insight = serde_json::from_value(json).unwrap();
        assert_eq!(insight.popular_items, vec!["시그니처 라떼"]);
        assert_eq!(insight.sentiment_score, 65);
        assert!(!insight.has_urgent_issue());
        // Trend fields default to empty on a basic payload
        assert!(insight.revenue_by_item.is_empty());
        assert!(insight.monthly_trend.is_empty());
    }

    #[test]
    fn test_benchmark_serialization() {
        let benchmark = Benchmark {
            metric: "재구매율".to_string(),
            my_score: 62,
            competitor_score: 78,
            gap: -16,
        };
        let json = serde_json::to_value(&benchmark).unwrap();
        assert_eq!(json["myScore"], 62);
        assert_eq!(json["competitorScore"], 78);
        assert_eq!(json["gap"], -16);
    }
}
