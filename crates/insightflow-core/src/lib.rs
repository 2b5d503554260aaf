//! InsightFlow Core Library
//!
//! Shared functionality for the InsightFlow review analysis tool:
//! - Review corpus loading (embedded demo data or external JSON)
//! - Prompt library for customizable per-tier analysis prompts
//! - Pluggable insight providers (remote chat completion API, canned stub)
//! - Tier contract validation at the provider boundary
//! - Pure renderer projecting insights into a presentation tree
//! - Report session state with stale-result handling

pub mod contract;
pub mod corpus;
pub mod error;
pub mod models;
pub mod prompts;
pub mod provider;
pub mod render;
pub mod session;

/// Test utilities including the mock completion server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use contract::{validate_for_tier, TREND_MONTHS};
pub use corpus::ReviewCorpus;
pub use error::{Error, Result};
pub use models::{
    ActionPlan, AnalysisRequest, Benchmark, Category, Insight, Review, RevenueItem, Tier,
};
pub use prompts::{Prompt, PromptId, PromptInfo, PromptLibrary};
pub use provider::{
    InsightProvider, ProviderClient, RemoteProvider, StubProvider, PLACEHOLDER_CREDENTIAL,
};
pub use render::{
    format_thousands, render, AlertPayload, GrowthStyle, RenderedReport, Report, RevenueRow,
    Section, Tone, TrendBar,
};
pub use session::{CompletionOutcome, ReportSession, RequestToken};
