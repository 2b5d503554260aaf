//! Pluggable insight provider abstraction
//!
//! The stub-vs-real decision is made once at configuration time by
//! constructing the matching variant, never re-checked per call.
//!
//! # Architecture
//!
//! - `InsightProvider` trait: defines the analysis interface
//! - `ProviderClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Provider implementations: `RemoteProvider`, `StubProvider`
//!
//! # Configuration
//!
//! Environment variables:
//! - `INSIGHTFLOW_PROVIDER`: Provider to use (remote, stub). Default: remote
//!   when a credential is configured, stub otherwise
//! - `INSIGHTFLOW_API_KEY`: Completion API credential (required for remote;
//!   blank or the placeholder value counts as absent)
//! - `INSIGHTFLOW_API_HOST`: Completion API base URL (default: https://api.openai.com)
//! - `INSIGHTFLOW_MODEL`: Model name (default: gpt-4o)

pub mod parsing;
mod remote;
mod stub;

pub use remote::RemoteProvider;
pub use stub::StubProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AnalysisRequest, Insight};

/// The placeholder credential shipped in demo configs; treated as absent
pub const PLACEHOLDER_CREDENTIAL: &str = "YOUR_OPENAI_API_KEY";

/// Trait defining the interface for all insight providers
///
/// Providers should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Turn a prepared analysis request into a tier-complete insight
    ///
    /// The returned insight has passed tier contract validation.
    async fn request_insight(&self, request: &AnalysisRequest) -> Result<Insight>;

    /// Check if the provider is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for display)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete provider client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum ProviderClient {
    /// Remote chat-completion provider (HTTPS API)
    Remote(RemoteProvider),
    /// Canned stub for demo use without a credential
    Stub(StubProvider),
}

impl ProviderClient {
    /// Create a provider client from environment variables
    ///
    /// Checks `INSIGHTFLOW_PROVIDER` to determine which provider to use:
    /// - `remote`: Uses INSIGHTFLOW_API_KEY / INSIGHTFLOW_API_HOST /
    ///   INSIGHTFLOW_MODEL; falls back to the stub when no usable
    ///   credential is configured
    /// - `stub`: Always uses the canned stub
    ///
    /// With the variable unset, remote is used when a credential is
    /// present and the stub otherwise. The selection happens exactly
    /// once, here.
    pub fn from_env() -> Self {
        let requested = std::env::var("INSIGHTFLOW_PROVIDER").unwrap_or_default();

        match requested.to_lowercase().as_str() {
            "stub" => ProviderClient::Stub(StubProvider::new()),
            "remote" => match RemoteProvider::from_env() {
                Some(remote) => ProviderClient::Remote(remote),
                None => {
                    tracing::warn!(
                        "INSIGHTFLOW_PROVIDER=remote but no usable credential, using stub"
                    );
                    ProviderClient::Stub(StubProvider::new())
                }
            },
            "" => RemoteProvider::from_env()
                .map(ProviderClient::Remote)
                .unwrap_or_else(|| ProviderClient::Stub(StubProvider::new())),
            other => {
                tracing::warn!(provider = %other, "Unknown INSIGHTFLOW_PROVIDER, using stub");
                ProviderClient::Stub(StubProvider::new())
            }
        }
    }

    /// Create a stub client directly
    pub fn stub() -> Self {
        ProviderClient::Stub(StubProvider::new())
    }

    /// Create a remote client directly
    pub fn remote(host: &str, model: &str, api_key: &str) -> Self {
        ProviderClient::Remote(RemoteProvider::new(host, model, api_key))
    }

    /// The provider kind, for status output
    pub fn backend(&self) -> &'static str {
        match self {
            ProviderClient::Remote(_) => "remote",
            ProviderClient::Stub(_) => "stub",
        }
    }
}

// Implement InsightProvider for ProviderClient by delegating to the inner provider
#[async_trait]
impl InsightProvider for ProviderClient {
    async fn request_insight(&self, request: &AnalysisRequest) -> Result<Insight> {
        match self {
            ProviderClient::Remote(p) => p.request_insight(request).await,
            ProviderClient::Stub(p) => p.request_insight(request).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            ProviderClient::Remote(p) => p.health_check().await,
            ProviderClient::Stub(p) => p.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            ProviderClient::Remote(p) => p.model(),
            ProviderClient::Stub(p) => p.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            ProviderClient::Remote(p) => p.host(),
            ProviderClient::Stub(p) => p.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_client_identity() {
        let client = ProviderClient::stub();
        assert_eq!(client.model(), "stub");
        assert_eq!(client.host(), "stub://local");
        assert_eq!(client.backend(), "stub");
    }

    #[tokio::test]
    async fn test_stub_health_check() {
        let client = ProviderClient::stub();
        assert!(client.health_check().await);
    }
}
