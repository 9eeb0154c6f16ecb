//! Error taxonomy for analytics fetching and normalization.

use thiserror::Error;

/// Errors surfaced by the analytics service.
///
/// The all-stores endpoints recover from most of these by substituting
/// mock data; see [`AnalyticsError::is_recoverable`]. Per-store domain
/// lookups never mask an error, since silently showing another store's
/// numbers is worse than showing none.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Admin API key rejected by the upstream (HTTP 401).
    #[error("Unauthorized: invalid admin API key")]
    Unauthorized,

    /// A scoped lookup hit HTTP 404.
    #[error("Store not found: {scope}")]
    StoreNotFound { scope: String },

    /// Upstream answered with an unexpected status.
    #[error("Analytics API error: HTTP {status} on {endpoint}")]
    Upstream { status: u16, endpoint: String },

    /// Network-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream payload was missing required structure.
    #[error("Invalid analytics response: {0}")]
    InvalidResponse(String),

    /// The operation needs a configured upstream and has no mock fallback.
    #[error("Analytics API base URL is not configured")]
    NotConfigured,
}

impl AnalyticsError {
    /// Whether the all-stores fallback policy may substitute mock data.
    ///
    /// Unauthorized and not-found are user-actionable and always surfaced;
    /// transient and malformed-payload failures are recoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::Unauthorized | Self::StoreNotFound { .. } | Self::NotConfigured
        )
    }
}
