//! Upstream Shopable analytics API client and raw response shapes.
//!
//! The raw types mirror what the API actually sends, synonym field names
//! included. Mapping them onto the canonical `domain` model happens in
//! [`crate::normalize`]; nothing outside this module issues HTTP requests.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{Period, Store};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::AnalyticsError;

// ============================================================================
// Raw Response Types
// ============================================================================

/// Payloads arrive either bare or wrapped in a `{"data": ...}` envelope,
/// depending on the endpoint's age. Both are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MaybeWrapped<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> MaybeWrapped<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(inner) => inner,
        }
    }
}

/// `analytics/videos/all-stores` and `analytics/videos/by-domain`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawVideosResponse {
    pub total_views: u64,
    pub total_likes: u64,
    pub total_shares: u64,
    #[serde(alias = "totalViewsPrevious")]
    pub previous_views: Option<u64>,
    #[serde(alias = "totalLikesPrevious")]
    pub previous_likes: Option<u64>,
    #[serde(alias = "totalSharesPrevious")]
    pub previous_shares: Option<u64>,
    pub previous_engagement_rate: Option<f64>,
    pub platform_counts: Option<RawPlatformCounts>,
    pub top_videos: Option<RawTopVideos>,
    pub store_id: Option<String>,
    pub store_name: Option<String>,
    pub orders_time_series: Option<Vec<RawTimeSeriesPoint>>,
    pub atc_rate_mobile_time_series: Option<Vec<RawTimeSeriesPoint>>,
    pub atc_rate_desktop_time_series: Option<Vec<RawTimeSeriesPoint>>,
    pub cvr_time_series: Option<Vec<RawTimeSeriesPoint>>,
    pub in_video_time_series: Option<Vec<RawTimeSeriesPoint>>,
    pub post_video_time_series: Option<Vec<RawTimeSeriesPoint>>,
}

/// Platform ingestion counts. Older deployments send `import` for
/// uploaded videos; a `total` is only present on newer ones.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RawPlatformCounts {
    pub tiktok: u64,
    pub instagram: u64,
    #[serde(alias = "import")]
    pub upload: u64,
    pub total: Option<u64>,
}

/// Top videos: either ranked sub-lists or a flat pre-ranked array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTopVideos {
    Ranked(RawRankedVideos),
    Flat(Vec<RawVideo>),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRankedVideos {
    pub by_views: Vec<RawVideo>,
}

impl RawTopVideos {
    /// The "by views" ranking, however it was shipped.
    pub fn into_by_views(self) -> Vec<RawVideo> {
        match self {
            Self::Ranked(ranked) => ranked.by_views,
            Self::Flat(videos) => videos,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawVideo {
    #[serde(alias = "id")]
    pub video_id: String,
    pub title: Option<String>,
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
    pub thumbnail: Option<String>,
}

/// `analytics/widgets/all-stores` and `analytics/widgets/by-domain`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawWidgetsResponse {
    pub total_widgets: Option<u64>,
    pub active_widgets: Option<u64>,
    pub layout_breakdown: Option<RawLayoutBreakdown>,
    pub cta_actions: Option<RawCtaActions>,
    #[serde(alias = "activeMerchants", alias = "merchantCount")]
    pub total_active_merchants: Option<u64>,
    pub product_pages_count: u64,
    pub other_pages_count: u64,
    pub store_id: Option<String>,
    pub store_name: Option<String>,
    pub orders_time_series: Option<Vec<RawTimeSeriesPoint>>,
    pub atc_rate_mobile_time_series: Option<Vec<RawTimeSeriesPoint>>,
    pub atc_rate_desktop_time_series: Option<Vec<RawTimeSeriesPoint>>,
    pub cvr_time_series: Option<Vec<RawTimeSeriesPoint>>,
    pub in_video_time_series: Option<Vec<RawTimeSeriesPoint>>,
    pub post_video_time_series: Option<Vec<RawTimeSeriesPoint>>,
}

/// Widget counts keyed by layout name. Keys are snake_case on the wire.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RawLayoutBreakdown {
    pub basic_carousel: u64,
    pub highlighted_carousel: u64,
    pub grid: u64,
    pub float: u64,
    pub story: u64,
    pub list: u64,
}

/// CTA tallies keyed by action id, one map per device class.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCtaActions {
    pub desktop: BTreeMap<String, u64>,
    pub mobile: BTreeMap<String, u64>,
}

/// `analytics/stats`: revenue either nested under a `revenue` key or flat.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawStatsResponse {
    Nested { revenue: RawRevenue },
    Flat(RawRevenue),
}

impl RawStatsResponse {
    pub fn into_revenue(self) -> RawRevenue {
        match self {
            Self::Nested { revenue } => revenue,
            Self::Flat(revenue) => revenue,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRevenue {
    pub in_video: Option<RawSeriesMetric>,
    pub post_video: Option<RawSeriesMetric>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSeriesMetric {
    pub value: f64,
    pub previous_value: f64,
    pub time_series: Vec<RawTimeSeriesPoint>,
}

/// A raw series bucket. Chart-oriented deployments send `{x, y}` instead
/// of `{date, value}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTimeSeriesPoint {
    #[serde(alias = "x")]
    pub date: Option<String>,
    #[serde(alias = "y")]
    pub value: Option<f64>,
}

/// `analytics/stores`: the list was shipped under `data`, under `stores`,
/// or bare, depending on the deployment.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawStoresResponse {
    Wrapped { data: Vec<Store> },
    Keyed { stores: Vec<Store> },
    Bare(Vec<Store>),
}

impl RawStoresResponse {
    pub fn into_stores(self) -> Vec<Store> {
        match self {
            Self::Wrapped { data } => data,
            Self::Keyed { stores } => stores,
            Self::Bare(stores) => stores,
        }
    }
}

/// `analytics/stats/shop/{id}`: a pre-aggregated per-store bundle.
///
/// `video_source`, `conversion` and `revenue` are required for the
/// response to be usable; the rest is defaulted by the normalizer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawShopStats {
    pub store_name: Option<String>,
    pub summary: Option<domain::SummaryMetrics>,
    pub video_source: Option<domain::VideoSourceMetrics>,
    pub widget_usage: Option<domain::WidgetUsageMetrics>,
    pub conversion: Option<domain::ConversionMetrics>,
    pub revenue: Option<domain::RevenueMetrics>,
    pub top_videos: Option<Vec<domain::VideoAnalytics>>,
}

// ============================================================================
// Upstream API Seam
// ============================================================================

/// The upstream analytics endpoints, one method per call.
///
/// The service facade is generic over this trait so the fallback policy
/// can be exercised against stub upstreams in tests.
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    async fn all_stores_videos(&self) -> Result<RawVideosResponse, AnalyticsError>;

    async fn all_stores_widgets(&self) -> Result<RawWidgetsResponse, AnalyticsError>;

    async fn stats(&self, start: NaiveDate, end: NaiveDate)
        -> Result<RawStatsResponse, AnalyticsError>;

    async fn stores(&self, search: Option<&str>) -> Result<Vec<Store>, AnalyticsError>;

    async fn widgets_by_domain(&self, shop_domain: &str)
        -> Result<RawWidgetsResponse, AnalyticsError>;

    async fn videos_by_domain(&self, shop_domain: &str)
        -> Result<RawVideosResponse, AnalyticsError>;

    async fn shop_stats(
        &self,
        store_id: &str,
        period: Period,
    ) -> Result<RawShopStats, AnalyticsError>;
}

// ============================================================================
// HTTP Client
// ============================================================================

/// Live client for the Shopable analytics API.
pub struct HttpUpstream {
    client: Client,
    base_url: String,
    admin_api_key: String,
}

impl HttpUpstream {
    /// Create a new client against the given base URL.
    pub fn new(
        base_url: &str,
        admin_api_key: &str,
        timeout: Duration,
    ) -> Result<Self, AnalyticsError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AnalyticsError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_api_key: admin_api_key.to_string(),
        })
    }

    /// Issue a GET against `admin/api/v1/{path}` with the admin headers.
    ///
    /// `shop_domain` is attached as `X-Shop-Domain` when present. `scope`
    /// identifies the store being looked up, if any: an HTTP 404 on a
    /// scoped call maps to [`AnalyticsError::StoreNotFound`] instead of a
    /// generic upstream error.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        shop_domain: Option<&str>,
        scope: Option<&str>,
    ) -> Result<T, AnalyticsError> {
        let url = format!("{}/admin/api/v1/{}", self.base_url, path);

        debug!(url = %url, "Calling analytics API");

        let mut request = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header("X-Admin-Api-Key", &self.admin_api_key);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(domain) = shop_domain {
            request = request.header("X-Shop-Domain", domain);
        }

        let response = request.send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AnalyticsError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            if let Some(scope) = scope {
                return Err(AnalyticsError::StoreNotFound {
                    scope: scope.to_string(),
                });
            }
        }
        if !status.is_success() {
            return Err(AnalyticsError::Upstream {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }

        let wrapped: MaybeWrapped<T> = response
            .json()
            .await
            .map_err(|e| AnalyticsError::InvalidResponse(e.to_string()))?;

        Ok(wrapped.into_inner())
    }
}

#[async_trait]
impl UpstreamApi for HttpUpstream {
    async fn all_stores_videos(&self) -> Result<RawVideosResponse, AnalyticsError> {
        self.get_json("analytics/videos/all-stores", &[], None, None)
            .await
    }

    async fn all_stores_widgets(&self) -> Result<RawWidgetsResponse, AnalyticsError> {
        self.get_json("analytics/widgets/all-stores", &[], None, None)
            .await
    }

    async fn stats(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RawStatsResponse, AnalyticsError> {
        let query = [
            ("startDate", start.format("%Y-%m-%d").to_string()),
            ("endDate", end.format("%Y-%m-%d").to_string()),
        ];
        self.get_json("analytics/stats", &query, None, None).await
    }

    async fn stores(&self, search: Option<&str>) -> Result<Vec<Store>, AnalyticsError> {
        let query: Vec<(&str, String)> = match search {
            Some(term) => vec![("search", term.to_string())],
            None => vec![],
        };
        let response: RawStoresResponse = self
            .get_json("analytics/stores", &query, None, None)
            .await?;
        Ok(response.into_stores())
    }

    async fn widgets_by_domain(
        &self,
        shop_domain: &str,
    ) -> Result<RawWidgetsResponse, AnalyticsError> {
        self.get_json(
            "analytics/widgets/by-domain",
            &[],
            Some(shop_domain),
            Some(shop_domain),
        )
        .await
    }

    async fn videos_by_domain(
        &self,
        shop_domain: &str,
    ) -> Result<RawVideosResponse, AnalyticsError> {
        self.get_json(
            "analytics/videos/by-domain",
            &[],
            Some(shop_domain),
            Some(shop_domain),
        )
        .await
    }

    async fn shop_stats(
        &self,
        store_id: &str,
        period: Period,
    ) -> Result<RawShopStats, AnalyticsError> {
        let path = format!("analytics/stats/shop/{store_id}");
        let query = [("period", period.as_str().to_string())];
        self.get_json(&path, &query, None, Some(store_id)).await
    }
}

// ============================================================================
// Tests
// ============================================================================
