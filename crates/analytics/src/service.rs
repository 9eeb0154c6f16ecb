//! Caller-facing analytics operations.
//!
//! One stateless facade per dashboard session. Each operation resolves the
//! data source once (live upstream or mock mode), fetches whatever metric
//! families it needs in parallel, normalizes them, and applies the
//! fallback policy:
//!
//! - all-stores endpoints recover from transient and malformed-payload
//!   failures by substituting mock data, keeping the dashboard populated;
//! - per-store domain lookups never mask an error, because silently
//!   showing another store's data would be worse than showing none;
//! - unauthorized and store-not-found are always surfaced.

use std::time::Duration;

use chrono::NaiveDate;
use domain::{
    AllStoresMetrics, AnalyticsData, Period, PerStoreMetrics, RevenueMetrics, Store,
    VideoSourceMetrics, WidgetUsageMetrics,
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::AnalyticsError;
use crate::mock;
use crate::normalize::{self, Scope};
use crate::upstream::{HttpUpstream, UpstreamApi};

enum Source<U> {
    Live(U),
    Mock,
}

/// The metrics aggregation service.
///
/// Generic over the upstream seam so the fallback policy can be tested
/// against stub upstreams.
pub struct AnalyticsService<U = HttpUpstream> {
    source: Source<U>,
}

impl AnalyticsService<HttpUpstream> {
    /// Resolve the data source from configuration: a configured base URL
    /// selects the live upstream, its absence selects mock mode.
    pub fn from_config(config: &Config) -> Result<Self, AnalyticsError> {
        match config.api.base_url() {
            Some(base_url) => {
                let upstream = HttpUpstream::new(
                    base_url,
                    &config.api.admin_api_key,
                    Duration::from_secs(config.api.request_timeout_secs),
                )?;
                info!(base_url, "Analytics service using live upstream");
                Ok(Self::with_upstream(upstream))
            }
            None => {
                info!("Analytics API base URL not set, serving deterministic mock data");
                Ok(Self::mock())
            }
        }
    }
}

impl<U: UpstreamApi> AnalyticsService<U> {
    /// Service backed by a live upstream.
    pub fn with_upstream(upstream: U) -> Self {
        Self {
            source: Source::Live(upstream),
        }
    }

    /// Service serving mock datasets only.
    pub fn mock() -> Self {
        Self {
            source: Source::Mock,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.source, Source::Live(_))
    }

    // ------------------------------------------------------------------
    // All-stores operations (mock fallback on recoverable failure)
    // ------------------------------------------------------------------

    /// The all-stores dashboard bundle for a period.
    pub async fn get_analytics(&self, period: Period) -> Result<AnalyticsData, AnalyticsError> {
        let upstream = match &self.source {
            Source::Live(upstream) => upstream,
            Source::Mock => return Ok(mock::analytics_data(period)),
        };

        match upstream.all_stores_videos().await {
            Ok(raw) => Ok(normalize::analytics_data(
                raw,
                period,
                &mock::analytics_data(period),
            )),
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "All-stores analytics fetch failed, serving mock data");
                Ok(mock::analytics_data(period))
            }
            Err(err) => Err(err),
        }
    }

    /// Video-source distribution across all stores.
    pub async fn get_video_source_metrics(&self) -> Result<VideoSourceMetrics, AnalyticsError> {
        let upstream = match &self.source {
            Source::Live(upstream) => upstream,
            Source::Mock => return Ok(mock::all_stores_video_source()),
        };

        let result = upstream.all_stores_videos().await.and_then(|raw| {
            raw.platform_counts
                .map(|counts| normalize::video_source(&counts))
                .ok_or_else(|| {
                    AnalyticsError::InvalidResponse(
                        "missing platformCounts in videos response".to_string(),
                    )
                })
        });

        match result {
            Ok(source) => Ok(source),
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "Video-source fetch failed, serving mock data");
                Ok(mock::all_stores_video_source())
            }
            Err(err) => Err(err),
        }
    }

    /// Widget usage across all stores.
    pub async fn get_widget_usage_metrics(&self) -> Result<WidgetUsageMetrics, AnalyticsError> {
        let upstream = match &self.source {
            Source::Live(upstream) => upstream,
            Source::Mock => return Ok(mock::all_stores_widget_usage()),
        };

        let result = upstream
            .all_stores_widgets()
            .await
            .and_then(|raw| normalize::widget_usage(&raw, Scope::AllStores));

        match result {
            Ok(usage) => Ok(usage),
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "Widget-usage fetch failed, serving mock data");
                Ok(mock::all_stores_widget_usage())
            }
            Err(err) => Err(err),
        }
    }

    /// All-stores revenue for an explicit date range.
    pub async fn get_revenue_metrics(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RevenueMetrics, AnalyticsError> {
        let upstream = match &self.source {
            Source::Live(upstream) => upstream,
            Source::Mock => return Ok(mock::all_stores_revenue()),
        };

        match upstream.stats(start, end).await {
            Ok(raw) => Ok(normalize::revenue_metrics(
                &raw.into_revenue(),
                &mock::all_stores_revenue(),
            )
            .with_range(start, end)),
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "Revenue fetch failed, serving mock data");
                Ok(mock::all_stores_revenue())
            }
            Err(err) => Err(err),
        }
    }

    /// Video-source and widget-usage metrics, fetched in parallel.
    ///
    /// Each family degrades to mock data independently, so the aggregate
    /// latency is bounded by the slowest sibling, not the sum.
    pub async fn get_all_stores_metrics(&self) -> Result<AllStoresMetrics, AnalyticsError> {
        let (video_source, widget_usage) = tokio::join!(
            self.get_video_source_metrics(),
            self.get_widget_usage_metrics()
        );

        Ok(AllStoresMetrics {
            video_source: video_source?,
            widget_usage: widget_usage?,
            revenue: None,
        })
    }

    /// The all-stores bundle including revenue for a date range.
    pub async fn get_all_stores_metrics_with_revenue(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AllStoresMetrics, AnalyticsError> {
        let (video_source, widget_usage, revenue) = tokio::join!(
            self.get_video_source_metrics(),
            self.get_widget_usage_metrics(),
            self.get_revenue_metrics(start, end)
        );

        Ok(AllStoresMetrics {
            video_source: video_source?,
            widget_usage: widget_usage?,
            revenue: Some(revenue?),
        })
    }

    // ------------------------------------------------------------------
    // Store directory
    // ------------------------------------------------------------------

    /// List every store. Mock mode serves the static directory; live
    /// failures propagate, there is no partial fallback for identity data.
    pub async fn get_stores(&self) -> Result<Vec<Store>, AnalyticsError> {
        match &self.source {
            Source::Mock => Ok(mock::stores()),
            Source::Live(upstream) => upstream.stores(None).await,
        }
    }

    /// Search stores by id, name, or domain substring. An empty term
    /// lists everything.
    pub async fn search_stores(&self, term: &str) -> Result<Vec<Store>, AnalyticsError> {
        let term = term.trim();
        if term.is_empty() {
            return self.get_stores().await;
        }

        match &self.source {
            Source::Mock => Ok(mock::stores()
                .into_iter()
                .filter(|store| store.matches(term))
                .collect()),
            Source::Live(upstream) => upstream.stores(Some(term)).await,
        }
    }

    // ------------------------------------------------------------------
    // Per-store operations
    // ------------------------------------------------------------------

    /// Per-store metrics by shop domain.
    ///
    /// Fans out the widgets and videos sibling calls together; a failure
    /// in either fails the lookup. Errors are never masked with mock data
    /// here, so the UI can distinguish "no such store" from "no data".
    pub async fn get_per_store_metrics_by_domain(
        &self,
        shop_domain: &str,
    ) -> Result<PerStoreMetrics, AnalyticsError> {
        let upstream = match &self.source {
            Source::Live(upstream) => upstream,
            Source::Mock => return Err(AnalyticsError::NotConfigured),
        };

        let (widgets, videos) = tokio::try_join!(
            upstream.widgets_by_domain(shop_domain),
            upstream.videos_by_domain(shop_domain)
        )?;

        debug!(shop_domain, "Per-store sibling fetches succeeded");

        let defaults = mock::per_store_metrics(shop_domain);
        normalize::per_store_metrics_by_domain(shop_domain, &widgets, &videos, &defaults)
    }

    /// Per-store metrics by store id, bucketed to the given period.
    pub async fn get_per_store_metrics(
        &self,
        store_id: &str,
        period: Period,
    ) -> Result<PerStoreMetrics, AnalyticsError> {
        debug!(store_id, period = ?period, "Fetching per-store stats");

        let upstream = match &self.source {
            Source::Live(upstream) => upstream,
            Source::Mock => return Ok(mock::per_store_metrics(store_id)),
        };

        let defaults = mock::per_store_metrics(store_id);
        let fallback_name = mock::store_name(store_id);

        let result = upstream.shop_stats(store_id, period).await.and_then(|raw| {
            normalize::per_store_metrics_by_id(store_id, &fallback_name, raw, &defaults)
        });

        match result {
            Ok(bundle) => Ok(bundle),
            Err(err) if err.is_recoverable() => {
                warn!(store_id, error = %err, "Per-store stats fetch failed, serving mock data");
                Ok(defaults)
            }
            Err(err) => Err(err),
        }
    }
}
