//! Integration tests for the service facade's fallback policy, driven
//! through stub upstreams.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{Period, Store};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use shopvid_analytics::upstream::{
    RawShopStats, RawStatsResponse, RawVideosResponse, RawWidgetsResponse,
};
use shopvid_analytics::{mock, AnalyticsError, AnalyticsService, UpstreamApi};

/// Scripted outcome for one stub endpoint.
#[derive(Clone)]
enum StubResponse {
    Json(Value),
    Unauthorized,
    NotFound,
    ServerError,
}

impl StubResponse {
    fn materialize<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        scope: Option<&str>,
    ) -> Result<T, AnalyticsError> {
        match self {
            Self::Json(value) => serde_json::from_value(value.clone())
                .map_err(|err| AnalyticsError::InvalidResponse(err.to_string())),
            Self::Unauthorized => Err(AnalyticsError::Unauthorized),
            Self::NotFound => Err(AnalyticsError::StoreNotFound {
                scope: scope.unwrap_or(endpoint).to_string(),
            }),
            Self::ServerError => Err(AnalyticsError::Upstream {
                status: 500,
                endpoint: endpoint.to_string(),
            }),
        }
    }
}

/// Stub upstream with one scripted response per endpoint. The period
/// passed to the shop-stats endpoint is recorded for assertions.
struct StubUpstream {
    videos: StubResponse,
    widgets: StubResponse,
    stats: StubResponse,
    stores: StubResponse,
    shop_stats: StubResponse,
    seen_period: Arc<Mutex<Option<Period>>>,
}

impl Default for StubUpstream {
    fn default() -> Self {
        Self {
            videos: StubResponse::Json(json!({})),
            widgets: StubResponse::Json(json!({})),
            stats: StubResponse::Json(json!({})),
            stores: StubResponse::Json(json!([])),
            shop_stats: StubResponse::Json(json!({})),
            seen_period: Arc::default(),
        }
    }
}

#[async_trait]
impl UpstreamApi for StubUpstream {
    async fn all_stores_videos(&self) -> Result<RawVideosResponse, AnalyticsError> {
        self.videos.materialize("analytics/videos/all-stores", None)
    }

    async fn all_stores_widgets(&self) -> Result<RawWidgetsResponse, AnalyticsError> {
        self.widgets.materialize("analytics/widgets/all-stores", None)
    }

    async fn stats(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<RawStatsResponse, AnalyticsError> {
        self.stats.materialize("analytics/stats", None)
    }

    async fn stores(&self, _search: Option<&str>) -> Result<Vec<Store>, AnalyticsError> {
        self.stores.materialize("analytics/stores", None)
    }

    async fn widgets_by_domain(
        &self,
        shop_domain: &str,
    ) -> Result<RawWidgetsResponse, AnalyticsError> {
        self.widgets
            .materialize("analytics/widgets/by-domain", Some(shop_domain))
    }

    async fn videos_by_domain(
        &self,
        shop_domain: &str,
    ) -> Result<RawVideosResponse, AnalyticsError> {
        self.videos
            .materialize("analytics/videos/by-domain", Some(shop_domain))
    }

    async fn shop_stats(
        &self,
        store_id: &str,
        period: Period,
    ) -> Result<RawShopStats, AnalyticsError> {
        *self.seen_period.lock().unwrap() = Some(period);
        self.shop_stats
            .materialize("analytics/stats/shop", Some(store_id))
    }
}

fn service(stub: StubUpstream) -> AnalyticsService<StubUpstream> {
    AnalyticsService::with_upstream(stub)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// All-stores fallback
// ============================================================================

#[tokio::test]
async fn test_widget_failure_degrades_to_mock_without_failing_siblings() {
    let stub = StubUpstream {
        videos: StubResponse::Json(json!({
            "platformCounts": { "tiktok": 10, "instagram": 20, "upload": 5 }
        })),
        widgets: StubResponse::ServerError,
        ..StubUpstream::default()
    };

    let bundle = service(stub).get_all_stores_metrics().await.unwrap();

    // The healthy sibling is served live.
    assert_eq!(bundle.video_source.tiktok, 10);
    assert_eq!(bundle.video_source.total, 35);

    // The failed family is substituted wholesale, not partially.
    assert_eq!(bundle.widget_usage, mock::all_stores_widget_usage());
    assert!(bundle.revenue.is_none());
}

#[tokio::test]
async fn test_malformed_widgets_payload_degrades_to_mock() {
    // All-stores widget usage requires a layout breakdown.
    let stub = StubUpstream {
        widgets: StubResponse::Json(json!({ "totalWidgets": 40 })),
        ..StubUpstream::default()
    };

    let usage = service(stub).get_widget_usage_metrics().await.unwrap();
    assert_eq!(usage, mock::all_stores_widget_usage());
}

#[tokio::test]
async fn test_unauthorized_propagates_instead_of_masking() {
    let stub = StubUpstream {
        videos: StubResponse::Unauthorized,
        ..StubUpstream::default()
    };

    let result = service(stub).get_analytics(Period::ThisWeek).await;
    assert!(matches!(result, Err(AnalyticsError::Unauthorized)));
}

#[tokio::test]
async fn test_revenue_success_is_tagged_with_queried_range() {
    let stub = StubUpstream {
        stats: StubResponse::Json(json!({
            "revenue": {
                "inVideo": {
                    "value": 900.0,
                    "previousValue": 600.0,
                    "timeSeries": [
                        { "date": "2025-01-06", "value": 400.0 },
                        { "date": "2025-01-07", "value": 500.0 }
                    ]
                },
                "postVideo": {
                    "value": 300.0,
                    "previousValue": 200.0,
                    "timeSeries": [{ "x": "2025-01-06", "y": 300.0 }]
                }
            }
        })),
        ..StubUpstream::default()
    };

    let start = date(2025, 1, 6);
    let end = date(2025, 1, 12);
    let revenue = service(stub).get_revenue_metrics(start, end).await.unwrap();

    assert_eq!(revenue.in_video.metric.value, 900.0);
    assert_eq!(revenue.in_video.metric.change, 300.0);
    assert_eq!(revenue.in_video.start_date, Some(start));
    assert_eq!(revenue.post_video.end_date, Some(end));
    assert_eq!(revenue.post_video.time_series.len(), 1);
}

#[tokio::test]
async fn test_revenue_failure_keeps_mock_range() {
    let stub = StubUpstream {
        stats: StubResponse::ServerError,
        ..StubUpstream::default()
    };

    let revenue = service(stub)
        .get_revenue_metrics(date(2025, 1, 6), date(2025, 1, 12))
        .await
        .unwrap();

    // Mock revenue keeps the range it actually covers.
    assert_eq!(revenue, mock::all_stores_revenue());
}

// ============================================================================
// Per-store by domain (no mock masking)
// ============================================================================

#[tokio::test]
async fn test_unknown_domain_surfaces_store_not_found() {
    let stub = StubUpstream {
        videos: StubResponse::NotFound,
        widgets: StubResponse::NotFound,
        ..StubUpstream::default()
    };

    let result = service(stub)
        .get_per_store_metrics_by_domain("missing.myshopify.com")
        .await;

    match result {
        Err(err @ AnalyticsError::StoreNotFound { .. }) => {
            let message = err.to_string();
            assert!(message.contains("not found"));
            assert!(message.contains("missing.myshopify.com"));
        }
        other => panic!("expected StoreNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_domain_sibling_failure_fails_the_lookup() {
    // Widgets succeed but videos hit a server error: no partial bundle.
    let stub = StubUpstream {
        widgets: StubResponse::Json(json!({ "storeName": "Fashion Hub" })),
        videos: StubResponse::ServerError,
        ..StubUpstream::default()
    };

    let result = service(stub)
        .get_per_store_metrics_by_domain("fashion-hub.myshopify.com")
        .await;
    assert!(matches!(result, Err(AnalyticsError::Upstream { .. })));
}

#[tokio::test]
async fn test_domain_lookup_normalizes_sibling_responses() {
    let stub = StubUpstream {
        widgets: StubResponse::Json(json!({
            "storeId": "7",
            "storeName": "Fashion Hub",
            "totalWidgets": 12,
            "activeWidgets": 9,
            "layoutBreakdown": { "grid": 7, "story": 5 },
            "ctaActions": {
                "desktop": { "open-pdp": 4 },
                "mobile": { "open-pdp": 6 }
            },
            "productPagesCount": 3,
            "otherPagesCount": 1
        })),
        videos: StubResponse::Json(json!({
            "totalViews": 2000,
            "totalLikes": 150,
            "totalShares": 50,
            "platformCounts": { "tiktok": 5, "instagram": 3, "import": 2 },
            "topVideos": [
                { "id": "v1", "title": "Launch teaser", "views": 1200, "likes": 90, "shares": 30 }
            ]
        })),
        ..StubUpstream::default()
    };

    let bundle = service(stub)
        .get_per_store_metrics_by_domain("fashion-hub.myshopify.com")
        .await
        .unwrap();

    // Identity comes from the widgets response when present.
    assert_eq!(bundle.store_id, "7");
    assert_eq!(bundle.store_name, "Fashion Hub");

    assert_eq!(bundle.summary.total_views.value, 2000.0);
    assert_eq!(bundle.video_source.upload, 2);
    assert_eq!(bundle.video_source.total, 10);

    // Per-store averages divide by one merchant.
    assert_eq!(bundle.widget_usage.avg_widgets_per_merchant, 12.0);
    assert_eq!(bundle.widget_usage.avg_active_widgets_per_merchant, 9.0);
    assert_eq!(bundle.widget_usage.cta_actions.len(), 1);
    assert_eq!(bundle.widget_usage.cta_actions[0].count, 10);

    assert_eq!(bundle.top_videos.len(), 1);
    assert_eq!(bundle.top_videos[0].title, "Launch teaser");
}

// ============================================================================
// Per-store by id
// ============================================================================

#[tokio::test]
async fn test_incomplete_shop_stats_falls_back_to_mock() {
    // Missing the required revenue section.
    let stub = StubUpstream {
        shop_stats: StubResponse::Json(json!({
            "storeName": "Tech Galaxy",
            "videoSource": { "tiktok": 1, "instagram": 1, "upload": 1, "total": 3 },
            "conversion": mock_conversion_json()
        })),
        ..StubUpstream::default()
    };

    let bundle = service(stub)
        .get_per_store_metrics("2", Period::ThisWeek)
        .await
        .unwrap();
    assert_eq!(bundle, mock::per_store_metrics("2"));
}

#[tokio::test]
async fn test_shop_stats_unauthorized_propagates() {
    let stub = StubUpstream {
        shop_stats: StubResponse::Unauthorized,
        ..StubUpstream::default()
    };

    let result = service(stub).get_per_store_metrics("2", Period::ThisWeek).await;
    assert!(matches!(result, Err(AnalyticsError::Unauthorized)));
}

#[tokio::test]
async fn test_shop_stats_receives_requested_period() {
    let stub = StubUpstream::default();
    let seen_period = stub.seen_period.clone();

    // The scripted empty payload fails validation and falls back to mock
    // data; the upstream call itself still carries the period.
    let bundle = service(stub)
        .get_per_store_metrics("2", Period::LastMonth)
        .await
        .unwrap();

    assert_eq!(*seen_period.lock().unwrap(), Some(Period::LastMonth));
    assert_eq!(bundle, mock::per_store_metrics("2"));
}

#[tokio::test]
async fn test_shop_stats_not_found_propagates() {
    let stub = StubUpstream {
        shop_stats: StubResponse::NotFound,
        ..StubUpstream::default()
    };

    let result = service(stub).get_per_store_metrics("99", Period::ThisWeek).await;
    assert!(matches!(result, Err(AnalyticsError::StoreNotFound { .. })));
}

fn mock_conversion_json() -> serde_json::Value {
    serde_json::to_value(mock::per_store_metrics("2").conversion).unwrap()
}

// ============================================================================
// Store directory
// ============================================================================

#[tokio::test]
async fn test_live_store_search_passes_through() {
    let stub = StubUpstream {
        stores: StubResponse::Json(json!([
            { "id": "1", "name": "Fashion Hub", "domain": "fashion-hub.myshopify.com" }
        ])),
        ..StubUpstream::default()
    };

    let stores = service(stub).search_stores("fashion").await.unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].id, "1");
}

#[tokio::test]
async fn test_store_listing_failure_propagates() {
    let stub = StubUpstream {
        stores: StubResponse::ServerError,
        ..StubUpstream::default()
    };

    let result = service(stub).get_stores().await;
    assert!(matches!(result, Err(AnalyticsError::Upstream { .. })));
}
