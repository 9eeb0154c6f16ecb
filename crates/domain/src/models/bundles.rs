//! Aggregate metric bundles returned to dashboard views.

use serde::{Deserialize, Serialize};

use super::conversion::ConversionMetrics;
use super::revenue::RevenueMetrics;
use super::summary::SummaryMetrics;
use super::video::{VideoAnalytics, VideoSourceMetrics};
use super::widget::WidgetUsageMetrics;

/// Metrics aggregated across every merchant.
///
/// Revenue needs an explicit date range, so it is only present when the
/// caller asked for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllStoresMetrics {
    pub video_source: VideoSourceMetrics,
    pub widget_usage: WidgetUsageMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<RevenueMetrics>,
}

/// Metrics filtered to a single store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerStoreMetrics {
    pub store_id: String,
    pub store_name: String,
    pub summary: SummaryMetrics,
    pub video_source: VideoSourceMetrics,
    pub widget_usage: WidgetUsageMetrics,
    pub conversion: ConversionMetrics,
    pub revenue: RevenueMetrics,
    pub top_videos: Vec<VideoAnalytics>,
}
