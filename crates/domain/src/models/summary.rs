//! Dashboard summary bundle and the reporting period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::metric::MetricWithChange;
use super::video::VideoAnalytics;

/// Maximum entries in the ranked top-videos table.
pub const TOP_VIDEOS_LIMIT: usize = 5;

/// Named relative time window used to bucket time-series data.
///
/// Serialized in the upstream API's SCREAMING_SNAKE_CASE spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Period {
    #[default]
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
}

impl Period {
    /// The wire spelling, for query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThisWeek => "THIS_WEEK",
            Self::LastWeek => "LAST_WEEK",
            Self::ThisMonth => "THIS_MONTH",
            Self::LastMonth => "LAST_MONTH",
        }
    }
}

/// One bucket of the summary chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
}

/// The five headline KPIs of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    pub total_views: MetricWithChange,
    pub total_likes: MetricWithChange,
    pub total_shares: MetricWithChange,
    pub engagement_rate: MetricWithChange,
    pub revenue: MetricWithChange,
}

/// Full analytics bundle for a dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub summary: SummaryMetrics,
    pub chart_data: Vec<ChartPoint>,
    pub top_videos: Vec<VideoAnalytics>,
    pub period: Period,
}

/// Engagement rate: likes + shares over views, as a percentage.
/// Zero views yields a zero rate.
pub fn engagement_rate(views: u64, likes: u64, shares: u64) -> f64 {
    if views > 0 {
        (likes + shares) as f64 / views as f64 * 100.0
    } else {
        0.0
    }
}
