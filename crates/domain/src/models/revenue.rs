//! Revenue metrics, split by attribution point.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::metric::{MetricWithChange, MetricWithTimeSeries};

/// Revenue attributed to video widgets, split into purchases made inside
/// the video player and purchases made after watching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueMetrics {
    pub in_video: MetricWithTimeSeries,
    pub post_video: MetricWithTimeSeries,
}

impl RevenueMetrics {
    /// Tag both series with the queried date range.
    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.in_video = self.in_video.with_range(start, end);
        self.post_video = self.post_video.with_range(start, end);
        self
    }

    /// Combined revenue KPI across both attribution points.
    pub fn total(&self) -> MetricWithChange {
        MetricWithChange::from_previous(
            self.in_video.metric.value + self.post_video.metric.value,
            self.in_video.metric.previous_value + self.post_video.metric.previous_value,
        )
    }
}
