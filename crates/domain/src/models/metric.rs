//! Core metric value objects shared by every metric family.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single bucket of a chronological series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// A KPI value with previous-period comparison.
///
/// Construct through [`MetricWithChange::from_previous`] so that
/// `change == value - previous_value` and the percent delta hold by
/// construction. When `previous_value` is zero the percent delta is
/// reported as zero rather than dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricWithChange {
    pub value: f64,
    pub previous_value: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl MetricWithChange {
    /// Build a metric from the current and previous-period values.
    pub fn from_previous(value: f64, previous_value: f64) -> Self {
        let change = value - previous_value;
        let change_percent = if previous_value > 0.0 {
            change / previous_value * 100.0
        } else {
            0.0
        };
        Self {
            value,
            previous_value,
            change,
            change_percent,
        }
    }

    /// Metric with no historical comparison available: previous equals
    /// current, so the delta renders as 0%.
    pub fn flat(value: f64) -> Self {
        Self::from_previous(value, value)
    }
}

/// A change-tracked KPI with an ordered chronological series behind it,
/// optionally tagged with the queried date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricWithTimeSeries {
    #[serde(flatten)]
    pub metric: MetricWithChange,
    #[serde(default)]
    pub time_series: Vec<TimeSeriesPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl MetricWithTimeSeries {
    pub fn new(metric: MetricWithChange, time_series: Vec<TimeSeriesPoint>) -> Self {
        Self {
            metric,
            time_series,
            start_date: None,
            end_date: None,
        }
    }

    /// Tag the series with the date range it was queried for.
    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_previous_computes_change() {
        let metric = MetricWithChange::from_previous(12580.0, 10200.0);
        assert_eq!(metric.change, 2380.0);
        assert!((metric.change_percent - 23.333).abs() < 0.01);
    }

    #[test]
    fn test_from_previous_zero_previous_yields_zero_percent() {
        let metric = MetricWithChange::from_previous(500.0, 0.0);
        assert_eq!(metric.change, 500.0);
        assert_eq!(metric.change_percent, 0.0);
    }

    #[test]
    fn test_flat_has_zero_delta() {
        let metric = MetricWithChange::flat(8.5);
        assert_eq!(metric.previous_value, 8.5);
        assert_eq!(metric.change, 0.0);
        assert_eq!(metric.change_percent, 0.0);
    }

    #[test]
    fn test_negative_change() {
        let metric = MetricWithChange::from_previous(80.0, 100.0);
        assert_eq!(metric.change, -20.0);
        assert_eq!(metric.change_percent, -20.0);
    }

    #[test]
    fn test_with_range_tags_both_ends() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 9).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        let series = MetricWithTimeSeries::new(MetricWithChange::flat(1.0), vec![])
            .with_range(start, end);
        assert_eq!(series.start_date, Some(start));
        assert_eq!(series.end_date, Some(end));
    }

    #[test]
    fn test_metric_serializes_camel_case() {
        let metric = MetricWithChange::from_previous(10.0, 8.0);
        let json = serde_json::to_value(metric).unwrap();
        assert!(json.get("previousValue").is_some());
        assert!(json.get("changePercent").is_some());
    }
}
