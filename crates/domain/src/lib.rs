//! Domain layer for the Shopvid analytics dashboard.
//!
//! This crate contains:
//! - Canonical metric value objects (change-tracked KPIs, time series)
//! - Per-family metric models (video source, widget usage, conversion, revenue)
//! - Aggregate bundles consumed by the dashboard views
//!
//! Everything here is a plain value object: no I/O, no upstream schema
//! knowledge. Normalization of raw API payloads into these types lives in
//! the `shopvid-analytics` crate.

pub mod models;

pub use models::{
    engagement_rate, AllStoresMetrics, AnalyticsData, ChartPoint, ConversionMetrics, CtaActionCount,
    MetricWithChange, MetricWithTimeSeries, Period, PerStoreMetrics, RevenueMetrics, Store,
    SummaryMetrics, TimeSeriesPoint, VideoAnalytics, VideoSourceMetrics, WidgetTypeCount,
    WidgetUsageMetrics, TOP_VIDEOS_LIMIT,
};
