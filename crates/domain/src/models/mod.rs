//! Canonical analytics models.

pub mod bundles;
pub mod conversion;
pub mod metric;
pub mod revenue;
pub mod store;
pub mod summary;
pub mod video;
pub mod widget;

pub use bundles::{AllStoresMetrics, PerStoreMetrics};
pub use conversion::ConversionMetrics;
pub use metric::{MetricWithChange, MetricWithTimeSeries, TimeSeriesPoint};
pub use revenue::RevenueMetrics;
pub use store::Store;
pub use summary::{engagement_rate, AnalyticsData, ChartPoint, Period, SummaryMetrics, TOP_VIDEOS_LIMIT};
pub use video::{VideoAnalytics, VideoSourceMetrics};
pub use widget::{CtaActionCount, WidgetTypeCount, WidgetUsageMetrics};
