//! Per-store conversion metrics.

use serde::{Deserialize, Serialize};

use super::metric::MetricWithTimeSeries;

/// The four conversion-rate series tracked per store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionMetrics {
    /// Share of orders attributed to Shopvid widgets.
    pub orders_from_shopvid: MetricWithTimeSeries,
    /// Add-to-cart rate on mobile.
    pub atc_rate_mobile: MetricWithTimeSeries,
    /// Add-to-cart rate on desktop.
    pub atc_rate_desktop: MetricWithTimeSeries,
    /// Overall conversion rate.
    pub cvr: MetricWithTimeSeries,
}
