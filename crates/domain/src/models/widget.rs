//! Widget usage metrics: layout tallies and CTA action splits.

use serde::{Deserialize, Serialize};

/// Tally of widgets using one layout, keyed by its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetTypeCount {
    #[serde(rename = "type")]
    pub widget_type: String,
    pub count: u64,
}

impl WidgetTypeCount {
    pub fn new(widget_type: impl Into<String>, count: u64) -> Self {
        Self {
            widget_type: widget_type.into(),
            count,
        }
    }
}

/// Tally of one CTA action split by device class.
///
/// `count` is always `desktop + mobile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtaActionCount {
    pub action: String,
    pub desktop: u64,
    pub mobile: u64,
    pub count: u64,
}

impl CtaActionCount {
    pub fn new(action: impl Into<String>, desktop: u64, mobile: u64) -> Self {
        Self {
            action: action.into(),
            desktop,
            mobile,
            count: desktop + mobile,
        }
    }
}

/// Widget usage for a scope (all stores or a single store).
///
/// The per-merchant averages use the active merchant count as divisor;
/// for a single store that divisor is 1, so the averages equal the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetUsageMetrics {
    pub widget_types: Vec<WidgetTypeCount>,
    pub avg_widgets_per_merchant: f64,
    pub avg_active_widgets_per_merchant: f64,
    pub cta_actions: Vec<CtaActionCount>,
    #[serde(default)]
    pub product_pages_count: u64,
    #[serde(default)]
    pub other_pages_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cta_count_is_device_sum() {
        let action = CtaActionCount::new("Add to cart (no page change)", 30, 25);
        assert_eq!(action.count, 55);
    }

    #[test]
    fn test_widget_type_serializes_type_key() {
        let entry = WidgetTypeCount::new("Grid", 10);
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["type"], "Grid");
        assert_eq!(json["count"], 10);
    }
}
