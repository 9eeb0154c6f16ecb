//! Deterministic mock datasets.
//!
//! Served when no upstream base URL is configured, and substituted when an
//! all-stores fetch fails so the dashboard stays populated. Every bundle
//! satisfies the same invariants as live data (change-tracked KPIs are
//! built through [`MetricWithChange::from_previous`], video-source totals
//! equal the sum of their parts), so the rendering paths cannot tell the
//! difference.

use chrono::NaiveDate;
use domain::{
    AnalyticsData, ChartPoint, ConversionMetrics, CtaActionCount, MetricWithChange,
    MetricWithTimeSeries, Period, PerStoreMetrics, RevenueMetrics, Store, SummaryMetrics,
    TimeSeriesPoint, VideoAnalytics, VideoSourceMetrics, WidgetTypeCount, WidgetUsageMetrics,
};

/// All mock series cover the same demo week.
fn day(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, day).expect("valid mock date")
}

/// One bucket per day of the demo week.
fn week_series(values: [f64; 7]) -> Vec<TimeSeriesPoint> {
    values
        .into_iter()
        .enumerate()
        .map(|(offset, value)| TimeSeriesPoint::new(day(9 + offset as u32), value))
        .collect()
}

fn series_metric(value: f64, previous: f64, values: [f64; 7]) -> MetricWithTimeSeries {
    MetricWithTimeSeries::new(
        MetricWithChange::from_previous(value, previous),
        week_series(values),
    )
}

/// The static store directory used for mock-mode listings and per-store
/// name resolution.
pub fn stores() -> Vec<Store> {
    vec![
        Store::new("1", "Fashion Hub", "fashion-hub.myshopify.com"),
        Store::new("2", "Tech Galaxy", "tech-galaxy.myshopify.com"),
        Store::new("3", "Home Essentials", "home-essentials.myshopify.com"),
        Store::new("4", "Beauty Palace", "beauty-palace.myshopify.com"),
        Store::new("5", "Sports Zone", "sports-zone.myshopify.com"),
    ]
}

/// Resolve a store name from the directory, with a generic fallback.
pub fn store_name(store_id: &str) -> String {
    stores()
        .into_iter()
        .find(|store| store.id == store_id)
        .map(|store| store.name)
        .unwrap_or_else(|| format!("Store {store_id}"))
}

/// The all-stores dashboard bundle: summary, chart and top videos.
pub fn analytics_data(period: Period) -> AnalyticsData {
    AnalyticsData {
        summary: SummaryMetrics {
            total_views: MetricWithChange::from_previous(12580.0, 10200.0),
            total_likes: MetricWithChange::from_previous(3240.0, 2800.0),
            total_shares: MetricWithChange::from_previous(890.0, 720.0),
            engagement_rate: MetricWithChange::from_previous(8.5, 7.2),
            revenue: MetricWithChange::from_previous(4250.0, 3800.0),
        },
        chart_data: vec![
            chart_point(9, 1200, 340, 89),
            chart_point(10, 1850, 520, 145),
            chart_point(11, 2100, 580, 167),
            chart_point(12, 1680, 420, 98),
            chart_point(13, 2450, 680, 189),
            chart_point(14, 1800, 380, 112),
            chart_point(15, 1500, 320, 90),
        ],
        top_videos: vec![
            top_video("1", "Product Demo Video", 4580, 1200, 340, 12.5),
            top_video("2", "How-to Guide", 3200, 890, 220, 10.2),
            top_video("3", "Customer Testimonial", 2450, 670, 180, 9.8),
            top_video("4", "Behind the Scenes", 1890, 340, 98, 7.5),
            top_video("5", "New Collection Reveal", 460, 140, 52, 6.2),
        ],
        period,
    }
}

fn chart_point(d: u32, views: u64, likes: u64, shares: u64) -> ChartPoint {
    ChartPoint {
        date: day(d),
        views,
        likes,
        shares,
    }
}

fn top_video(
    id: &str,
    title: &str,
    views: u64,
    likes: u64,
    shares: u64,
    engagement: f64,
) -> VideoAnalytics {
    VideoAnalytics {
        video_id: id.to_string(),
        title: title.to_string(),
        views,
        likes,
        shares,
        engagement,
        thumbnail: None,
    }
}

/// Video-source distribution across all stores.
pub fn all_stores_video_source() -> VideoSourceMetrics {
    VideoSourceMetrics::from_counts(450, 350, 200)
}

/// Widget usage across all stores.
pub fn all_stores_widget_usage() -> WidgetUsageMetrics {
    WidgetUsageMetrics {
        widget_types: vec![
            WidgetTypeCount::new("Basic carousel", 120),
            WidgetTypeCount::new("Highlighted carousel", 85),
            WidgetTypeCount::new("Grid", 200),
            WidgetTypeCount::new("Float", 150),
            WidgetTypeCount::new("Story", 95),
        ],
        avg_widgets_per_merchant: 12.5,
        avg_active_widgets_per_merchant: 8.2,
        cta_actions: vec![
            CtaActionCount::new("Open product detail page", 180, 140),
            CtaActionCount::new("Show product detail within the modal", 100, 80),
            CtaActionCount::new("Add to cart (no page change)", 140, 110),
            CtaActionCount::new("Add to cart and open cart page", 85, 65),
        ],
        product_pages_count: 0,
        other_pages_count: 0,
    }
}

/// All-stores revenue, tagged with the demo week it covers.
pub fn all_stores_revenue() -> RevenueMetrics {
    RevenueMetrics {
        in_video: series_metric(
            12500.0,
            10200.0,
            [1200.0, 1850.0, 2100.0, 1680.0, 2450.0, 1800.0, 1500.0],
        ),
        post_video: series_metric(
            8500.0,
            7200.0,
            [800.0, 1200.0, 1500.0, 1100.0, 1800.0, 1300.0, 1000.0],
        ),
    }
    .with_range(day(9), day(15))
}

/// The per-store bundle, with the name resolved from the store directory.
pub fn per_store_metrics(store_id: &str) -> PerStoreMetrics {
    let revenue = RevenueMetrics {
        in_video: series_metric(
            4500.0,
            3800.0,
            [400.0, 650.0, 750.0, 600.0, 900.0, 700.0, 500.0],
        ),
        post_video: series_metric(
            3200.0,
            2800.0,
            [300.0, 450.0, 550.0, 400.0, 650.0, 500.0, 350.0],
        ),
    };

    PerStoreMetrics {
        store_id: store_id.to_string(),
        store_name: store_name(store_id),
        summary: SummaryMetrics {
            total_views: MetricWithChange::from_previous(12580.0, 10200.0),
            total_likes: MetricWithChange::from_previous(3240.0, 2800.0),
            total_shares: MetricWithChange::from_previous(890.0, 720.0),
            engagement_rate: MetricWithChange::from_previous(8.5, 7.2),
            revenue: revenue.total(),
        },
        video_source: VideoSourceMetrics::from_counts(150, 120, 80),
        widget_usage: WidgetUsageMetrics {
            widget_types: vec![
                WidgetTypeCount::new("Basic carousel", 8),
                WidgetTypeCount::new("Highlighted carousel", 5),
                WidgetTypeCount::new("Grid", 7),
                WidgetTypeCount::new("Float", 3),
                WidgetTypeCount::new("Story", 2),
            ],
            avg_widgets_per_merchant: 25.0,
            avg_active_widgets_per_merchant: 20.0,
            cta_actions: vec![
                CtaActionCount::new("Open product detail page", 45, 35),
                CtaActionCount::new("Show product detail within the modal", 25, 20),
                CtaActionCount::new("Add to cart (no page change)", 30, 25),
                CtaActionCount::new("Add to cart and open cart page", 15, 12),
            ],
            product_pages_count: 15,
            other_pages_count: 10,
        },
        conversion: ConversionMetrics {
            orders_from_shopvid: series_metric(
                15.5,
                12.3,
                [12.0, 13.5, 14.8, 15.2, 15.8, 15.5, 15.5],
            ),
            atc_rate_mobile: series_metric(8.5, 7.2, [7.0, 8.0, 8.5, 8.3, 8.8, 8.5, 8.5]),
            atc_rate_desktop: series_metric(6.2, 5.8, [5.5, 6.0, 6.2, 6.1, 6.3, 6.2, 6.2]),
            cvr: series_metric(3.5, 2.8, [2.5, 3.0, 3.2, 3.4, 3.6, 3.5, 3.5]),
        },
        revenue,
        top_videos: analytics_data(Period::default()).top_videos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_directory_has_five_entries() {
        let directory = stores();
        assert_eq!(directory.len(), 5);
        assert_eq!(directory[0].domain, "fashion-hub.myshopify.com");
    }

    #[test]
    fn test_store_name_resolution() {
        assert_eq!(store_name("2"), "Tech Galaxy");
        assert_eq!(store_name("99"), "Store 99");
    }

    #[test]
    fn test_summary_metrics_satisfy_invariants() {
        let data = analytics_data(Period::ThisWeek);
        let views = data.summary.total_views;
        assert_eq!(views.change, views.value - views.previous_value);
        assert!(
            (views.change_percent - views.change / views.previous_value * 100.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_video_source_totals_sum() {
        assert_eq!(all_stores_video_source().total, 1000);
        assert_eq!(per_store_metrics("1").video_source.total, 350);
    }

    #[test]
    fn test_cta_counts_are_device_sums() {
        for action in all_stores_widget_usage().cta_actions {
            assert_eq!(action.count, action.desktop + action.mobile);
        }
    }

    #[test]
    fn test_per_store_averages_use_divisor_one() {
        let usage = per_store_metrics("1").widget_usage;
        assert_eq!(usage.avg_widgets_per_merchant, 25.0);
        assert_eq!(usage.avg_active_widgets_per_merchant, 20.0);
    }

    #[test]
    fn test_per_store_summary_revenue_is_combined_total() {
        let bundle = per_store_metrics("1");
        assert_eq!(bundle.summary.revenue.value, 7700.0);
        assert_eq!(bundle.summary.revenue.previous_value, 6600.0);
    }

    #[test]
    fn test_revenue_range_tag_covers_demo_week() {
        let revenue = all_stores_revenue();
        assert_eq!(revenue.in_video.start_date, Some(day(9)));
        assert_eq!(revenue.post_video.end_date, Some(day(15)));
        assert_eq!(revenue.in_video.time_series.len(), 7);
    }
}
