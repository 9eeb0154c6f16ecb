//! Normalization of raw upstream payloads into the canonical model.
//!
//! One function per metric family, each pure: raw shapes (plus explicit
//! defaults for the parts the API does not provide yet) in, canonical
//! types out. Upstream schema drift stays behind this seam.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use domain::{
    engagement_rate, AnalyticsData, ConversionMetrics, CtaActionCount, MetricWithChange,
    MetricWithTimeSeries, Period, PerStoreMetrics, RevenueMetrics, SummaryMetrics,
    TimeSeriesPoint, VideoAnalytics, VideoSourceMetrics, WidgetTypeCount, WidgetUsageMetrics,
    TOP_VIDEOS_LIMIT,
};

use crate::error::AnalyticsError;
use crate::upstream::{
    RawCtaActions, RawLayoutBreakdown, RawPlatformCounts, RawRevenue, RawSeriesMetric,
    RawShopStats, RawTimeSeriesPoint, RawVideo, RawVideosResponse, RawWidgetsResponse,
};

/// Which merchant-count divisor the per-merchant averages use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Divisor comes from the upstream merchant count (default 1).
    AllStores,
    /// Divisor is fixed at 1: the averages equal the totals.
    PerStore,
}

// ============================================================================
// Video Source
// ============================================================================

/// Platform counts with missing fields defaulted to zero. An explicit
/// upstream total wins over the derived sum.
pub fn video_source(counts: &RawPlatformCounts) -> VideoSourceMetrics {
    match counts.total {
        Some(total) => {
            VideoSourceMetrics::with_total(counts.tiktok, counts.instagram, counts.upload, total)
        }
        None => VideoSourceMetrics::from_counts(counts.tiktok, counts.instagram, counts.upload),
    }
}

// ============================================================================
// Widget Usage
// ============================================================================

/// Display labels for known CTA action ids. Unknown ids pass through
/// verbatim so newly added actions stay visible instead of being dropped.
fn cta_label(id: &str) -> &str {
    match id {
        "product-page" => "Open product detail page",
        "product-modal" => "Show product detail within the modal",
        "add-to-cart" => "Add to cart (no page change)",
        "cart-page" => "Add to cart and open cart page",
        other => other,
    }
}

/// Layout tallies as an ordered label list, filtered to count > 0.
pub fn widget_types(breakdown: &RawLayoutBreakdown) -> Vec<WidgetTypeCount> {
    [
        ("Basic carousel", breakdown.basic_carousel),
        ("Highlighted carousel", breakdown.highlighted_carousel),
        ("Grid", breakdown.grid),
        ("Float", breakdown.float),
        ("Story", breakdown.story),
        ("List", breakdown.list),
    ]
    .into_iter()
    .filter(|(_, count)| *count > 0)
    .map(|(label, count)| WidgetTypeCount::new(label, count))
    .collect()
}

/// CTA tallies over the union of the desktop and mobile key sets.
/// Actions with a zero combined total are excluded.
pub fn cta_actions(raw: &RawCtaActions) -> Vec<CtaActionCount> {
    let keys: BTreeSet<&str> = raw
        .desktop
        .keys()
        .chain(raw.mobile.keys())
        .map(String::as_str)
        .collect();

    keys.into_iter()
        .filter_map(|key| {
            let desktop = raw.desktop.get(key).copied().unwrap_or(0);
            let mobile = raw.mobile.get(key).copied().unwrap_or(0);
            if desktop + mobile > 0 {
                Some(CtaActionCount::new(cta_label(key), desktop, mobile))
            } else {
                None
            }
        })
        .collect()
}

/// Widget usage for either scope.
///
/// All-stores responses must carry a layout breakdown; a per-store
/// response without one is treated as a store with no widgets.
pub fn widget_usage(
    raw: &RawWidgetsResponse,
    scope: Scope,
) -> Result<WidgetUsageMetrics, AnalyticsError> {
    let breakdown = match (raw.layout_breakdown, scope) {
        (Some(breakdown), _) => breakdown,
        (None, Scope::PerStore) => RawLayoutBreakdown::default(),
        (None, Scope::AllStores) => {
            return Err(AnalyticsError::InvalidResponse(
                "missing layoutBreakdown in widgets response".to_string(),
            ))
        }
    };

    let total_widgets = raw.total_widgets.or(raw.active_widgets).unwrap_or(0);
    let active_widgets = raw.active_widgets.unwrap_or(total_widgets);

    let merchants = match scope {
        Scope::PerStore => 1,
        Scope::AllStores => raw.total_active_merchants.unwrap_or(1).max(1),
    };

    Ok(WidgetUsageMetrics {
        widget_types: widget_types(&breakdown),
        avg_widgets_per_merchant: total_widgets as f64 / merchants as f64,
        avg_active_widgets_per_merchant: active_widgets as f64 / merchants as f64,
        cta_actions: raw.cta_actions.as_ref().map(cta_actions).unwrap_or_default(),
        product_pages_count: raw.product_pages_count,
        other_pages_count: raw.other_pages_count,
    })
}

// ============================================================================
// Time Series
// ============================================================================

/// Parse raw series buckets, dropping entries without a parseable date
/// or a numeric value.
pub fn time_series(points: &[RawTimeSeriesPoint]) -> Vec<TimeSeriesPoint> {
    points
        .iter()
        .filter_map(|point| {
            let date = NaiveDate::parse_from_str(point.date.as_deref()?, "%Y-%m-%d").ok()?;
            Some(TimeSeriesPoint::new(date, point.value?))
        })
        .collect()
}

// ============================================================================
// Summary & Top Videos
// ============================================================================

/// Summary KPIs from video totals.
///
/// Previous-period values default to the current value until upstream
/// exposes historical comparison data, which renders as a 0% delta.
/// Revenue comes from a different endpoint and is passed in.
pub fn summary_metrics(raw: &RawVideosResponse, revenue: MetricWithChange) -> SummaryMetrics {
    let views = raw.total_views;
    let likes = raw.total_likes;
    let shares = raw.total_shares;
    let engagement = engagement_rate(views, likes, shares);

    let previous_views = raw.previous_views.unwrap_or(views);
    let previous_likes = raw.previous_likes.unwrap_or(likes);
    let previous_shares = raw.previous_shares.unwrap_or(shares);
    let previous_engagement = raw.previous_engagement_rate.unwrap_or(engagement);

    SummaryMetrics {
        total_views: MetricWithChange::from_previous(views as f64, previous_views as f64),
        total_likes: MetricWithChange::from_previous(likes as f64, previous_likes as f64),
        total_shares: MetricWithChange::from_previous(shares as f64, previous_shares as f64),
        engagement_rate: MetricWithChange::from_previous(engagement, previous_engagement),
        revenue,
    }
}

fn synthesized_title(video_id: &str) -> String {
    let short: String = video_id.chars().take(8).collect();
    if short.is_empty() {
        "Video Unknown".to_string()
    } else {
        format!("Video {short}")
    }
}

/// Ranked top videos, capped at [`TOP_VIDEOS_LIMIT`].
///
/// Per-video engagement uses the scope-wide total views as denominator so
/// entries are comparable across the table. Missing titles are
/// synthesized from the video id.
pub fn top_videos(videos: Vec<RawVideo>, overall_views: u64) -> Vec<VideoAnalytics> {
    videos
        .into_iter()
        .take(TOP_VIDEOS_LIMIT)
        .map(|video| {
            let title = video
                .title
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| synthesized_title(&video.video_id));
            VideoAnalytics {
                engagement: engagement_rate(overall_views, video.likes, video.shares),
                video_id: video.video_id,
                title,
                views: video.views,
                likes: video.likes,
                shares: video.shares,
                thumbnail: video.thumbnail,
            }
        })
        .collect()
}

/// The full all-stores analytics bundle.
///
/// The upstream endpoint has no time-series or revenue data yet, so the
/// chart and the revenue KPI come from `defaults`, as does the top-videos
/// table when the response carries none.
pub fn analytics_data(
    raw: RawVideosResponse,
    period: Period,
    defaults: &AnalyticsData,
) -> AnalyticsData {
    let overall_views = raw.total_views;
    let summary = summary_metrics(&raw, defaults.summary.revenue);

    let videos = raw
        .top_videos
        .map(|videos| videos.into_by_views())
        .unwrap_or_default();
    let top = top_videos(videos, overall_views);

    AnalyticsData {
        summary,
        chart_data: defaults.chart_data.clone(),
        top_videos: if top.is_empty() {
            defaults.top_videos.clone()
        } else {
            top
        },
        period,
    }
}

// ============================================================================
// Revenue
// ============================================================================

fn series_metric(raw: &RawSeriesMetric) -> MetricWithTimeSeries {
    MetricWithTimeSeries::new(
        MetricWithChange::from_previous(raw.value, raw.previous_value),
        time_series(&raw.time_series),
    )
}

/// Revenue for both attribution points, falling back side-by-side to the
/// defaults when the upstream omits one.
pub fn revenue_metrics(raw: &RawRevenue, defaults: &RevenueMetrics) -> RevenueMetrics {
    RevenueMetrics {
        in_video: raw
            .in_video
            .as_ref()
            .map(series_metric)
            .unwrap_or_else(|| defaults.in_video.clone()),
        post_video: raw
            .post_video
            .as_ref()
            .map(series_metric)
            .unwrap_or_else(|| defaults.post_video.clone()),
    }
}

// ============================================================================
// Per-Store Bundles
// ============================================================================

/// Replace the base series with an upstream one when a non-empty parseable
/// series arrived on either sibling response.
fn series_override(
    base: &MetricWithTimeSeries,
    primary: Option<&[RawTimeSeriesPoint]>,
    secondary: Option<&[RawTimeSeriesPoint]>,
) -> MetricWithTimeSeries {
    let parsed = primary
        .or(secondary)
        .map(time_series)
        .filter(|series| !series.is_empty());

    match parsed {
        Some(series) => MetricWithTimeSeries {
            time_series: series,
            ..base.clone()
        },
        None => base.clone(),
    }
}

/// Combine the two by-domain sibling responses into a per-store bundle.
///
/// Conversion and revenue KPI values come from `defaults` until dedicated
/// per-store endpoints exist; live time series override the default ones
/// when present.
pub fn per_store_metrics_by_domain(
    domain_name: &str,
    widgets: &RawWidgetsResponse,
    videos: &RawVideosResponse,
    defaults: &PerStoreMetrics,
) -> Result<PerStoreMetrics, AnalyticsError> {
    let summary = summary_metrics(videos, defaults.revenue.total());

    let video_source = video_source(&videos.platform_counts.unwrap_or_default());
    let widget_usage = widget_usage(widgets, Scope::PerStore)?;

    let conversion = ConversionMetrics {
        orders_from_shopvid: series_override(
            &defaults.conversion.orders_from_shopvid,
            videos.orders_time_series.as_deref(),
            widgets.orders_time_series.as_deref(),
        ),
        atc_rate_mobile: series_override(
            &defaults.conversion.atc_rate_mobile,
            videos.atc_rate_mobile_time_series.as_deref(),
            widgets.atc_rate_mobile_time_series.as_deref(),
        ),
        atc_rate_desktop: series_override(
            &defaults.conversion.atc_rate_desktop,
            videos.atc_rate_desktop_time_series.as_deref(),
            widgets.atc_rate_desktop_time_series.as_deref(),
        ),
        cvr: series_override(
            &defaults.conversion.cvr,
            videos.cvr_time_series.as_deref(),
            widgets.cvr_time_series.as_deref(),
        ),
    };

    let revenue = RevenueMetrics {
        in_video: series_override(
            &defaults.revenue.in_video,
            videos.in_video_time_series.as_deref(),
            widgets.in_video_time_series.as_deref(),
        ),
        post_video: series_override(
            &defaults.revenue.post_video,
            videos.post_video_time_series.as_deref(),
            widgets.post_video_time_series.as_deref(),
        ),
    };

    let top = top_videos(
        videos
            .top_videos
            .clone()
            .map(|videos| videos.into_by_views())
            .unwrap_or_default(),
        videos.total_views,
    );

    let store_id = widgets
        .store_id
        .clone()
        .or_else(|| videos.store_id.clone())
        .unwrap_or_else(|| domain_name.to_string());
    let store_name = widgets
        .store_name
        .clone()
        .or_else(|| videos.store_name.clone())
        .unwrap_or_else(|| domain_name.to_string());

    Ok(PerStoreMetrics {
        store_id,
        store_name,
        summary,
        video_source,
        widget_usage,
        conversion,
        revenue,
        top_videos: top,
    })
}

/// Validate and complete a pre-aggregated per-store stats response.
///
/// `videoSource`, `conversion` and `revenue` are required; their absence
/// invalidates the whole response. The remaining sections default from
/// `defaults` when missing.
pub fn per_store_metrics_by_id(
    store_id: &str,
    fallback_name: &str,
    raw: RawShopStats,
    defaults: &PerStoreMetrics,
) -> Result<PerStoreMetrics, AnalyticsError> {
    let missing =
        |key: &str| AnalyticsError::InvalidResponse(format!("missing {key} in per-store stats"));

    let video_source = raw.video_source.ok_or_else(|| missing("videoSource"))?;
    let conversion = raw.conversion.ok_or_else(|| missing("conversion"))?;
    let revenue = raw.revenue.ok_or_else(|| missing("revenue"))?;

    Ok(PerStoreMetrics {
        store_id: store_id.to_string(),
        store_name: raw
            .store_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| fallback_name.to_string()),
        summary: raw.summary.unwrap_or(defaults.summary),
        video_source,
        widget_usage: raw.widget_usage.unwrap_or_else(|| defaults.widget_usage.clone()),
        conversion,
        revenue,
        top_videos: raw
            .top_videos
            .unwrap_or_else(|| defaults.top_videos.clone()),
    })
}

// ============================================================================
// Tests
// ============================================================================
