//! Video-source distribution and per-video analytics.

use serde::{Deserialize, Serialize};

/// Counts of merchant videos by ingestion source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSourceMetrics {
    pub tiktok: u64,
    pub instagram: u64,
    pub upload: u64,
    pub total: u64,
}

impl VideoSourceMetrics {
    /// Total derived as the sum of the parts.
    pub fn from_counts(tiktok: u64, instagram: u64, upload: u64) -> Self {
        Self {
            tiktok,
            instagram,
            upload,
            total: tiktok + instagram + upload,
        }
    }

    /// An explicit upstream total wins over the derived sum.
    pub fn with_total(tiktok: u64, instagram: u64, upload: u64, total: u64) -> Self {
        Self {
            tiktok,
            instagram,
            upload,
            total,
        }
    }
}

/// One ranked entry in the top-videos table.
///
/// `engagement` is the video's likes + shares as a percentage of the
/// scope-wide total views, so entries are comparable across the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAnalytics {
    pub video_id: String,
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
    pub engagement: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}
