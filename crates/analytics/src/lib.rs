//! Metrics aggregation service for the Shopvid dashboard.
//!
//! Fetches metric families from the Shopable analytics API in parallel,
//! normalizes the heterogeneous payloads into the canonical model from the
//! `domain` crate, and falls back to deterministic mock datasets when the
//! upstream is unconfigured or an all-stores fetch fails.

pub mod config;
pub mod error;
pub mod logging;
pub mod mock;
pub mod normalize;
pub mod service;
pub mod upstream;

pub use config::Config;
pub use error::AnalyticsError;
pub use logging::init_logging;
pub use service::AnalyticsService;
pub use upstream::{HttpUpstream, UpstreamApi};
