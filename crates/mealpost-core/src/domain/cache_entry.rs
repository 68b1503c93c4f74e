//! Cache entry: the remembered selection for one date.

use chrono::{DateTime, Utc};

use super::DateQuery;

/// A previously selected menu image for a date.
///
/// Created or overwritten on every successful selection; never expired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub date: DateQuery,
    pub image_url: String,
    pub recorded_at: DateTime<Utc>,

    /// Where the image came from (the feed account name).
    pub source: String,
}
