//! Domain model (posts, dates, cache entries, errors).

pub mod cache_entry;
pub mod date;
pub mod errors;
pub mod post;

pub use self::cache_entry::CacheEntry;
pub use self::date::DateQuery;
pub use self::errors::{CacheError, DeliveryError, ErrorKind, FeedError};
pub use self::post::{MediaType, PostId, PostSummary};
