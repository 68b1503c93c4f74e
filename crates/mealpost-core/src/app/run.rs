//! MenuApp - one daily run: cache → feed → select → cache → webhook.

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{DateQuery, DeliveryError, ErrorKind};
use crate::ports::{CacheStore, Clock, FeedClient, WebhookSender};
use crate::selector::{scan_limit_for, select_menu_post};

/// Whether a cached selection may answer the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    Use,
    Bypass,
}

/// What to do with the image once it is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Collect and cache only (crawl-only).
    Skip,
    /// Send to this webhook URL.
    Webhook(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub account: String,
    pub target_date: DateQuery,

    /// Overrides the date-dependent scan limit.
    pub scan_limit: Option<usize>,

    pub cache_mode: CacheMode,
    pub delivery: Delivery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    Delivered { image_url: String, from_cache: bool },
    Collected { image_url: String, from_cache: bool },
    /// No cached entry and no post in the scan window names the date.
    NotFound,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("menu delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Delivery(e) => e.kind(),
        }
    }
}

/// Composes the ports. Built with [`super::MenuAppBuilder`].
pub struct MenuApp {
    feed: Box<dyn FeedClient>,
    sender: Box<dyn WebhookSender>,
    cache: Box<dyn CacheStore>,
    clock: Box<dyn Clock>,
}

impl MenuApp {
    pub(crate) fn new(
        feed: Box<dyn FeedClient>,
        sender: Box<dyn WebhookSender>,
        cache: Box<dyn CacheStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            feed,
            sender,
            cache,
            clock,
        }
    }

    pub fn today(&self) -> DateQuery {
        self.clock.today()
    }

    pub async fn run(&self, request: &RunRequest) -> Result<RunReport, AppError> {
        let date = request.target_date;

        // An entry without a URL counts as a miss.
        let cached = match request.cache_mode {
            CacheMode::Use => self.cache.get(date).filter(|entry| !entry.image_url.is_empty()),
            CacheMode::Bypass => None,
        };

        let (image_url, from_cache) = match cached {
            Some(entry) => {
                info!(%date, image_url = %entry.image_url, "using cached image");
                (entry.image_url, true)
            }
            None => match self.collect(request).await {
                Some(image_url) => (image_url, false),
                None => {
                    info!(%date, account = %request.account, "no menu post found");
                    return Ok(RunReport::NotFound);
                }
            },
        };

        match &request.delivery {
            Delivery::Skip => {
                info!(%date, "crawl-only: not sending");
                Ok(RunReport::Collected {
                    image_url,
                    from_cache,
                })
            }
            Delivery::Webhook(webhook_url) => {
                self.sender.deliver(webhook_url, &image_url).await?;
                Ok(RunReport::Delivered {
                    image_url,
                    from_cache,
                })
            }
        }
    }

    /// Fetches, selects and caches. A feed failure means no candidates.
    async fn collect(&self, request: &RunRequest) -> Option<String> {
        let date = request.target_date;
        info!(%date, account = %request.account, "fetching menu post");

        let posts = match self.feed.fetch_recent_posts(&request.account).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!(kind = ?e.kind(), error = %e, "feed fetch failed, treating as no candidates");
                return None;
            }
        };

        let scan_limit = request
            .scan_limit
            .unwrap_or_else(|| scan_limit_for(date, self.clock.today()));
        let post = select_menu_post(&posts, date, scan_limit)?;

        if let Err(e) = self.cache.put(date, &post.image_url, &request.account) {
            warn!(kind = ?e.kind(), error = %e, "could not save cache entry");
        }
        Some(post.image_url)
    }
}
