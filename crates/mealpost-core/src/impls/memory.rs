//! In-memory ports - 開発用・テスト用
//!
//! ネットワークやファイルを使わずに MenuApp を動かすための実装です。

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::{CacheEntry, CacheError, DateQuery, DeliveryError, FeedError, PostSummary};
use crate::ports::{CacheStore, Clock, FeedClient, WebhookSender};

/// A feed that always returns the same posts (or always fails).
pub struct StaticFeed {
    posts: Option<Vec<PostSummary>>,
    fetches: AtomicUsize,
}

impl StaticFeed {
    pub fn new(posts: Vec<PostSummary>) -> Self {
        Self {
            posts: Some(posts),
            fetches: AtomicUsize::new(0),
        }
    }

    /// A feed whose every fetch fails with `AccountNotFound`.
    pub fn failing() -> Self {
        Self {
            posts: None,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl FeedClient for StaticFeed {
    async fn fetch_recent_posts(&self, account: &str) -> Result<Vec<PostSummary>, FeedError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.posts
            .clone()
            .ok_or_else(|| FeedError::AccountNotFound(account.to_string()))
    }
}

/// A sender that records deliveries instead of sending them.
#[derive(Default)]
pub struct RecordingSender {
    delivered: Mutex<Vec<(String, String)>>,
    fail_status: Option<u16>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delivery fails as if the webhook answered `status`.
    pub fn failing_with(status: u16) -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            fail_status: Some(status),
        }
    }

    /// `(webhook_url, image_url)` pairs, oldest first.
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl WebhookSender for RecordingSender {
    async fn deliver(&self, webhook_url: &str, image_url: &str) -> Result<(), DeliveryError> {
        if let Some(status) = self.fail_status {
            return Err(DeliveryError::Status { status });
        }
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((webhook_url.to_string(), image_url.to_string()));
        Ok(())
    }
}

/// CacheStore kept in a map. `read_only` makes every put fail.
pub struct MemoryCache<C> {
    entries: Mutex<BTreeMap<DateQuery, CacheEntry>>,
    clock: C,
    read_only: bool,
}

impl<C: Clock> MemoryCache<C> {
    pub fn new(clock: C) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            clock,
            read_only: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<C: Clock> CacheStore for MemoryCache<C> {
    fn get(&self, date: DateQuery) -> Option<CacheEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&date)
            .cloned()
    }

    fn put(&self, date: DateQuery, image_url: &str, source: &str) -> Result<CacheEntry, CacheError> {
        if self.read_only {
            return Err(CacheError::Io {
                path: "memory".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        let entry = CacheEntry {
            date,
            image_url: image_url.to_string(),
            recorded_at: self.clock.now(),
            source: source.to_string(),
        };
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(date, entry.clone());
        Ok(entry)
    }
}
