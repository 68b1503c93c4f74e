//! MenuAppBuilder - ports のワイヤリング
//!
//! # Fail-fast 設計
//! - feed / sender / cache は必須、clock は省略時 SystemClock
//! - build() 時に未設定の port をすべて集めて BuildError を返す

use crate::ports::{CacheStore, Clock, FeedClient, SystemClock, WebhookSender};

use super::run::MenuApp;

/// MenuAppBuilder は MenuApp を構築
///
/// # 使用例
/// ```ignore
/// let app = MenuAppBuilder::new()
///     .feed(InstagramFeed::new()?)
///     .sender(KakaoWorkSender::new()?)
///     .cache(JsonFileCache::new("menu_cache.json", SystemClock))
///     .build()?;
/// ```
#[derive(Default)]
pub struct MenuAppBuilder {
    feed: Option<Box<dyn FeedClient>>,
    sender: Option<Box<dyn WebhookSender>>,
    cache: Option<Box<dyn CacheStore>>,
    clock: Option<Box<dyn Clock>>,
}

/// BuildError は MenuApp 構築時のエラー
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Missing ports: {0:?}. These ports must be set before build().")]
    MissingPorts(Vec<&'static str>),
}

impl MenuAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(mut self, feed: impl FeedClient + 'static) -> Self {
        self.feed = Some(Box::new(feed));
        self
    }

    pub fn sender(mut self, sender: impl WebhookSender + 'static) -> Self {
        self.sender = Some(Box::new(sender));
        self
    }

    pub fn cache(mut self, cache: impl CacheStore + 'static) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn build(self) -> Result<MenuApp, BuildError> {
        let mut missing = Vec::new();
        if self.feed.is_none() {
            missing.push("feed");
        }
        if self.sender.is_none() {
            missing.push("sender");
        }
        if self.cache.is_none() {
            missing.push("cache");
        }

        match (self.feed, self.sender, self.cache) {
            (Some(feed), Some(sender), Some(cache)) => {
                let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
                Ok(MenuApp::new(feed, sender, cache, clock))
            }
            _ => Err(BuildError::MissingPorts(missing)),
        }
    }
}
