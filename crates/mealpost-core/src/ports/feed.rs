//! FeedClient port - 投稿フィードの取得
//!
//! # 実装
//! - InstagramFeed（impls::instagram）: 本番用
//! - StaticFeed（impls::memory）: テスト・開発用

use async_trait::async_trait;

use crate::domain::{FeedError, PostSummary};

/// FeedClient はアカウントの最近の投稿を取得
///
/// 返す順序は新しい順（most-recent-first）。ページングはしません。
#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn fetch_recent_posts(&self, account: &str) -> Result<Vec<PostSummary>, FeedError>;
}
