//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部システム（投稿フィード、チャットの webhook、キャッシュファイル）
//! へのインターフェースを提供し、選択ロジックを I/O から切り離します。

pub mod cache_store;
pub mod clock;
pub mod feed;
pub mod webhook;

// 主要な trait を再エクスポート
pub use self::cache_store::CacheStore;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::feed::FeedClient;
pub use self::webhook::WebhookSender;
