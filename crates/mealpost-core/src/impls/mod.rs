//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InstagramFeed**: 公開プロフィールのフィード取得（FeedClient）
//! - **KakaoWorkSender**: KakaoWork の incoming webhook（WebhookSender）
//! - **JsonFileCache**: JSON ファイルのキャッシュ（CacheStore）
//! - **StaticFeed / RecordingSender / MemoryCache**: 開発・テスト用

pub mod instagram;
pub mod json_cache;
pub mod kakaowork;
pub mod memory;

// 主要な型を再エクスポート
pub use self::instagram::InstagramFeed;
pub use self::json_cache::{JsonFileCache, DEFAULT_CACHE_FILE};
pub use self::kakaowork::{KakaoWorkSender, MenuMessage};
pub use self::memory::{MemoryCache, RecordingSender, StaticFeed};
