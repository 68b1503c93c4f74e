//! mealpost-core
//!
//! Finds the post that carries a given day's menu image on a feed, remembers
//! it per date, and hands the image link to a chat webhook.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（PostSummary, DateQuery, CacheEntry, errors）
//! - **selector**: 候補選択（日付マッチ → スコアリング → 安定ソート）
//! - **ports**: 抽象化レイヤー（FeedClient, WebhookSender, CacheStore, Clock）
//! - **impls**: ports の実装（InstagramFeed, KakaoWorkSender, JsonFileCache, in-memory）
//! - **app**: アプリケーション層（MenuAppBuilder, MenuApp）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod selector;

pub use self::selector::select_menu_post;
