//! App - アプリケーション層
//!
//! ports を組み合わせて 1 回分の実行（キャッシュ確認 → フィード取得 → 選択 →
//! キャッシュ保存 → webhook 配送）を実装します。
//!
//! # 主要コンポーネント
//! - **MenuAppBuilder**: ports のワイヤリング（Fail-fast）
//! - **MenuApp**: 実行本体

pub mod builder;
pub mod run;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, MenuAppBuilder};
pub use self::run::{AppError, CacheMode, Delivery, MenuApp, RunReport, RunRequest};
