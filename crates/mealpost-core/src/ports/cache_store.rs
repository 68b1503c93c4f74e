//! CacheStore port - 日付 → 選択結果の永続マッピング
//!
//! # 実装
//! - JsonFileCache（impls::json_cache）: JSON ファイル（本番用）
//! - MemoryCache（impls::memory）: テスト用

use crate::domain::{CacheEntry, CacheError, DateQuery};

/// CacheStore は日付ごとの選択結果を保存
///
/// # 契約
/// - `get`: 見つからない・壊れている場合は `None`（エラーにしない）
/// - `put`: 他の日付のエントリを変更しない（read-merge-write）
/// - 同時書き込みは last-writer-wins（ロックなし）
pub trait CacheStore: Send + Sync {
    fn get(&self, date: DateQuery) -> Option<CacheEntry>;

    fn put(&self, date: DateQuery, image_url: &str, source: &str) -> Result<CacheEntry, CacheError>;
}
