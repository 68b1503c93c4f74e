//! Errors - エラー型と分類
//!
//! 「該当なし」はエラーではなく `None` / `RunReport::NotFound` で表します。
//! ここにあるのは境界（フィード、Webhook、キャッシュファイル）で起きる失敗だけです。

use thiserror::Error;

/// ErrorKind は失敗の運用分類
///
/// - Upstream: フィード取得・Webhook 配送の失敗（コア内ではリトライしない）
/// - Storage: キャッシュファイルの I/O 失敗
/// - Configuration: 必須設定の欠落（CLI 側で使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Upstream,
    Storage,
    Configuration,
}

/// Failure to fetch posts from the feed provider.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("feed responded with HTTP {status}")]
    Status { status: u16 },

    #[error("feed response could not be decoded: {0}")]
    Decode(String),

    #[error("feed account not found: {0}")]
    AccountNotFound(String),
}

/// Failure to deliver the message to the webhook.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook responded with HTTP {status}")]
    Status { status: u16 },
}

/// Unrecoverable cache I/O failure.
///
/// Corrupt content is not an error: it is logged and treated as absent.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cache could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

impl FeedError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Upstream
    }
}

impl DeliveryError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Upstream
    }
}

impl CacheError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Storage
    }
}
