//! WebhookSender port - チャットへのリンク配送
//!
//! # 実装
//! - KakaoWorkSender（impls::kakaowork）: 本番用
//! - RecordingSender（impls::memory）: テスト用

use async_trait::async_trait;

use crate::domain::DeliveryError;

/// WebhookSender はメニュー画像のリンクを webhook に送る
///
/// non-2xx と通信エラーは失敗。リトライはしません。
#[async_trait]
pub trait WebhookSender: Send + Sync {
    async fn deliver(&self, webhook_url: &str, image_url: &str) -> Result<(), DeliveryError>;
}
