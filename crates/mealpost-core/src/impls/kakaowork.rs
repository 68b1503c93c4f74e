//! KakaoWork incoming-webhook sender.
//!
//! Posts a fixed message: an announcement text, an `image_link` block with the
//! menu image, and a button that opens the image in the system browser.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::DeliveryError;
use crate::ports::WebhookSender;

const ANNOUNCEMENT: &str = "오늘의 메뉴 (이미지를 클릭하면 전체보기가 가능합니다)";
const BUTTON_TEXT: &str = "이미지 전체보기";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Message body accepted by the webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuMessage {
    pub text: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    ImageLink {
        url: String,
    },
    Button {
        text: String,
        style: String,
        action_type: String,
        value: String,
    },
}

impl MenuMessage {
    pub fn for_image(image_url: &str) -> Self {
        Self {
            text: ANNOUNCEMENT.to_string(),
            blocks: vec![
                Block::ImageLink {
                    url: image_url.to_string(),
                },
                Block::Button {
                    text: BUTTON_TEXT.to_string(),
                    style: "default".to_string(),
                    action_type: "open_system_browser".to_string(),
                    value: image_url.to_string(),
                },
            ],
        }
    }
}

/// Sends the menu message to a KakaoWork webhook URL.
#[derive(Debug, Clone)]
pub struct KakaoWorkSender {
    client: reqwest::Client,
}

impl KakaoWorkSender {
    pub fn new() -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WebhookSender for KakaoWorkSender {
    async fn deliver(&self, webhook_url: &str, image_url: &str) -> Result<(), DeliveryError> {
        let message = MenuMessage::for_image(image_url);
        debug!(image_url, "posting menu message");

        let response = self.client.post(webhook_url).json(&message).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
            });
        }

        info!(status = status.as_u16(), "menu message delivered");
        Ok(())
    }
}
