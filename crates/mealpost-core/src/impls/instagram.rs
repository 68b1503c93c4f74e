//! Public profile feed client.
//!
//! Reads the first page of an account's timeline from the web profile
//! endpoint and maps each post node to a [`PostSummary`]. No login, no
//! pagination, no rate-limit handling.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{FeedError, MediaType, PostSummary};
use crate::ports::FeedClient;

const DEFAULT_BASE_URL: &str = "https://i.instagram.com";
const PROFILE_PATH: &str = "/api/v1/users/web_profile_info/";
/// App id the public web client sends; the endpoint rejects requests without it.
const WEB_APP_ID: &str = "936619743392459";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ----------------------------------------
// Response shape (only the fields we read)
// ----------------------------------------

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    data: ProfileData,
}

#[derive(Debug, Deserialize)]
struct ProfileData {
    user: Option<ProfileUser>,
}

#[derive(Debug, Deserialize)]
struct ProfileUser {
    edge_owner_to_timeline_media: Edges<MediaNode>,
}

#[derive(Debug, Deserialize)]
struct Edges<T> {
    #[serde(default = "Vec::new")]
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
struct MediaNode {
    id: String,
    #[serde(rename = "__typename")]
    typename: String,
    display_url: String,
    taken_at_timestamp: i64,
    #[serde(default)]
    accessibility_caption: Option<String>,
    #[serde(default)]
    edge_media_to_caption: Option<Edges<CaptionNode>>,
}

#[derive(Debug, Deserialize)]
struct CaptionNode {
    text: String,
}

fn media_type_of(typename: &str) -> MediaType {
    match typename {
        "GraphImage" => MediaType::SingleImage,
        "GraphSidecar" => MediaType::MultiImage,
        _ => MediaType::Other,
    }
}

impl MediaNode {
    fn into_summary(self) -> Result<PostSummary, FeedError> {
        let captured_at = DateTime::<Utc>::from_timestamp(self.taken_at_timestamp, 0).ok_or_else(|| {
            FeedError::Decode(format!(
                "post {} has an out-of-range timestamp {}",
                self.id, self.taken_at_timestamp
            ))
        })?;

        let caption = self
            .edge_media_to_caption
            .and_then(|captions| captions.edges.into_iter().next())
            .map(|edge| edge.node.text)
            .unwrap_or_default();

        Ok(PostSummary::new(self.id, captured_at, media_type_of(&self.typename), self.display_url)
            .with_caption(caption)
            .with_accessibility_text(self.accessibility_caption.unwrap_or_default()))
    }
}

/// FeedClient for public accounts.
#[derive(Debug, Clone)]
pub struct InstagramFeed {
    client: reqwest::Client,
    base_url: String,
}

impl InstagramFeed {
    pub fn new() -> Result<Self, FeedError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Points the client at another host (a mock server in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl FeedClient for InstagramFeed {
    async fn fetch_recent_posts(&self, account: &str) -> Result<Vec<PostSummary>, FeedError> {
        let url = format!("{}{}", self.base_url, PROFILE_PATH);
        debug!(account, %url, "fetching profile feed");

        let response = self
            .client
            .get(&url)
            .query(&[("username", account)])
            .header("x-ig-app-id", WEB_APP_ID)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let profile: ProfileResponse =
            serde_json::from_slice(&body).map_err(|e| FeedError::Decode(e.to_string()))?;

        let user = profile
            .data
            .user
            .ok_or_else(|| FeedError::AccountNotFound(account.to_string()))?;

        let posts = user
            .edge_owner_to_timeline_media
            .edges
            .into_iter()
            .map(|edge| edge.node.into_summary())
            .collect::<Result<Vec<_>, _>>()?;

        info!(account, posts = posts.len(), "fetched recent posts");
        Ok(posts)
    }
}
