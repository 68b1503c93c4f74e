//! Post model: what the feed hands to the selector.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a post, unique within one feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How the post carries its media.
///
/// Menu-text graphics are usually posted as a single image, while food photos
/// tend to come as a multi-image gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    SingleImage,
    MultiImage,
    Other,
}

/// A summary of one feed post.
///
/// Immutable once fetched. `caption` and `accessibility_text` are empty
/// strings when the feed has nothing for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: PostId,
    pub captured_at: DateTime<Utc>,

    #[serde(default)]
    pub caption: String,

    /// Machine-generated description of the image content.
    #[serde(default)]
    pub accessibility_text: String,

    pub media_type: MediaType,
    pub image_url: String,
}

impl PostSummary {
    pub fn new(
        id: impl Into<String>,
        captured_at: DateTime<Utc>,
        media_type: MediaType,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: PostId::new(id),
            captured_at,
            caption: String::new(),
            accessibility_text: String::new(),
            media_type,
            image_url: image_url.into(),
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn with_accessibility_text(mut self, text: impl Into<String>) -> Self {
        self.accessibility_text = text.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn builder_defaults_text_fields_to_empty() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        let post = PostSummary::new("p1", at, MediaType::SingleImage, "https://img/1.jpg");

        assert_eq!(post.id.as_str(), "p1");
        assert!(post.caption.is_empty());
        assert!(post.accessibility_text.is_empty());
    }

    #[test]
    fn missing_text_fields_deserialize_as_empty() {
        let json = r#"{
            "id": "p2",
            "captured_at": "2024-03-05T00:00:00Z",
            "media_type": "multi_image",
            "image_url": "https://img/2.jpg"
        }"#;
        let post: PostSummary = serde_json::from_str(json).expect("deserialize");
        assert_eq!(post.media_type, MediaType::MultiImage);
        assert_eq!(post.caption, "");
        assert_eq!(post.accessibility_text, "");
    }
}
