use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content_id::ContentId;

/// A syndicated news outlet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsSource {
    pub name: String,
    pub feed_url: String,
}

impl NewsSource {
    pub fn new(name: impl Into<String>, feed_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            feed_url: feed_url.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Name of the [`NewsSource`] this entry came from
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl NewsItem {
    pub fn content_id(&self) -> ContentId {
        ContentId::news(&self.title, self.published_at.map(|dt| dt.timestamp()))
    }
}
