use serde::{Deserialize, Serialize};

use crate::content_id::ContentId;

/// A movie as returned by the catalog list/search endpoints.
///
/// This is also the snapshot persisted in the watchlist, so it carries
/// everything needed to render a card without re-fetching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl Movie {
    pub fn content_id(&self) -> ContentId {
        ContentId::Movie(self.id)
    }

    pub fn poster_url(&self) -> Option<String> {
        crate::image_url("w500", self.poster_path.as_deref())
    }

    pub fn poster_url_small(&self) -> Option<String> {
        crate::image_url("w185", self.poster_path.as_deref())
    }

    pub fn release_year(&self) -> Option<String> {
        crate::year_of(self.release_date.as_deref())
    }

    pub fn genres(&self) -> Vec<&'static str> {
        crate::genre::genre_labels(crate::MediaKind::Movie, &self.genre_ids)
    }
}
