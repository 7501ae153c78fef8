use serde::{Deserialize, Serialize};

use crate::content_id::ContentId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TvShow {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl TvShow {
    pub fn content_id(&self) -> ContentId {
        ContentId::Show(self.id)
    }

    pub fn title(&self) -> &str {
        &self.name
    }

    pub fn poster_url(&self) -> Option<String> {
        crate::image_url("w500", self.poster_path.as_deref())
    }

    pub fn poster_url_small(&self) -> Option<String> {
        crate::image_url("w185", self.poster_path.as_deref())
    }

    pub fn release_year(&self) -> Option<String> {
        crate::year_of(self.first_air_date.as_deref())
    }

    pub fn genres(&self) -> Vec<&'static str> {
        crate::genre::genre_labels(crate::MediaKind::Show, &self.genre_ids)
    }
}
