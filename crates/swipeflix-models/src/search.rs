use serde::{Deserialize, Serialize};

use crate::content_id::ContentId;
use crate::movie::Movie;
use crate::show::TvShow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum SearchHit {
    Movie(Movie),
    Show(TvShow),
}

/// One row of a search response. Keeps the full record so a hit can be
/// saved to the watchlist directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub hit: SearchHit,
}

impl SearchResult {
    pub fn content_id(&self) -> ContentId {
        match &self.hit {
            SearchHit::Movie(m) => m.content_id(),
            SearchHit::Show(s) => s.content_id(),
        }
    }

    pub fn title(&self) -> &str {
        match &self.hit {
            SearchHit::Movie(m) => &m.title,
            SearchHit::Show(s) => &s.name,
        }
    }

    pub fn overview(&self) -> &str {
        match &self.hit {
            SearchHit::Movie(m) => &m.overview,
            SearchHit::Show(s) => &s.overview,
        }
    }

    pub fn image_url(&self) -> Option<String> {
        match &self.hit {
            SearchHit::Movie(m) => m.poster_url_small(),
            SearchHit::Show(s) => s.poster_url_small(),
        }
    }

    pub fn year(&self) -> Option<String> {
        match &self.hit {
            SearchHit::Movie(m) => m.release_year(),
            SearchHit::Show(s) => s.release_year(),
        }
    }

    pub fn rating(&self) -> Option<f64> {
        match &self.hit {
            SearchHit::Movie(m) => m.vote_average,
            SearchHit::Show(s) => s.vote_average,
        }
    }

    pub fn is_movie(&self) -> bool {
        matches!(self.hit, SearchHit::Movie(_))
    }
}

impl From<Movie> for SearchResult {
    fn from(movie: Movie) -> Self {
        Self { hit: SearchHit::Movie(movie) }
    }
}

impl From<TvShow> for SearchResult {
    fn from(show: TvShow) -> Self {
        Self { hit: SearchHit::Show(show) }
    }
}
