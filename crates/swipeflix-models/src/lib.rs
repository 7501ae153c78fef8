pub mod batch;
pub mod category;
pub mod content_id;
pub mod details;
pub mod genre;
pub mod item;
pub mod movie;
pub mod news;
pub mod search;
pub mod show;

pub use batch::{BatchFailure, FetchBatch};
pub use category::{MovieCategory, ShowCategory};
pub use content_id::{ContentId, MediaKind};
pub use details::{CastMember, Details, Logo, Video};
pub use genre::{genre_labels, genre_name, genres_for, MOVIE_GENRES, TV_GENRES};
pub use item::{AdSlot, ContentItem};
pub use movie::Movie;
pub use news::{NewsItem, NewsSource};
pub use search::{SearchHit, SearchResult};
pub use show::TvShow;

/// Default TMDB image CDN prefix (without size segment).
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

pub(crate) fn image_url(size: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}/{}{}", IMAGE_BASE_URL, size, p))
}

/// First four characters of a `YYYY-MM-DD` date, if they look like a year.
pub(crate) fn year_of(date: Option<&str>) -> Option<String> {
    date.and_then(|d| d.get(..4))
        .filter(|y| y.chars().all(|c| c.is_ascii_digit()))
        .map(|y| y.to_string())
}
