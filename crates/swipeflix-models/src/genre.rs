use crate::content_id::MediaKind;

pub const MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (27, "Horror"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Sci-Fi"),
    (53, "Thriller"),
];

pub const TV_GENRES: &[(u32, &str)] = &[
    (10759, "Action & Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (10762, "Kids"),
    (9648, "Mystery"),
    (10763, "News"),
    (10764, "Reality"),
    (10765, "Sci-Fi & Fantasy"),
    (10766, "Soap"),
    (10767, "Talk"),
    (10768, "War & Politics"),
    (37, "Western"),
];

pub fn genres_for(kind: MediaKind) -> &'static [(u32, &'static str)] {
    match kind {
        MediaKind::Movie => MOVIE_GENRES,
        MediaKind::Show => TV_GENRES,
    }
}

pub fn genre_name(kind: MediaKind, id: u32) -> Option<&'static str> {
    genres_for(kind)
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, name)| *name)
}

/// Map genre ids to labels, preserving order and skipping unknown ids.
pub fn genre_labels(kind: MediaKind, ids: &[u32]) -> Vec<&'static str> {
    ids.iter().filter_map(|id| genre_name(kind, *id)).collect()
}
