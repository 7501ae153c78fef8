use serde::{Deserialize, Serialize};
use std::fmt;

/// Which half of the catalog a record belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Show,
}

impl MediaKind {
    /// Path segment used by the catalog API (`movie` / `tv`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Show => write!(f, "show"),
        }
    }
}

/// Stable identity of a piece of content.
///
/// The variant is part of the identity, so movie 42 and show 42 never
/// collide. News items have no upstream id and are keyed on their
/// title plus publish timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(tag = "type", content = "key", rename_all = "snake_case")]
pub enum ContentId {
    Movie(u64),
    Show(u64),
    News { title: String, published: i64 },
    Ad(u32),
}

impl ContentId {
    pub fn news(title: &str, published_at: Option<i64>) -> Self {
        ContentId::News {
            title: title.to_string(),
            published: published_at.unwrap_or(0),
        }
    }

    pub fn kind(&self) -> Option<MediaKind> {
        match self {
            ContentId::Movie(_) => Some(MediaKind::Movie),
            ContentId::Show(_) => Some(MediaKind::Show),
            ContentId::News { .. } | ContentId::Ad(_) => None,
        }
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentId::Movie(id) => write!(f, "movie:{}", id),
            ContentId::Show(id) => write!(f, "show:{}", id),
            ContentId::News { title, published } => write!(f, "news:{}@{}", title, published),
            ContentId::Ad(slot) => write!(f, "ad:{}", slot),
        }
    }
}
