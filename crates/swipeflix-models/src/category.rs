use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MovieCategory {
    #[default]
    TopRated,
    Popular,
    NowPlaying,
}

impl MovieCategory {
    /// Path segment in the catalog API
    pub fn as_path(&self) -> &'static str {
        match self {
            MovieCategory::TopRated => "top_rated",
            MovieCategory::Popular => "popular",
            MovieCategory::NowPlaying => "now_playing",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MovieCategory::TopRated => "Top Rated",
            MovieCategory::Popular => "Popular",
            MovieCategory::NowPlaying => "Latest",
        }
    }
}

impl FromStr for MovieCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "top_rated" => Ok(MovieCategory::TopRated),
            "popular" => Ok(MovieCategory::Popular),
            "now_playing" | "latest" => Ok(MovieCategory::NowPlaying),
            other => Err(format!("Unknown movie category: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShowCategory {
    #[default]
    Popular,
    TopRated,
}

impl ShowCategory {
    pub fn as_path(&self) -> &'static str {
        match self {
            ShowCategory::Popular => "popular",
            ShowCategory::TopRated => "top_rated",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShowCategory::Popular => "Popular",
            ShowCategory::TopRated => "Top Rated",
        }
    }
}

impl FromStr for ShowCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "popular" => Ok(ShowCategory::Popular),
            "top_rated" => Ok(ShowCategory::TopRated),
            other => Err(format!("Unknown show category: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movie_category() {
        assert_eq!("top-rated".parse::<MovieCategory>(), Ok(MovieCategory::TopRated));
        assert_eq!("latest".parse::<MovieCategory>(), Ok(MovieCategory::NowPlaying));
        assert!("upcoming".parse::<MovieCategory>().is_err());
        assert_eq!(MovieCategory::NowPlaying.display_name(), "Latest");
    }
}
