use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use swipeflix_models::{MovieCategory, NewsSource, ShowCategory};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub news: NewsConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_tmdb_base_url(),
            language: default_language(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

/// How list screens are assembled from fetched pages.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FeedConfig {
    /// Number of pages fetched per list endpoint (pages 1..=N)
    #[serde(default = "default_pages")]
    pub pages: u32,
    #[serde(default = "default_true")]
    pub shuffle: bool,
    #[serde(default)]
    pub ads_removed: bool,
    /// An ad card precedes every `ad_frequency`-th real card (0 disables ads)
    #[serde(default = "default_ad_frequency")]
    pub ad_frequency: usize,
    /// Number of cards rendered on the visible stack
    #[serde(default = "default_stack_depth")]
    pub stack_depth: usize,
    #[serde(default)]
    pub movie_category: MovieCategory,
    #[serde(default)]
    pub show_category: ShowCategory,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            shuffle: default_true(),
            ads_removed: false,
            ad_frequency: default_ad_frequency(),
            stack_depth: default_stack_depth(),
            movie_category: MovieCategory::default(),
            show_category: ShowCategory::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewsConfig {
    #[serde(default = "default_news_sources")]
    pub sources: Vec<NewsSourceConfig>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            sources: default_news_sources(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewsSourceConfig {
    pub name: String,
    pub feed_url: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl NewsConfig {
    /// Enabled sources in configuration order.
    pub fn enabled_sources(&self) -> Vec<NewsSource> {
        self.sources
            .iter()
            .filter(|s| s.enabled)
            .map(|s| NewsSource::new(s.name.clone(), s.feed_url.clone()))
            .collect()
    }
}

fn default_true() -> bool {
    true
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("SwipeFlix/{}", env!("CARGO_PKG_VERSION"))
}

fn default_pages() -> u32 {
    3
}

fn default_ad_frequency() -> usize {
    3
}

fn default_stack_depth() -> usize {
    5
}

pub fn default_news_sources() -> Vec<NewsSourceConfig> {
    [
        ("FirstShowing", "https://www.firstshowing.net/feed/"),
        ("Slashfilm", "https://www.slashfilm.com/feed/"),
        ("Collider", "https://collider.com/feed/"),
        ("The Wrap", "https://www.thewrap.com/category/movies/feed/"),
    ]
    .into_iter()
    .map(|(name, url)| NewsSourceConfig {
        name: name.to_string(),
        feed_url: url.to_string(),
        enabled: true,
    })
    .collect()
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.base_url cannot be empty"));
        }
        if self.http.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("http.timeout_seconds must be greater than zero"));
        }
        if self.feed.pages == 0 || self.feed.pages > 10 {
            return Err(anyhow::anyhow!("feed.pages must be between 1 and 10"));
        }
        if self.feed.stack_depth == 0 {
            return Err(anyhow::anyhow!("feed.stack_depth must be greater than zero"));
        }

        let mut names = HashSet::new();
        for source in &self.news.sources {
            if source.name.trim().is_empty() {
                return Err(anyhow::anyhow!("news source name cannot be empty"));
            }
            if source.feed_url.trim().is_empty() {
                return Err(anyhow::anyhow!("news source '{}' has no feed_url", source.name));
            }
            if !names.insert(source.name.as_str()) {
                return Err(anyhow::anyhow!("Duplicate news source: {}", source.name));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.feed.pages = 2;
        config.feed.ads_removed = true;
        config.feed.movie_category = MovieCategory::Popular;
        config.news.sources.truncate(1);

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.feed.pages, 2);
        assert!(loaded.feed.ads_removed);
        assert_eq!(loaded.feed.movie_category, MovieCategory::Popular);
        assert_eq!(loaded.news.sources.len(), 1);
        assert_eq!(loaded.news.sources[0].name, "FirstShowing");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let content = r#"
[feed]
ads_removed = true

[[news.sources]]
name = "Collider"
feed_url = "https://collider.com/feed/"
"#;
        let config: Config = toml::from_str(content).unwrap();
        assert!(config.feed.ads_removed);
        assert_eq!(config.feed.pages, 3);
        assert_eq!(config.feed.ad_frequency, 3);
        assert_eq!(config.feed.stack_depth, 5);
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.news.sources.len(), 1);
        assert!(config.news.sources[0].enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.news.sources.len(), 4);
        assert_eq!(config.feed.movie_category, MovieCategory::TopRated);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.feed.pages = 0;
        assert!(config.validate().is_err());
        config.feed.pages = 3;

        config.news.sources.push(NewsSourceConfig {
            name: "Collider".to_string(),
            feed_url: "https://example.com/feed".to_string(),
            enabled: true,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enabled_sources() {
        let mut config = NewsConfig::default();
        config.sources[1].enabled = false;
        let names: Vec<String> = config.enabled_sources().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["FirstShowing", "Collider", "The Wrap"]);
    }
}
