pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, FeedConfig, HttpConfig, NewsConfig, NewsSourceConfig, TmdbConfig, default_news_sources};
pub use credentials::{CredentialStore, KeySource, TMDB_API_KEY_ENV};
pub use paths::{PathManager, BASE_PATH_ENV};
