use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::sync::Arc;
use swipeflix_config::{Config, CredentialStore, PathManager, TMDB_API_KEY_ENV};
use swipeflix_core::{Catalog, FetchOptions, FileStorage, NewsDesk, SourceSelection, WatchlistStore};
use swipeflix_sources::{RssClient, TmdbClient};
use tracing::debug;

/// Paths and configuration shared by every command.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| eyre!("Invalid config {}: {}", config_file.display(), e))?;
        debug!("Using config directory {}", paths.config_dir().display());
        Ok(Self { paths, config })
    }

    pub fn options(&self) -> FetchOptions {
        FetchOptions::from(&self.config.feed)
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        let mut store = CredentialStore::new(self.paths.credentials_file());
        store
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
        Ok(store)
    }

    pub fn catalog(&self) -> Result<Catalog> {
        let (api_key, source) = self.credentials()?.resolve_tmdb_api_key().ok_or_else(|| {
            eyre!(
                "No TMDB API key configured. Set {} or run 'swipeflix config set-api-key'",
                TMDB_API_KEY_ENV
            )
        })?;
        debug!("Using TMDB API key from {}", source);
        let client = TmdbClient::new(api_key, &self.config.tmdb, &self.config.http)
            .wrap_err("Failed to create TMDB client")?;
        Ok(Catalog::new(Arc::new(client), self.options()))
    }

    pub fn news_desk(&self) -> NewsDesk {
        let client = RssClient::new(&self.config.http);
        NewsDesk::new(Arc::new(client), self.config.news.enabled_sources())
    }

    /// Saved feed choice, kept next to the watchlist records.
    pub fn news_selection(&self) -> SourceSelection {
        let storage = FileStorage::new(self.paths.data_dir());
        SourceSelection::load(Box::new(storage), &self.config.news.enabled_sources())
    }

    pub fn watchlist(&self) -> WatchlistStore {
        let storage = FileStorage::new(&self.paths.watchlist_dir());
        WatchlistStore::load(Box::new(storage))
    }
}
