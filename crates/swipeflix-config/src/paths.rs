use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Overrides every platform directory, e.g. a mounted volume in a container.
pub const BASE_PATH_ENV: &str = "SWIPEFLIX_BASE_PATH";

const APP_DIR: &str = "swipeflix";

/// On-disk layout: config and credentials in one directory, the watchlist
/// and logs under a data directory.
#[derive(Debug, Clone)]
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    /// `$SWIPEFLIX_BASE_PATH` when set, otherwise the platform directories.
    pub fn new() -> Result<Self> {
        if let Some(base) = std::env::var_os(BASE_PATH_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_base(PathBuf::from(base)));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?
            .join(APP_DIR);
        let data_dir = dirs::data_local_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| config_dir.join("data"));
        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Config files at `base`, data in `base/data`.
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            data_dir: base.join("data"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    /// Directory holding the persisted watchlist records
    pub fn watchlist_dir(&self) -> PathBuf {
        self.data_dir.join("watchlist")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir().join("swipeflix.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [
            self.config_dir.clone(),
            self.log_dir(),
            self.watchlist_dir(),
        ] {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}

impl Default for PathManager {
    /// Falls back to `./.swipeflix` on platforms without a home directory.
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".swipeflix")))
    }
}
