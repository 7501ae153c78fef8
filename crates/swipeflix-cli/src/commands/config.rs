use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets, Attribute, Cell, Color, Table};
use serde_json::json;
use swipeflix_config::{Config, CredentialStore, PathManager, TMDB_API_KEY_ENV};

use super::render::section_header;
use crate::output::Output;
use crate::ConfigCommands;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(output),
        ConfigCommands::Init { force } => init_config(force, output),
        ConfigCommands::SetApiKey { key } => set_api_key(key, output),
    }
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let len = s.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }
    let head: String = s.chars().take(2).collect();
    let tail: String = s.chars().skip(len - 2).collect();
    format!("{}***{}", head, tail)
}

fn key_status(store: &CredentialStore) -> (String, String) {
    match store.resolve_tmdb_api_key() {
        Some((key, source)) => (mask_string(&key), source.to_string()),
        None => (mask_string(""), "-".to_string()),
    }
}

fn show_config(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let mut credentials = CredentialStore::new(paths.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    let (masked_key, key_source) = key_status(&credentials);

    output.data(&json!({
        "config_file": config_file.display().to_string(),
        "exists": config_file.exists(),
        "tmdb_api_key": masked_key,
        "tmdb_api_key_source": key_source,
        "config": config,
    }));

    if !config_file.exists() {
        output.warn(format!(
            "No config file at {} (defaults in use, create one with 'swipeflix config init')",
            config_file.display()
        ));
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL).set_header(vec![
        Cell::new("Setting").add_attribute(Attribute::Bold).fg(Color::Cyan),
        Cell::new("Value").add_attribute(Attribute::Bold).fg(Color::Cyan),
    ]);
    let rows: Vec<(&str, String)> = vec![
        ("Config file", config_file.display().to_string()),
        ("Watchlist dir", paths.watchlist_dir().display().to_string()),
        ("TMDB base URL", config.tmdb.base_url.clone()),
        ("TMDB language", config.tmdb.language.clone()),
        ("TMDB API key", format!("{} ({})", masked_key, key_source)),
        ("HTTP timeout", format!("{}s", config.http.timeout_seconds)),
        ("Pages per list", config.feed.pages.to_string()),
        ("Shuffle", config.feed.shuffle.to_string()),
        ("Ads removed", config.feed.ads_removed.to_string()),
        ("Ad frequency", config.feed.ad_frequency.to_string()),
        ("Stack depth", config.feed.stack_depth.to_string()),
        ("Movie category", config.feed.movie_category.display_name().to_string()),
        ("Show category", config.feed.show_category.display_name().to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    output.println(section_header("Configuration"));
    output.println(table.to_string());

    let mut feeds = Table::new();
    feeds
        .load_preset(presets::UTF8_FULL)
        .set_header(vec!["News source", "Feed URL", "Enabled"]);
    for source in &config.news.sources {
        feeds.add_row(vec![
            source.name.clone(),
            source.feed_url.clone(),
            if source.enabled { "yes".to_string() } else { "no".to_string() },
        ]);
    }
    output.println(feeds.to_string());
    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Config already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn set_api_key(key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => rpassword::prompt_password("TMDB API key: ")
            .map_err(|e| eyre!("Failed to read API key: {}", e))?,
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    let paths = PathManager::default();
    let mut store = CredentialStore::new(paths.credentials_file());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    store.set_tmdb_api_key(key);
    store
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("Saved TMDB API key to {}", paths.credentials_file().display()));
    if std::env::var(TMDB_API_KEY_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the stored key", TMDB_API_KEY_ENV));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("0123456789abcdef"), "01***ef");
    }

    #[test]
    fn test_mask_string_multibyte() {
        assert_eq!(mask_string("aé…"), "***");
        assert_eq!(mask_string("éé1234ü…"), "éé***ü…");
    }
}
