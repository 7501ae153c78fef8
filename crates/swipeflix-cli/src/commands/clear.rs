use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs;
use swipeflix_config::PathManager;

use crate::output::Output;

pub async fn run_clear(all: bool, watchlist: bool, credentials: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();

    if all {
        clear_watchlist(&path_manager, output)?;
        clear_credentials(&path_manager, output)?;
        output.success("Watchlist and credentials cleared");
        return Ok(());
    }

    if !watchlist && !credentials {
        output.warn("No clear option specified. Use --watchlist, --credentials, or --all");
        output.println("\nExample: swipeflix clear --watchlist");
        return Ok(());
    }

    if watchlist {
        clear_watchlist(&path_manager, output)?;
    }
    if credentials {
        clear_credentials(&path_manager, output)?;
    }
    Ok(())
}

fn clear_watchlist(path_manager: &PathManager, output: &Output) -> Result<()> {
    let dir = path_manager.watchlist_dir();
    if dir.exists() {
        fs::remove_dir_all(&dir)
            .map_err(|e| eyre!("Failed to remove watchlist at {}: {}", dir.display(), e))?;
        output.success(format!("Cleared watchlist: {}", dir.display()));
    } else {
        output.info("No saved watchlist found to clear");
    }
    Ok(())
}

fn clear_credentials(path_manager: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = path_manager.credentials_file();
    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e)
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }
    Ok(())
}
