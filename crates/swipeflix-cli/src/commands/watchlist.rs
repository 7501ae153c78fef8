use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use swipeflix_models::{ContentId, ContentItem};

use super::context::AppContext;
use super::render::{section_header, titles_table};
use super::ui::Spinner;
use crate::output::Output;
use crate::{KindArg, WatchlistCommands};

pub async fn run_watchlist(cmd: WatchlistCommands, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    match cmd {
        WatchlistCommands::List => list(&ctx, output),
        WatchlistCommands::Add { query, kind } => add(&ctx, &query, kind, output).await,
        WatchlistCommands::Remove { movie, show } => {
            let id = match (movie, show) {
                (Some(id), _) => ContentId::Movie(id),
                (None, Some(id)) => ContentId::Show(id),
                (None, None) => return Err(eyre!("Pass --movie ID or --show ID")),
            };
            remove(&ctx, id, output)
        }
        WatchlistCommands::Clear => {
            let mut store = ctx.watchlist();
            let count = store.len();
            store.clear();
            output.success(format!("Removed {} titles from the watchlist", count));
            Ok(())
        }
    }
}

fn list(ctx: &AppContext, output: &Output) -> Result<()> {
    let store = ctx.watchlist();
    output.data(&json!({
        "movies": store.movies(),
        "shows": store.shows(),
    }));

    if store.is_empty() {
        output.info("Your watchlist is empty. Like a card in 'swipeflix swipe' to save it.");
        return Ok(());
    }

    let items = store.items();
    let (movies, shows): (Vec<ContentItem>, Vec<ContentItem>) =
        items.into_iter().partition(|i| matches!(i, ContentItem::Movie(_)));
    if !movies.is_empty() {
        output.println(section_header("Saved Movies"));
        output.println(titles_table(&movies).to_string());
    }
    if !shows.is_empty() {
        output.println(section_header("Saved TV Shows"));
        output.println(titles_table(&shows).to_string());
    }
    Ok(())
}

async fn add(ctx: &AppContext, query: &str, kind: Option<KindArg>, output: &Output) -> Result<()> {
    let catalog = ctx.catalog()?;
    let spinner = Spinner::start(output, format!("Searching for '{}'...", query.trim()));
    let results = catalog.search(query).await;
    spinner.finish();

    let hit = match kind {
        Some(KindArg::Movie) => results.movies.first(),
        Some(KindArg::Show) => results.shows.first(),
        None => results.movies.first().or_else(|| results.shows.first()),
    }
    .ok_or_else(|| eyre!("No match for '{}'", query.trim()))?;

    let mut store = ctx.watchlist();
    if store.add(hit) {
        output.success(format!("Saved '{}' ({})", hit.title(), hit.id()));
    } else {
        output.info(format!("'{}' is already on your watchlist", hit.title()));
    }
    Ok(())
}

fn remove(ctx: &AppContext, id: ContentId, output: &Output) -> Result<()> {
    let mut store = ctx.watchlist();
    if store.remove_id(&id) {
        output.success(format!("Removed {} from the watchlist", id));
    } else {
        output.warn(format!("{} is not on the watchlist", id));
    }
    Ok(())
}
