use color_eyre::eyre::eyre;
use color_eyre::Result;
use swipeflix_models::ContentItem;

use super::context::AppContext;
use super::render::section_header;
use super::ui::Spinner;
use crate::output::Output;

const ROW_PREVIEW: usize = 6;

fn preview(items: &[ContentItem]) -> String {
    let mut titles: Vec<&str> = items.iter().take(ROW_PREVIEW).map(|i| i.title()).collect();
    if items.len() > ROW_PREVIEW {
        titles.push("…");
    }
    titles.join(" | ")
}

pub async fn run_explore(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let spinner = Spinner::start(output, "Loading explore rows...");
    let rows = catalog.explore().await;
    spinner.finish();

    let empty = rows.top_rated_movies.is_empty()
        && rows.top_rated_shows.is_empty()
        && rows.movie_genres.is_empty()
        && rows.show_genres.is_empty();
    if empty && rows.failed > 0 {
        return Err(eyre!("Every explore request failed (run with -v for details)"));
    }
    if rows.failed > 0 {
        output.warn(format!("{} rows could not be loaded", rows.failed));
    }

    output.data(&rows);

    output.println(section_header("Movies"));
    output.println(format!("  {:<18} {}", "Top Rated", preview(&rows.top_rated_movies)));
    for (genre, items) in &rows.movie_genres {
        output.println(format!("  {:<18} {}", genre, preview(items)));
    }

    output.println(section_header("TV Shows"));
    output.println(format!("  {:<18} {}", "Top Rated", preview(&rows.top_rated_shows)));
    for (genre, items) in &rows.show_genres {
        output.println(format!("  {:<18} {}", genre, preview(items)));
    }
    Ok(())
}
