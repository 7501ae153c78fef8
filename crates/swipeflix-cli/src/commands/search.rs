use color_eyre::Result;

use super::context::AppContext;
use super::render::{section_header, titles_table};
use super::ui::Spinner;
use crate::output::Output;

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    if query.trim().is_empty() {
        output.warn("Empty search query");
        return Ok(());
    }

    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let spinner = Spinner::start(output, format!("Searching for '{}'...", query.trim()));
    let results = catalog.search(query).await;
    spinner.finish();

    output.data(&results);
    if results.is_empty() {
        output.info(format!("No results for '{}'", query.trim()));
        return Ok(());
    }

    if !results.movies.is_empty() {
        output.println(section_header("Movies"));
        output.println(titles_table(&results.movies).to_string());
    }
    if !results.shows.is_empty() {
        output.println(section_header("TV Shows"));
        output.println(titles_table(&results.shows).to_string());
    }
    output.success(format!("{} results", results.len()));
    Ok(())
}
