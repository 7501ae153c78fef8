use color_eyre::eyre::eyre;
use color_eyre::Result;
use swipeflix_core::{FetchOptions, Listing};
use swipeflix_models::{MovieCategory, ShowCategory};

use super::context::AppContext;
use super::render::{section_header, titles_table};
use super::ui::Spinner;
use crate::output::Output;
use crate::ListArgs;

fn apply_list_args(mut options: FetchOptions, args: ListArgs) -> FetchOptions {
    if let Some(pages) = args.pages {
        options = options.with_pages(pages);
    }
    if args.no_shuffle {
        options = options.with_shuffle(false);
    }
    options
}

pub async fn run_movies(category: Option<MovieCategory>, args: ListArgs, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;
    let options = apply_list_args(ctx.options(), args);
    let category = category.unwrap_or(options.movie_category);

    let spinner = Spinner::start(output, format!("Fetching {} movies...", category.display_name()));
    let listing = catalog.movies(category, &options).await;
    spinner.finish();

    report_listing(&format!("{} Movies", category.display_name()), &listing, output)
}

pub async fn run_shows(category: Option<ShowCategory>, args: ListArgs, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;
    let options = apply_list_args(ctx.options(), args);
    let category = category.unwrap_or(options.show_category);

    let spinner = Spinner::start(output, format!("Fetching {} shows...", category.display_name()));
    let listing = catalog.shows(category, &options).await;
    spinner.finish();

    report_listing(&format!("{} Shows", category.display_name()), &listing, output)
}

/// Print a listing; an all-failed fan-out is an error, a partial one a warning.
pub fn report_listing(title: &str, listing: &Listing, output: &Output) -> Result<()> {
    if listing.is_total_failure() {
        return Err(eyre!(
            "All {} requests for {} failed (run with -v for details)",
            listing.requested,
            title
        ));
    }
    if listing.failed > 0 {
        output.warn(format!(
            "{} of {} requests failed, showing partial results",
            listing.failed, listing.requested
        ));
    }

    output.data(listing);
    if listing.items.is_empty() {
        output.info("Nothing found");
        return Ok(());
    }
    output.println(section_header(title));
    output.println(titles_table(&listing.items).to_string());
    output.success(format!("{} titles", listing.items.len()));
    Ok(())
}
