use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{presets, Table};
use serde_json::json;

use super::context::AppContext;
use super::render::{news_table, section_header};
use super::ui::Spinner;
use crate::output::Output;
use crate::SourcesCommands;

/// `--source` for this run wins over the saved selection.
fn active_names(flag: &[String], saved: &[String]) -> Vec<String> {
    if flag.is_empty() {
        saved.to_vec()
    } else {
        flag.to_vec()
    }
}

pub async fn run_news(sources: &[String], output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let desk = ctx.news_desk();
    if desk.sources().is_empty() {
        output.warn("No news sources are enabled in the configuration");
        return Ok(());
    }

    let selection = ctx.news_selection();
    let active = active_names(sources, selection.active());
    let selected = desk.select_sources(&active);
    let names: Vec<&str> = selected.iter().map(|s| s.name.as_str()).collect();
    let spinner = Spinner::start(output, format!("Fetching {}...", names.join(", ")));
    let listing = desk.fetch(&active).await;
    spinner.finish();

    if listing.is_total_failure() {
        return Err(eyre!("No feed could be fetched (run with -v for details)"));
    }
    if listing.failed > 0 {
        output.warn(format!("{} of {} feeds failed", listing.failed, listing.requested));
    }

    output.data(&listing);
    if listing.items.is_empty() {
        output.info("No headlines");
        return Ok(());
    }
    output.println(section_header("Latest News"));
    output.println(news_table(&listing.items).to_string());
    output.success(format!("{} headlines", listing.items.len()));
    Ok(())
}

pub fn run_sources(cmd: SourcesCommands, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let known = ctx.config.news.enabled_sources();
    let mut selection = ctx.news_selection();

    match cmd {
        SourcesCommands::List => {}
        SourcesCommands::Set { names } => {
            let unknown = selection.set(&names, &known);
            if !unknown.is_empty() {
                output.warn(format!("Unknown news sources ignored: {}", unknown.join(", ")));
            }
            if unknown.len() == names.len() {
                return Err(eyre!("None of the given names match an enabled feed"));
            }
            output.success(format!("Fetching from {} by default", selection.active().join(", ")));
        }
        SourcesCommands::Reset => {
            selection.reset();
            output.success("Fetching from every enabled feed by default");
        }
    }

    output.data(&json!({
        "sources": known,
        "active": selection.active(),
    }));

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_header(vec!["News source", "Feed URL", "Active"]);
    for source in &known {
        let active = selection.is_all() || selection.active().contains(&source.name);
        table.add_row(vec![
            source.name.clone(),
            source.feed_url.clone(),
            if active { "yes".to_string() } else { "no".to_string() },
        ]);
    }
    output.println(section_header("News Sources"));
    output.println(table.to_string());
    Ok(())
}
