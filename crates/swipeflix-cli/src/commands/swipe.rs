use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use swipeflix_core::{Decision, SwipeDeck};
use swipeflix_models::{MovieCategory, ShowCategory};

use super::browse::report_listing;
use super::context::AppContext;
use super::render::{card_summary, section_header};
use super::ui::{is_interactive, Spinner};
use crate::output::Output;
use crate::SwipeKind;

enum Choice {
    Decide(Decision),
    Quit,
}

fn prompt(card_is_ad: bool) -> Result<Choice> {
    let options: &[&str] = if card_is_ad {
        &["Skip ad", "Quit"]
    } else {
        &["Like (save to watchlist)", "Pass", "Quit"]
    };
    let selection = Select::with_theme(&ColorfulTheme::default())
        .items(options)
        .default(0)
        .interact_opt()
        .map_err(|e| eyre!("Failed to read selection: {}", e))?;

    Ok(match (card_is_ad, selection) {
        (true, Some(0)) => Choice::Decide(Decision::Pass),
        (false, Some(0)) => Choice::Decide(Decision::Like),
        (false, Some(1)) => Choice::Decide(Decision::Pass),
        _ => Choice::Quit,
    })
}

pub async fn run_swipe(kind: SwipeKind, category: Option<String>, output: &Output) -> Result<()> {
    if !output.is_human() || !is_interactive() {
        return Err(eyre!("swipe needs an interactive terminal and --output human"));
    }

    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;
    let options = ctx.options();
    let mut deck = SwipeDeck::new(ctx.watchlist(), options.clone());

    // Ticket must be taken before the fetch starts
    let ticket = deck.begin_load();
    let spinner = Spinner::start(output, "Shuffling the deck...");
    let (title, listing) = match kind {
        SwipeKind::Movies => {
            let category = match category {
                Some(raw) => raw.parse::<MovieCategory>().map_err(|e| eyre!(e))?,
                None => options.movie_category,
            };
            (format!("{} Movies", category.display_name()), catalog.movies(category, &options).await)
        }
        SwipeKind::Shows => {
            let category = match category {
                Some(raw) => raw.parse::<ShowCategory>().map_err(|e| eyre!(e))?,
                None => options.show_category,
            };
            (format!("{} Shows", category.display_name()), catalog.shows(category, &options).await)
        }
    };
    spinner.finish();

    if listing.is_total_failure() || listing.items.is_empty() {
        return report_listing(&title, &listing, output);
    }

    let total = deck
        .load(ticket, listing.items)
        .await
        .ok_or_else(|| eyre!("The card stack was replaced by a newer load"))?;
    output.println(section_header(&title));

    let mut liked = 0;
    let mut seen = 0;
    loop {
        let visible = deck.visible().await;
        let Some(front) = visible.first() else {
            output.info("You've reached the end of the stack");
            break;
        };

        output.println(format!(
            "\n[{}/{}] {}",
            seen + 1,
            total,
            card_summary(front)
        ));
        if !front.synopsis().is_empty() {
            output.println(format!("  {}", front.synopsis()));
        }
        if visible.len() > 1 {
            let next: Vec<&str> = visible[1..].iter().map(|c| c.title()).collect();
            output.println(format!("  up next: {}", next.join(", ")));
        }

        let decision = match prompt(front.is_ad())? {
            Choice::Decide(decision) => decision,
            Choice::Quit => break,
        };
        if let Some(outcome) = deck.swipe(decision).await {
            seen += 1;
            if outcome.saved {
                liked += 1;
                output.success(format!("Saved '{}' to your watchlist", outcome.card.title()));
            } else if decision == Decision::Like && !outcome.card.is_ad() {
                output.info(format!("'{}' is already on your watchlist", outcome.card.title()));
            }
        }
    }

    let watchlist = deck.watchlist();
    output.success(format!(
        "Swiped {} cards, saved {} (watchlist: {} movies, {} shows)",
        seen,
        liked,
        watchlist.movies().len(),
        watchlist.shows().len()
    ));
    Ok(())
}
