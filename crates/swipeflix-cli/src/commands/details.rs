use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use comfy_table::{presets, Cell, Table};
use serde_json::json;
use swipeflix_models::MediaKind;

use super::context::AppContext;
use super::render::section_header;
use super::ui::Spinner;
use crate::output::Output;

const CAST_LIMIT: usize = 10;

fn money(value: Option<u64>) -> String {
    match value {
        Some(v) if v > 0 => {
            let digits = v.to_string();
            let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
            for (i, c) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    out.push(',');
                }
                out.push(c);
            }
            format!("${}", out)
        }
        _ => "-".to_string(),
    }
}

pub async fn run_details(movie: Option<u64>, show: Option<u64>, output: &Output) -> Result<()> {
    let (kind, id) = match (movie, show) {
        (Some(id), _) => (MediaKind::Movie, id),
        (None, Some(id)) => (MediaKind::Show, id),
        (None, None) => return Err(eyre!("Pass --movie ID or --show ID")),
    };

    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let spinner = Spinner::start(output, format!("Loading {} {}...", kind, id));
    let (details, trailer, logo) = tokio::join!(
        catalog.details(kind, id),
        catalog.trailer(kind, id),
        catalog.logo(kind, id)
    );
    spinner.finish();

    let details = details.wrap_err_with(|| format!("Failed to load {} {}", kind, id))?;
    // Trailer and logo are optional extras
    let trailer = trailer.unwrap_or_else(|e| {
        tracing::warn!("Trailer lookup failed: {}", e);
        None
    });
    let logo = logo.unwrap_or_else(|e| {
        tracing::warn!("Logo lookup failed: {}", e);
        None
    });

    output.data(&json!({
        "kind": kind,
        "id": id,
        "details": details,
        "trailer": trailer.as_ref().map(|v| v.youtube_url()),
        "logo": logo.as_ref().map(|l| l.url()),
    }));

    output.println(section_header(&format!("{} {}", kind, id)));
    let mut summary = Table::new();
    summary.load_preset(presets::UTF8_FULL);
    summary.add_row(vec![Cell::new("Budget"), Cell::new(money(details.budget))]);
    summary.add_row(vec![Cell::new("Revenue"), Cell::new(money(details.revenue))]);
    summary.add_row(vec![
        Cell::new("Trailer"),
        Cell::new(trailer.map(|v| v.youtube_url()).unwrap_or_else(|| "-".to_string())),
    ]);
    summary.add_row(vec![
        Cell::new("Logo"),
        Cell::new(logo.map(|l| l.url()).unwrap_or_else(|| "-".to_string())),
    ]);
    output.println(summary.to_string());

    if !details.cast.is_empty() {
        let mut cast = Table::new();
        cast.load_preset(presets::UTF8_FULL)
            .set_header(vec!["Actor", "Character"]);
        for member in details.cast.iter().take(CAST_LIMIT) {
            cast.add_row(vec![member.name.as_str(), member.character.as_str()]);
        }
        output.println(section_header("Cast"));
        output.println(cast.to_string());
    }
    Ok(())
}
