use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;
use swipeflix_models::{ContentItem, SearchHit};

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan)),
        );
    table
}

pub fn kind_label(item: &ContentItem) -> &'static str {
    match item {
        ContentItem::Movie(_) => "movie",
        ContentItem::Show(_) => "show",
        ContentItem::News(_) => "news",
        ContentItem::Search(result) => match result.hit {
            SearchHit::Movie(_) => "movie",
            SearchHit::Show(_) => "show",
        },
        ContentItem::Ad(_) => "ad",
    }
}

/// Numeric id shown to the user, for use with `details` and `watchlist remove`.
fn display_id(item: &ContentItem) -> String {
    match item.id() {
        swipeflix_models::ContentId::Movie(id) | swipeflix_models::ContentId::Show(id) => id.to_string(),
        other => other.to_string(),
    }
}

pub fn rating_label(rating: Option<f64>) -> String {
    rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "-".to_string())
}

/// Movies, shows and search hits.
pub fn titles_table(items: &[ContentItem]) -> Table {
    let mut table = new_table(&["#", "Id", "Kind", "Title", "Year", "Rating", "Genres"]);
    for (index, item) in items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(display_id(item)),
            Cell::new(kind_label(item)),
            Cell::new(item.title()),
            Cell::new(item.release_year().unwrap_or_else(|| "-".to_string())),
            Cell::new(rating_label(item.rating())),
            Cell::new(item.genres().join(", ")),
        ]);
    }
    table
}

pub fn news_table(items: &[ContentItem]) -> Table {
    let mut table = new_table(&["Published", "Source", "Headline"]);
    for item in items {
        if let ContentItem::News(news) = item {
            table.add_row(vec![
                Cell::new(
                    news.published_at
                        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::new(&news.source),
                Cell::new(&news.title),
            ]);
        }
    }
    table
}

pub fn section_header(title: &str) -> String {
    format!("\n{}\n{}", title.bold().bright_cyan(), "─".repeat(title.chars().count()).bright_cyan())
}

/// One line per card for the swipe prompt.
pub fn card_summary(item: &ContentItem) -> String {
    if item.is_ad() {
        return format!("{}", "[ Advertisement ]".dimmed());
    }
    let year = item.release_year().map(|y| format!(" ({})", y)).unwrap_or_default();
    let genres = item.genres();
    let genres = if genres.is_empty() { String::new() } else { format!("  {}", genres.join(" · ").dimmed()) };
    format!(
        "{}{}  ★ {}{}",
        item.title().bold(),
        year,
        rating_label(item.rating()),
        genres
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipeflix_models::{AdSlot, Movie, SearchResult, TvShow};

    fn show() -> TvShow {
        TvShow {
            id: 1399,
            name: "Game of Thrones".to_string(),
            overview: String::new(),
            poster_path: None,
            first_air_date: Some("2011-04-17".to_string()),
            vote_average: Some(8.44),
            genre_ids: vec![10765, 18],
        }
    }

    #[test]
    fn test_kind_labels() {
        let movie = Movie {
            id: 1,
            title: "Heat".to_string(),
            overview: String::new(),
            poster_path: None,
            release_date: None,
            vote_average: None,
            genre_ids: vec![],
        };
        assert_eq!(kind_label(&ContentItem::Search(SearchResult::from(movie))), "movie");
        assert_eq!(kind_label(&ContentItem::Show(show())), "show");
        assert_eq!(kind_label(&ContentItem::Ad(AdSlot { slot: 0 })), "ad");
    }

    #[test]
    fn test_titles_table_rows() {
        let table = titles_table(&[ContentItem::Show(show())]);
        let rendered = table.to_string();
        assert!(rendered.contains("Game of Thrones"));
        assert!(rendered.contains("1399"));
        assert!(rendered.contains("8.4"));
        assert!(rendered.contains("Drama"));
    }

    #[test]
    fn test_rating_label() {
        assert_eq!(rating_label(None), "-");
        assert_eq!(rating_label(Some(7.26)), "7.3");
    }
}
