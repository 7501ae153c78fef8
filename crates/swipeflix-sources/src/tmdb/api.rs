use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use swipeflix_models::{CastMember, Details, Logo, Movie, TvShow, Video};
use tracing::{debug, trace};

use crate::error::SourceError;

#[derive(Debug, Deserialize)]
pub(crate) struct PagedResponse<T> {
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    revenue: Option<u64>,
    budget: Option<u64>,
    credits: Option<Credits>,
}

#[derive(Debug, Deserialize)]
struct Credits {
    #[serde(default)]
    cast: Vec<CastMember>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    logos: Vec<Logo>,
}

/// Connection parameters shared by every call.
pub(crate) struct ApiContext<'a> {
    pub client: &'a Client,
    pub base_url: &'a str,
    pub api_key: &'a str,
    pub language: &'a str,
}

/// GET `{base}{path}` with the API key plus `query`, decoding JSON into `T`.
async fn get_json<T>(ctx: &ApiContext<'_>, path: &str, query: &[(&str, String)]) -> Result<T, SourceError>
where
    T: DeserializeOwned,
{
    let url = format!("{}{}", ctx.base_url.trim_end_matches('/'), path);
    trace!("GET {} {:?}", url, query);

    let response = ctx
        .client
        .get(&url)
        .header("Accept", "application/json")
        .query(&[("api_key", ctx.api_key)])
        .query(query)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            status: status.as_u16(),
            body,
        });
    }

    // Read the body first so a schema mismatch surfaces as Decode, not Transport
    let bytes = response.bytes().await?;
    let decoded = serde_json::from_slice::<T>(&bytes)?;
    debug!("GET {} ok ({} bytes)", path, bytes.len());
    Ok(decoded)
}

pub(crate) async fn get_movie_page(
    ctx: &ApiContext<'_>,
    path: &str,
    page: u32,
    genre_id: Option<u32>,
) -> Result<Vec<Movie>, SourceError> {
    let response: PagedResponse<Movie> = get_json(ctx, path, &list_query(ctx, page, genre_id)).await?;
    Ok(response.results)
}

pub(crate) async fn get_show_page(
    ctx: &ApiContext<'_>,
    path: &str,
    page: u32,
    genre_id: Option<u32>,
) -> Result<Vec<TvShow>, SourceError> {
    let response: PagedResponse<TvShow> = get_json(ctx, path, &list_query(ctx, page, genre_id)).await?;
    Ok(response.results)
}

fn list_query(ctx: &ApiContext<'_>, page: u32, genre_id: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("language", ctx.language.to_string()),
        ("page", page.to_string()),
    ];
    if let Some(genre_id) = genre_id {
        query.push(("with_genres", genre_id.to_string()));
    }
    query
}

pub(crate) async fn search_movies(ctx: &ApiContext<'_>, query: &str) -> Result<Vec<Movie>, SourceError> {
    let response: PagedResponse<Movie> = get_json(
        ctx,
        "/search/movie",
        &[("query", query.to_string()), ("language", ctx.language.to_string())],
    )
    .await?;
    Ok(response.results)
}

pub(crate) async fn search_shows(ctx: &ApiContext<'_>, query: &str) -> Result<Vec<TvShow>, SourceError> {
    let response: PagedResponse<TvShow> = get_json(
        ctx,
        "/search/tv",
        &[("query", query.to_string()), ("language", ctx.language.to_string())],
    )
    .await?;
    Ok(response.results)
}

/// `segment` is `movie` or `tv`.
pub(crate) async fn get_details(ctx: &ApiContext<'_>, segment: &str, id: u64) -> Result<Details, SourceError> {
    let response: DetailsResponse = get_json(
        ctx,
        &format!("/{}/{}", segment, id),
        &[("append_to_response", "credits".to_string())],
    )
    .await?;

    Ok(Details {
        revenue: response.revenue,
        budget: response.budget,
        cast: response.credits.map(|c| c.cast).unwrap_or_default(),
    })
}

pub(crate) async fn get_videos(ctx: &ApiContext<'_>, segment: &str, id: u64) -> Result<Vec<Video>, SourceError> {
    let response: PagedResponse<Video> = get_json(
        ctx,
        &format!("/{}/{}/videos", segment, id),
        &[("language", ctx.language.to_string())],
    )
    .await?;
    Ok(response.results)
}

pub(crate) async fn get_logos(ctx: &ApiContext<'_>, segment: &str, id: u64) -> Result<Vec<Logo>, SourceError> {
    let response: ImagesResponse = get_json(
        ctx,
        &format!("/{}/{}/images", segment, id),
        &[("include_image_language", "en,null".to_string())],
    )
    .await?;
    Ok(response.logos)
}

/// First YouTube trailer in the list.
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    videos.iter().find(|v| v.is_youtube_trailer())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(site: &str, video_type: &str, key: &str) -> Video {
        Video {
            id: key.to_string(),
            key: key.to_string(),
            name: format!("{} {}", site, video_type),
            site: site.to_string(),
            video_type: video_type.to_string(),
        }
    }

    #[test]
    fn test_select_trailer_skips_other_sites_and_types() {
        let videos = vec![
            video("Vimeo", "Trailer", "vimeo1"),
            video("YouTube", "Teaser", "teaser1"),
            video("YouTube", "TRAILER", "yt1"),
            video("YouTube", "Trailer", "yt2"),
        ];
        assert_eq!(select_trailer(&videos).map(|v| v.key.as_str()), Some("yt1"));
    }

    #[test]
    fn test_select_trailer_site_is_case_sensitive() {
        let videos = vec![video("youtube", "Trailer", "lower")];
        assert!(select_trailer(&videos).is_none());
    }

    #[test]
    fn test_details_response_without_credits() {
        let json = r#"{"revenue": 100, "budget": null}"#;
        let response: DetailsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.revenue, Some(100));
        assert!(response.credits.is_none());
    }
}
