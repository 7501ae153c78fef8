pub mod error;
pub mod http;
pub mod rss;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use http::create_http_client;
pub use rss::RssClient;
pub use tmdb::TmdbClient;
pub use traits::{CatalogSource, FeedSource, ListEndpoint};
