pub mod api;
pub mod client;

pub use api::select_trailer;
pub use client::TmdbClient;
