pub mod client;
pub mod parser;

pub use client::RssClient;
pub use parser::{parse_feed, strip_html};
