pub mod browse;
pub mod clear;
pub mod config;
pub mod context;
pub mod details;
pub mod explore;
pub mod news;
pub mod render;
pub mod search;
pub mod swipe;
pub mod ui;
pub mod watchlist;
