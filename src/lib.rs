// Library interface for komik-scraper
// Allows tests and external crates to drive the extraction pipeline

pub mod blacklist;
pub mod config;
pub mod detail;
pub mod document;
pub mod error;
pub mod extractors;
pub mod http_client;
pub mod list;
pub mod models;
pub mod pages;
pub mod registry;
pub mod scraper;
