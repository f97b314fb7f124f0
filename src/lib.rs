pub mod config;
pub mod error;
pub mod fetch;
pub mod handler;
pub mod ical;
pub mod model;
pub mod normalize;
pub mod scrape;
pub mod statsapi;
pub mod writer;
