pub mod calendar;
pub mod menu;
pub mod months;
pub mod parser;
pub mod prompt;
pub mod scraper;
pub mod types;

pub use scraper::PortalClient;

pub(crate) const BASE_URL: &str = "https://nodarbibas.rtu.lv";
