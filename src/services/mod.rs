pub mod google_scraper;
pub mod results_parser;
pub mod scrape_error;

pub use google_scraper::*;
pub use results_parser::*;
pub use scrape_error::*;
