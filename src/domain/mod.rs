pub mod scrape_output;
pub mod search_result;
