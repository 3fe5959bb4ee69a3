use chrono::Utc;
use serde::Serialize;

use super::search_result::ResultEntry;

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S%.6f";

/// Current UTC time as `DD/MM/YYYY, HH:MM:SS.micros`.
pub fn utc_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeMetadata {
    pub query: String,
    pub requested_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<String>,
    pub num_results: usize,
}

impl ScrapeMetadata {
    pub fn new(query: &str) -> Self {
        ScrapeMetadata {
            query: query.to_string(),
            requested_at: utc_timestamp(),
            processed_at: None,
            num_results: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeOutput {
    pub metadata: ScrapeMetadata,
    pub results: Vec<ResultEntry>,
}
