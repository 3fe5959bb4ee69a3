use reqwest::StatusCode;
use scraper::Selector;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("received status code {status} in google call")]
    Request { status: StatusCode },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("request to google failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error("invalid search endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl ScrapeError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

pub fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
