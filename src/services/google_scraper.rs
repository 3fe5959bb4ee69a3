use futures::future::try_join_all;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, StatusCode,
};
use scraper::Html;
use serde::Serialize;
use url::Url;

use crate::{
    configuration::ScraperSettings,
    domain::scrape_output::{utc_timestamp, ScrapeMetadata, ScrapeOutput},
};

use super::{get_results_tag, parse_results, PageSelectors, ScrapeError};

/// Google serves ten organic results per page.
pub const RESULTS_PER_PAGE: u64 = 10;

/// Firefox on macOS. Google shapes its markup by these, so the card selectors
/// only hold while this exact profile is sent.
const BROWSER_HEADERS: [(&str, &str); 11] = [
    (
        "user-agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:132.0) Gecko/20100101 Firefox/132.0",
    ),
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("accept-language", "en-US,en;q=0.5"),
    ("connection", "keep-alive"),
    ("upgrade-insecure-requests", "1"),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "cross-site"),
    ("priority", "u=0, i"),
    ("pragma", "no-cache"),
    ("cache-control", "no-cache"),
];

#[derive(Serialize)]
struct GoogleQuery<'a> {
    q: &'a str,
    client: &'a str,
    start: u64,
}

fn browser_headers() -> HeaderMap {
    BROWSER_HEADERS
        .iter()
        .map(|&(name, value)| {
            (
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            )
        })
        .collect()
}

/// Scrapes Google result pages. The HTTP client lives as long as the scraper,
/// so one value covers one run and its connections close when it is dropped.
pub struct GoogleScraper {
    client: Client,
    search_url: Url,
    client_id: String,
    selectors: PageSelectors,
}

impl GoogleScraper {
    pub fn new(settings: &ScraperSettings) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .cookie_store(true)
            .build()?;

        Ok(GoogleScraper {
            client,
            search_url: Url::parse(&settings.base_url)?,
            client_id: settings.client_id.clone(),
            selectors: PageSelectors::new()?,
        })
    }

    /// Fetches one results page. `page` is zero based.
    pub async fn google_request(&self, query: &str, page: u32) -> Result<Html, ScrapeError> {
        let params = GoogleQuery {
            q: query,
            client: &self.client_id,
            start: RESULTS_PER_PAGE * u64::from(page),
        };

        let res = self
            .client
            .get(self.search_url.clone())
            .query(&params)
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            log::error!("Received status code {} for page {} of query: {}", status, page, query);
            return Err(ScrapeError::Request { status });
        }

        let html_content = res.text().await?;
        log::debug!(
            "Fetched page {} with status {} ({} bytes)",
            page,
            status,
            html_content.len()
        );

        Ok(Html::parse_document(&html_content))
    }

    /// Fetches `num_pages` pages at once and merges their cards in page order.
    ///
    /// The first failing page fails the run; pages still in flight are
    /// dropped.
    pub async fn scrape(&self, query: &str, num_pages: u32) -> Result<ScrapeOutput, ScrapeError> {
        log::info!("Scraping {} pages for query: {}", num_pages, query);

        let mut metadata = ScrapeMetadata::new(query);
        let mut results = vec![];

        let pages = try_join_all((0..num_pages).map(|page| self.google_request(query, page))).await?;

        for (page, html_document) in pages.iter().enumerate() {
            let results_tag = get_results_tag(html_document, &self.selectors)?;
            let (page_results, dropped) = parse_results(results_tag, &self.selectors)?;

            log::debug!(
                "Page {} gave {} results, dropped {} cards",
                page,
                page_results.len(),
                dropped
            );

            results.extend(page_results);
            metadata.processed_at = Some(utc_timestamp());
        }

        metadata.num_results = results.len();
        log::info!("Found {} results for query: {}", results.len(), query);

        Ok(ScrapeOutput { metadata, results })
    }
}
