use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};
use serde::Serialize;

use crate::services::{parse_selector, ScrapeError};

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(" +").unwrap());

/// Collapses runs of spaces into one and drops line breaks.
///
/// A newline is treated as a word break, so `"a\nb"` becomes `"a b"` and the
/// output never contains two spaces in a row. Tabs, case and punctuation are
/// left alone.
pub fn normalize_text(text: &str) -> String {
    let joined = text.replace("\r\n", " ").replace('\n', " ");
    SPACE_RUNS.replace_all(&joined, " ").into_owned()
}

/// Marker attributes Google puts on the two halves of an organic result card.
pub struct CardSelectors {
    title: Selector,
    description: Selector,
    anchor: Selector,
    heading: Selector,
}

impl CardSelectors {
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(CardSelectors {
            title: parse_selector("div[data-snhf]")?,
            description: parse_selector("div[data-sncf]")?,
            anchor: parse_selector("a")?,
            heading: parse_selector("h3")?,
        })
    }
}

/// One scraped result card. Fields stay `None` when the card isn't an
/// organic result.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// The serialized form of a valid [`SearchResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    pub url: String,
    pub title: String,
    pub description: String,
}

impl SearchResult {
    pub fn from_card(card: ElementRef<'_>, selectors: &CardSelectors) -> Self {
        let title_link = card.select(&selectors.title).next();
        let description = card.select(&selectors.description).next();

        match (title_link, description) {
            (Some(title_link), Some(description)) => {
                Self::organic_card(title_link, description, selectors)
            }
            _ => SearchResult::default(),
        }
    }

    fn organic_card(
        title_link: ElementRef<'_>,
        description: ElementRef<'_>,
        selectors: &CardSelectors,
    ) -> Self {
        let url = title_link
            .select(&selectors.anchor)
            .next()
            .map(|a_tag| a_tag.value().attr("href").unwrap_or_default().to_string());

        let title = title_link
            .select(&selectors.heading)
            .next()
            .map(|h3_tag| normalize_text(h3_tag.text().collect::<String>().trim()));

        let description = normalize_text(&description.text().collect::<String>());

        SearchResult {
            url,
            title,
            description: Some(description),
        }
    }

    pub fn is_valid(&self) -> bool {
        [&self.url, &self.title, &self.description]
            .iter()
            .all(|field| field.as_deref().is_some_and(|value| !value.is_empty()))
    }

    /// `None` for invalid cards.
    pub fn into_entry(self) -> Option<ResultEntry> {
        if !self.is_valid() {
            return None;
        }

        match (self.url, self.title, self.description) {
            (Some(url), Some(title), Some(description)) => Some(ResultEntry {
                url,
                title,
                description,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, \n{}",
            self.title.as_deref().unwrap_or_default(),
            self.url.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default()
        )
    }
}
