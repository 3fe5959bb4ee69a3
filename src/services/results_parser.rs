use scraper::{ElementRef, Html, Selector};

use crate::domain::search_result::{CardSelectors, ResultEntry, SearchResult};

use super::{parse_selector, ScrapeError};

/// Selectors for one results page, compiled once per scraper.
pub struct PageSelectors {
    search: Selector,
    rso: Selector,
    pub card: CardSelectors,
}

impl PageSelectors {
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(PageSelectors {
            search: parse_selector("div#search")?,
            rso: parse_selector("div#rso")?,
            card: CardSelectors::new()?,
        })
    }
}

/// Finds `#search #rso`, the element whose children are the result cards.
///
/// A page without `#search` is an error. A page with `#search` but no `#rso`
/// yields `Ok(None)`, which [`parse_results`] then rejects.
pub fn get_results_tag<'a>(
    html_document: &'a Html,
    selectors: &PageSelectors,
) -> Result<Option<ElementRef<'a>>, ScrapeError> {
    let search_results = html_document
        .select(&selectors.search)
        .next()
        .ok_or_else(|| ScrapeError::parse("results container not found"))?;

    Ok(search_results.select(&selectors.rso).next())
}

/// Valid result cards in document order, along with the number of element
/// cards that were dropped as invalid.
pub fn parse_results(
    results_tag: Option<ElementRef<'_>>,
    selectors: &PageSelectors,
) -> Result<(Vec<ResultEntry>, usize), ScrapeError> {
    let results_tag = results_tag.ok_or_else(|| ScrapeError::parse("no results"))?;

    let mut results = vec![];
    let mut dropped = 0;

    for card in results_tag.children().filter_map(ElementRef::wrap) {
        if !card.has_children() {
            continue;
        }

        match SearchResult::from_card(card, &selectors.card).into_entry() {
            Some(entry) => results.push(entry),
            None => dropped += 1,
        }
    }

    Ok((results, dropped))
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::{get_results_tag, parse_results, PageSelectors};
    use crate::services::ScrapeError;

    fn card(url: &str, title: &str, description: &str) -> String {
        format!(
            r#"<div><div data-snhf="0"><a href="{url}"><h3>{title}</h3></a></div><div data-sncf="1">{description}</div></div>"#
        )
    }

    #[test]
    fn parses_only_valid_cards_with_content() {
        let rso = format!(
            r#"<html><body><div id="search"><div id="rso">
                loose text
                {}
                <div></div>
                <div><div data-snhf="0"><a href="https://no-description.com"><h3>Lonely</h3></a></div></div>
                <span></span>
                {}
            </div></div></body></html>"#,
            card("https://a.com", "First", "one"),
            card("https://b.com", "Second", "two"),
        );
        let document = Html::parse_document(&rso);
        let selectors = PageSelectors::new().unwrap();

        let tag = get_results_tag(&document, &selectors).unwrap();
        let (results, dropped) = parse_results(tag, &selectors).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(dropped, 1);
        assert_eq!(results[0].title, "First");
        assert_eq!(results[1].url, "https://b.com");
    }

    #[test]
    fn missing_search_container_is_a_parse_error() {
        let document = Html::parse_document("<html><body><div id=\"rso\"></div></body></html>");
        let selectors = PageSelectors::new().unwrap();

        let err = get_results_tag(&document, &selectors).unwrap_err();

        assert!(matches!(err, ScrapeError::Parse(ref m) if m == "results container not found"));
    }

    #[test]
    fn missing_rso_means_no_results() {
        let document = Html::parse_document("<html><body><div id=\"search\"></div></body></html>");
        let selectors = PageSelectors::new().unwrap();

        let tag = get_results_tag(&document, &selectors).unwrap();
        assert!(tag.is_none());

        let err = parse_results(tag, &selectors).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(ref m) if m == "no results"));
    }

    #[test]
    fn empty_rso_yields_empty_list() {
        let document =
            Html::parse_document("<html><body><div id=\"search\"><div id=\"rso\"></div></div></body></html>");
        let selectors = PageSelectors::new().unwrap();

        let tag = get_results_tag(&document, &selectors).unwrap();
        let (results, dropped) = parse_results(tag, &selectors).unwrap();

        assert!(results.is_empty());
        assert_eq!(dropped, 0);
    }
}
