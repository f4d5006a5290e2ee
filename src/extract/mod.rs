// src/extract/mod.rs
// =============================================================================
// This module turns a fetched page into the list of URLs we want the crawler
// to visit.
//
// Submodules:
// - pdf: archive pages whose PDF download links we collect
// - viewer: issue-viewer pages whose images, pages and item APIs we collect
//
// Every platform implements the Extractor trait, so the fetch pipeline does
// not need to know which site it is scraping.
//
// We use the `scraper` crate which:
// - Parses HTML with html5ever, the same tolerant parser browsers use
// - Never fails on broken markup (unclosed tags, stray attributes, etc.)
// - Supports CSS selectors for finding elements
// =============================================================================

mod pdf;
mod viewer;

pub use pdf::PdfLinks;
pub use viewer::{ViewerResources, ViewerTemplates};
pub use viewer::{ARTICLE_ID_PLACEHOLDER, PAGE_ID_PLACEHOLDER, PICTURE_ID_PLACEHOLDER};

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Reasons a parsed page cannot be turned into derived URLs.
///
/// Any error fails the whole page; each rule set decides which gaps are fatal.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid CSS selector '{0}'")]
    Selector(String),

    #[error("<{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
}

/// A platform-specific set of rules for pulling URLs out of a page.
pub trait Extractor: Send + Sync {
    /// Short label used in log lines
    fn name(&self) -> &'static str;

    /// Derives URLs from an already parsed document
    fn extract(&self, document: &Html) -> Result<Vec<String>, ExtractError>;
}

// Parses the HTML and runs the extractor over it
//
// Parsing and extraction are synchronous: the parsed document never lives
// across an await point.
pub fn extract_urls(extractor: &dyn Extractor, html: &str) -> Result<Vec<String>, ExtractError> {
    let document = Html::parse_document(html);
    extractor.extract(&document)
}

// Compiles a CSS selector, reporting the offending text instead of panicking
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::Selector(css.to_string()))
}

// Reads an attribute the rule set cannot do without
pub(crate) fn required_attr<'a>(
    element: ElementRef<'a>,
    name: &'static str,
    attribute: &'static str,
) -> Result<&'a str, ExtractError> {
    element
        .value()
        .attr(attribute)
        .ok_or(ExtractError::MissingAttribute {
            element: name,
            attribute,
        })
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a trait instead of an enum?
//    - The dispatcher only needs "give me URLs for this page"
//    - New platforms are a new struct plus an impl, nothing else changes
//    - &dyn Extractor lets one pipeline run any rule set
//
// 2. Why CSS selectors and not XPath?
//    - scraper speaks CSS; every rule we need has a direct CSS form
//    - contains(@href, '.pdf')   -> a[href*=".pdf"]
//    - //ul[@class='slidee']//img -> ul[class="slidee"] img
//    - [class="..."] compares the whole attribute, like the XPath @class test
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct Titles;

    impl Extractor for Titles {
        fn name(&self) -> &'static str {
            "titles"
        }

        fn extract(&self, document: &Html) -> Result<Vec<String>, ExtractError> {
            let sel = selector("title")?;
            Ok(document
                .select(&sel)
                .map(|t| t.text().collect::<String>())
                .collect())
        }
    }

    #[test]
    fn test_malformed_markup_still_parses() {
        let html = "<html><head><title>Issue 7</title><body><div><p>unclosed <b>tags";
        let urls = extract_urls(&Titles, html).unwrap();
        assert_eq!(urls, vec!["Issue 7"]);
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        assert!(matches!(selector("!!!"), Err(ExtractError::Selector(_))));
    }

    #[test]
    fn test_missing_attribute_is_reported() {
        let document = Html::parse_fragment("<img alt='no source'>");
        let sel = selector("img").unwrap();
        let img = document.select(&sel).next().unwrap();
        let err = required_attr(img, "img", "src").unwrap_err();
        assert_eq!(err.to_string(), "<img> is missing the 'src' attribute");
    }
}
