// src/extract/pdf.rs
// =============================================================================
// Rules for DSpace archive record pages (elar.uspu.ru).
//
// A record page links its bitstreams with site-relative hrefs such as
// "/bitstream/123/4/report.pdf". We keep every anchor whose href mentions
// ".pdf" and glue the archive's base URL in front of it.
//
// The same file is often linked twice on one page (thumbnail + "View/Open"),
// so results collapse to unique URLs. The first occurrence wins, which keeps
// the output stable from run to run.
// =============================================================================

use std::collections::HashSet;

use scraper::Html;

use super::{selector, ExtractError, Extractor};

/// Collects unique PDF links from archive record pages.
#[derive(Debug, Clone)]
pub struct PdfLinks {
    base_url: String,
}

impl PdfLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Extractor for PdfLinks {
    fn name(&self) -> &'static str {
        "pdf-links"
    }

    fn extract(&self, document: &Html) -> Result<Vec<String>, ExtractError> {
        let anchors = selector(r#"a[href*=".pdf"]"#)?;

        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for anchor in document.select(&anchors) {
            // The selector already guarantees an href
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };

            // Plain concatenation: hrefs on these pages are site-relative
            let url = format!("{}{}", self.base_url, href);
            if seen.insert(url.clone()) {
                urls.push(url);
            }
        }

        Ok(urls)
    }
}
