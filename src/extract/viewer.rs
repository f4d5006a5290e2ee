// src/extract/viewer.rs
// =============================================================================
// Rules for libraria.ua issue-viewer pages.
//
// A viewer page renders a filmstrip (<ul class="slidee">) of page thumbnails
// and a table of contents whose entries open articles or pictures through a
// small JSON API. For the archived viewer to work offline the crawler needs:
//
//   1. the full-size scan behind every thumbnail
//   2. the page endpoint for every filmstrip entry
//   3. the article endpoint for every article link
//   4. the picture endpoint for every picture link
//
// The four passes run over the same document and are emitted in that order,
// independent of where the elements sit in the markup. Nothing is
// deduplicated here. A thumbnail without a src fails the page; entries
// without an id are left out.
// =============================================================================

use scraper::{ElementRef, Html};
use tracing::debug;

use super::{required_attr, selector, ExtractError, Extractor};

pub const PAGE_ID_PLACEHOLDER: &str = "{page_id}";
pub const ARTICLE_ID_PLACEHOLDER: &str = "{article_id}";
pub const PICTURE_ID_PLACEHOLDER: &str = "{picture_id}";

/// URL templates for the viewer's API endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerTemplates {
    /// Must contain `{page_id}`
    pub page: String,
    /// Must contain `{article_id}`
    pub article: String,
    /// Must contain `{picture_id}`
    pub picture: String,
}

impl Default for ViewerTemplates {
    fn default() -> Self {
        Self {
            page: "https://libraria.ua/page?get_page={page_id}".to_string(),
            article: "https://libraria.ua/page?get_item=article&id={article_id}".to_string(),
            picture: "https://libraria.ua/page?get_item=picture&id={picture_id}".to_string(),
        }
    }
}

/// Collects every resource an issue-viewer page loads.
#[derive(Debug, Clone)]
pub struct ViewerResources {
    base_url: String,
    templates: ViewerTemplates,
}

impl ViewerResources {
    pub fn new(base_url: impl Into<String>, templates: ViewerTemplates) -> Self {
        Self {
            base_url: base_url.into(),
            templates,
        }
    }

    // Thumbnails live under /small_images/, the scans under /big_images/
    fn images(&self, document: &Html) -> Result<Vec<String>, ExtractError> {
        let images = selector(r#"ul[class="slidee"] img"#)?;
        document
            .select(&images)
            .map(|img| -> Result<String, ExtractError> {
                let src = required_attr(img, "img", "src")?;
                Ok(format!(
                    "{}{}",
                    self.base_url,
                    src.replace("/small_images/", "/big_images/")
                ))
            })
            .collect()
    }

    fn pages(&self, document: &Html) -> Result<Vec<String>, ExtractError> {
        let items = selector(r#"ul[class="slidee"] li"#)?;
        Ok(document
            .select(&items)
            .filter_map(|li| optional_attr(li, "li", "data-page"))
            .map(|page_id| fill(&self.templates.page, PAGE_ID_PLACEHOLDER, page_id))
            .collect())
    }

    fn articles(&self, document: &Html) -> Result<Vec<String>, ExtractError> {
        let links = selector(r#"a[data-type="article"]"#)?;
        Ok(document
            .select(&links)
            .filter_map(|a| optional_attr(a, "a", "data-article-id"))
            .map(|article_id| fill(&self.templates.article, ARTICLE_ID_PLACEHOLDER, article_id))
            .collect())
    }

    fn pictures(&self, document: &Html) -> Result<Vec<String>, ExtractError> {
        let links = selector(r#"a[data-type="picture"]"#)?;
        Ok(document
            .select(&links)
            .filter_map(|a| optional_attr(a, "a", "data-picture-id"))
            .map(|picture_id| fill(&self.templates.picture, PICTURE_ID_PLACEHOLDER, picture_id))
            .collect())
    }
}

impl Extractor for ViewerResources {
    fn name(&self) -> &'static str {
        "viewer-resources"
    }

    fn extract(&self, document: &Html) -> Result<Vec<String>, ExtractError> {
        let mut urls = self.images(document)?;
        urls.extend(self.pages(document)?);
        urls.extend(self.articles(document)?);
        urls.extend(self.pictures(document)?);
        Ok(urls)
    }
}

// Filmstrip spacers and placeholder links carry no id; they are skipped
fn optional_attr<'a>(element: ElementRef<'a>, name: &str, attribute: &str) -> Option<&'a str> {
    let value = element.value().attr(attribute);
    if value.is_none() {
        debug!("skipping <{}> without '{}'", name, attribute);
    }
    value
}

fn fill(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(placeholder, value)
}
