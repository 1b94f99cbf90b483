use log::{debug, info};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::error::{BrDomainError, Result, SourceErrorKind};
use crate::types::SuffixRecord;

use super::SuffixSource;

/// registro.br page listing every `.br` category
pub const DEFAULT_CATEGORIES_URL: &str = "https://registro.br/dominio/categorias/";

static SECTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.categories section")
        .expect("SECTION_SELECTOR: hardcoded selector is invalid")
});

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2").expect("TITLE_SELECTOR: hardcoded selector is invalid"));

static ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("ul > li").expect("ITEM_SELECTOR: hardcoded selector is invalid"));

/// Live suffix source scraping the registro.br categories page
#[derive(Debug, Clone)]
pub struct RegistroSource {
    url: String,
}

impl RegistroSource {
    pub fn new() -> Self {
        Self {
            url: DEFAULT_CATEGORIES_URL.to_string(),
        }
    }

    /// Set a custom categories page URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the categories page
    pub fn fetch_page(&self) -> Result<String> {
        if self.url.trim().is_empty() {
            return Err(BrDomainError::source_error(
                SourceErrorKind::NotConfigured,
                "categories page URL is empty",
            ));
        }
        info!("Fetching suffix categories from {}", self.url);

        let mut response = ureq::get(self.url.as_str()).call().map_err(|e| {
            BrDomainError::source_error(
                SourceErrorKind::FetchFailed,
                format!("Download of {} failed: {}", self.url, e),
            )
        })?;

        response.body_mut().read_to_string().map_err(|e| {
            BrDomainError::source_error(
                SourceErrorKind::FetchFailed,
                format!("Reading {} failed: {}", self.url, e),
            )
        })
    }
}

impl Default for RegistroSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixSource for RegistroSource {
    fn load_records(&self) -> Result<Vec<SuffixRecord>> {
        let html = self.fetch_page()?;
        parse_categories(&html)
    }
}

/// Parse the categories page.
///
/// Each `section` inside `div.categories` is one category group: its first
/// `h2` is the title and its first direct `p` child, if any, the target
/// audience. Every `li` with a `strong` suffix and a `p` description is one
/// record. An `li` with only a `strong` is a restriction heading that applies
/// to the items after it in the same section.
pub fn parse_categories(html: &str) -> Result<Vec<SuffixRecord>> {
    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for section in document.select(&SECTION_SELECTOR) {
        let title = section.select(&TITLE_SELECTOR).next().and_then(first_text);
        let target = child_elements(section, "p").next().and_then(first_text);
        let mut restriction = None;

        for item in section.select(&ITEM_SELECTOR) {
            let Some(tld) = child_elements(item, "strong").next().and_then(first_text) else {
                continue;
            };
            let Some(description) = child_elements(item, "p").next().and_then(first_text) else {
                restriction = Some(tld);
                continue;
            };

            records.push(SuffixRecord {
                tld,
                title: title.clone(),
                description: Some(description),
                target: target.clone(),
                restriction: restriction.clone(),
            });
        }
    }

    if records.is_empty() {
        return Err(BrDomainError::source_error(
            SourceErrorKind::InvalidData,
            "no suffix categories found in page",
        ));
    }

    debug!("Parsed {} suffix categories", records.len());
    Ok(records)
}

fn child_elements<'a>(
    element: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == name)
}

fn first_text(element: ElementRef<'_>) -> Option<String> {
    element
        .text()
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(String::from)
}
