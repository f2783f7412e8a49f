#![forbid(unsafe_code)]

//! Definition and pronunciation extraction from a search results page.
//!
//! The page is parsed into a DOM and only the first `.search_box` element
//! is read. Inside it:
//!
//! - every `.list_search li` contributes its text, with whitespace
//!   collapsed, to the definition;
//! - every `.desc_listen` entry is labelled American (`미국`) or British
//!   (`영국`) and yields the first `[...]` symbol and the first link.
//!
//! Entities are decoded by the HTML parser. Insecure `http://` audio links
//! are rewritten to `https://`.

use regex_lite::Regex;
use scraper::{ElementRef, Html, Selector};
use wordy_runtime::{LookupResponse, Pronunciation, Pronunciations};

use crate::error::ProviderError;

const AMERICAN_LABELS: [&str; 3] = ["미국", "American", "US"];
const BRITISH_LABELS: [&str; 3] = ["영국", "British", "UK"];

/// Compiled selectors and patterns.
#[derive(Debug, Clone)]
pub struct Extractor {
    search_box: Selector,
    item: Selector,
    listen: Selector,
    link: Selector,
    symbol: Regex,
}

impl Extractor {
    pub fn new() -> Result<Self, ProviderError> {
        Ok(Self {
            search_box: selector(".search_box")?,
            item: selector(".list_search li")?,
            listen: selector(".desc_listen")?,
            link: selector("a[href]")?,
            symbol: Regex::new(r"\[[^\]]+\]")?,
        })
    }

    /// Extract a lookup response. A page without results yields an empty
    /// definition.
    #[must_use]
    pub fn extract(&self, html: &str) -> LookupResponse {
        let document = Html::parse_document(html);
        let Some(block) = document.select(&self.search_box).next() else {
            return LookupResponse::empty();
        };
        LookupResponse::new(self.definition(block), self.pronunciations(block))
    }

    fn definition(&self, block: ElementRef<'_>) -> String {
        block
            .select(&self.item)
            .map(text_of)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn pronunciations(&self, block: ElementRef<'_>) -> Pronunciations {
        let mut pronunciations = Pronunciations::default();
        for entry in block.select(&self.listen) {
            let label = text_of(entry);
            let slot = if AMERICAN_LABELS.iter().any(|l| label.contains(l)) {
                &mut pronunciations.american
            } else if BRITISH_LABELS.iter().any(|l| label.contains(l)) {
                &mut pronunciations.british
            } else {
                continue;
            };
            if !slot.is_empty() {
                continue;
            }
            let symbol = self
                .symbol
                .find(&label)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            let href = entry
                .select(&self.link)
                .find_map(|link| link.value().attr("href"))
                .map(secure_link)
                .unwrap_or_default();
            *slot = Pronunciation::new(symbol, href);
        }
        pronunciations
    }
}

fn selector(css: &str) -> Result<Selector, ProviderError> {
    Selector::parse(css).map_err(|err| ProviderError::Selector(format!("{css}: {err:?}")))
}

/// Text content of an element, one space between text nodes and runs of
/// whitespace collapsed.
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rewrite an insecure `http://` link to `https://`.
#[must_use]
pub fn secure_link(href: &str) -> String {
    match href.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => href.to_string(),
    }
}
