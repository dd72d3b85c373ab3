//! Field extraction from rendered search-result HTML.
//!
//! Extraction is a pure function over an HTML snapshot: the session renders,
//! this module reads. Each field is attempted independently and a miss
//! yields `None`, never an error.

use hargacek_core::{FieldSelectors, SiteProfile};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::ScraperError;
use crate::parse::clean_text;
use crate::types::{RawPrice, RawRecord};

/// A site profile's selectors, parsed once when the adapter is built.
#[derive(Debug)]
pub struct CompiledSelectors {
    pub container: Selector,
    pub name: Selector,
    pub price: Selector,
    pub seller: Selector,
    pub link: Selector,
    pub image: Selector,
}

impl CompiledSelectors {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] naming the first selector
    /// that fails to parse.
    pub fn compile(profile: &SiteProfile) -> Result<Self, ScraperError> {
        let FieldSelectors {
            name,
            price,
            seller,
            link,
            image,
        } = &profile.fields;
        let parse = |selector: &str| {
            Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
                site: profile.name.clone(),
                selector: selector.to_owned(),
                reason: e.to_string(),
            })
        };
        Ok(Self {
            container: parse(&profile.container)?,
            name: parse(name)?,
            price: parse(price)?,
            seller: parse(seller)?,
            link: parse(link)?,
            image: parse(image)?,
        })
    }
}

/// Extracts one [`RawRecord`] per container match in `html`.
#[must_use]
pub fn extract_records(html: &str, selectors: &CompiledSelectors, base_url: &Url) -> Vec<RawRecord> {
    let document = Html::parse_document(html);
    document
        .select(&selectors.container)
        .map(|element| extract(element, selectors, base_url))
        .collect()
}

/// Pulls the five listing fields out of one result element.
#[must_use]
pub fn extract(element: ElementRef<'_>, selectors: &CompiledSelectors, base_url: &Url) -> RawRecord {
    let price = first_text(element, &selectors.price).map(RawPrice::Text);
    let url = element
        .select(&selectors.link)
        .find_map(|link| link.value().attr("href"))
        .and_then(|href| resolve_url(base_url, href));
    let image_url = element
        .select(&selectors.image)
        .find_map(image_source)
        .and_then(|src| resolve_url(base_url, src));

    RawRecord {
        name: first_text(element, &selectors.name),
        price,
        seller: first_text(element, &selectors.seller),
        url,
        image_url,
    }
}

fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .and_then(|node| clean_text(&node.text().collect::<String>()))
}

/// Lazy-loaded images keep a `data:` placeholder in `src` and the real
/// location in `data-src`.
fn image_source(img: ElementRef<'_>) -> Option<&str> {
    let value = img.value();
    value
        .attr("src")
        .map(str::trim)
        .filter(|src| !src.is_empty() && !src.starts_with("data:"))
        .or_else(|| value.attr("data-src").map(str::trim))
        .filter(|src| !src.is_empty())
}

/// Resolves `href` against `base_url`, keeping only `http(s)` results.
#[must_use]
pub fn resolve_url(base_url: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href == "#" {
        return None;
    }
    let resolved = base_url.join(href).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}
