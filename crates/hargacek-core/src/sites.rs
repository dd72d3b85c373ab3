//! Marketplace site profiles: where to search and which selectors pull each
//! listing field out of the rendered results page.
//!
//! Profiles come from [`builtin_sites`] unless a `sites.yaml` is configured,
//! in which case [`load_sites`] replaces the built-in list entirely.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Placeholder in [`SiteProfile::search_url`] that receives the
/// percent-encoded keyword.
pub const KEYWORD_PLACEHOLDER: &str = "{keyword}";

/// CSS selectors evaluated relative to one result-item container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelectors {
    pub name: String,
    pub price: String,
    pub seller: String,
    /// Element carrying the listing `href`.
    pub link: String,
    /// Element carrying the image `src` (or lazy-load `data-src`).
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    /// Display name; becomes `Product::source` for every listing of this site.
    pub name: String,
    /// Origin used to resolve site-relative links and images.
    pub base_url: String,
    /// Search URL template containing [`KEYWORD_PLACEHOLDER`].
    pub search_url: String,
    /// Selector for the repeating result-item element.
    pub container: String,
    pub fields: FieldSelectors,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl SiteProfile {
    /// Generate a URL-safe slug from the site name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesFile {
    pub sites: Vec<SiteProfile>,
}

/// Profiles for the marketplaces supported out of the box.
///
/// Selectors match the production markup of each marketplace's search
/// results page; they are volatile and can be overridden with a `sites.yaml`.
#[must_use]
pub fn builtin_sites() -> Vec<SiteProfile> {
    vec![
        SiteProfile {
            name: "Tokopedia".to_string(),
            base_url: "https://www.tokopedia.com".to_string(),
            search_url: "https://www.tokopedia.com/search?st=product&q={keyword}".to_string(),
            container: r#"[data-testid="product-card"]"#.to_string(),
            fields: FieldSelectors {
                name: r#"[data-testid="product-card-name"]"#.to_string(),
                price: r#"[data-testid="product-card-price"]"#.to_string(),
                seller: r#"[data-testid="shop-name"]"#.to_string(),
                link: r#"[data-testid="product-card-url"]"#.to_string(),
                image: "img".to_string(),
            },
            enabled: true,
        },
        SiteProfile {
            name: "Shopee".to_string(),
            base_url: "https://shopee.co.id".to_string(),
            search_url: "https://shopee.co.id/search?keyword={keyword}".to_string(),
            container: ".shopee-search-item-result__item".to_string(),
            fields: FieldSelectors {
                name: r#"[data-sqm="item_name"] > div:nth-of-type(2)"#.to_string(),
                price: ".shopee-price-part".to_string(),
                seller: ".shopee-search-item-result__shop-name-wrapper".to_string(),
                link: "a".to_string(),
                image: "img".to_string(),
            },
            enabled: true,
        },
    ]
}

/// Load and validate site profiles from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sites(path: &Path) -> Result<SitesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SitesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_sites(&content)
}

/// Parse and validate site profiles from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML does not parse or fails validation.
pub fn parse_sites(content: &str) -> Result<SitesFile, ConfigError> {
    let sites_file: SitesFile = serde_yaml::from_str(content)?;
    validate_sites(&sites_file)?;
    Ok(sites_file)
}

fn validate_sites(sites_file: &SitesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for site in &sites_file.sites {
        if site.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site name must be non-empty".to_string(),
            ));
        }

        if !site.search_url.contains(KEYWORD_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "site '{}' search_url must contain the {KEYWORD_PLACEHOLDER} placeholder",
                site.name
            )));
        }

        match url::Url::parse(&site.base_url) {
            Ok(base) if matches!(base.scheme(), "http" | "https") => {}
            Ok(base) => {
                return Err(ConfigError::Validation(format!(
                    "site '{}' base_url has unsupported scheme '{}'",
                    site.name,
                    base.scheme()
                )));
            }
            Err(e) => {
                return Err(ConfigError::Validation(format!(
                    "site '{}' has invalid base_url '{}': {e}",
                    site.name, site.base_url
                )));
            }
        }

        if site.container.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "site '{}' container selector must be non-empty",
                site.name
            )));
        }

        let lower_name = site.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate site name: '{}'",
                site.name
            )));
        }

        let slug = site.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site slug: '{}' (from site '{}')",
                slug, site.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sites_test.rs"]
mod tests;
