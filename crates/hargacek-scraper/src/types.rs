//! Pre-normalization shapes produced by site adapters.

/// Price as captured from a source: display text from a page, or a number
/// from an API.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPrice {
    Text(String),
    Number(f64),
}

/// One listing exactly as a site adapter saw it. Every field is optional;
/// sentinels are filled in later by [`crate::normalize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub name: Option<String>,
    pub price: Option<RawPrice>,
    pub seller: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
}

/// Records gathered by one adapter during one run, tagged with the adapter name.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceBatch {
    pub source: String,
    pub records: Vec<RawRecord>,
}

impl SourceBatch {
    #[must_use]
    pub fn new(source: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Self {
            source: source.into(),
            records,
        }
    }
}
