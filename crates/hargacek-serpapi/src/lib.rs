//! Client for the aggregated shopping-search API (`SerpApi`).
//!
//! One call fans a keyword out to many storefronts at once; the response's
//! `shopping_results` array is exposed as [`ShoppingResult`] records.

mod client;
mod error;
mod retry;
mod types;

pub use client::{SerpApiClient, DEFAULT_BASE_URL};
pub use error::SerpApiError;
pub use types::ShoppingResult;
