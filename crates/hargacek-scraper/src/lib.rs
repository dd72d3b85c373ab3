pub mod adapters;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod orchestrator;
pub mod parse;
pub mod session;
pub mod types;

pub use adapters::{
    build_adapters, configured_sites, MarketplaceAdapter, ShoppingApiAdapter, SiteAdapter,
};
pub use error::ScraperError;
pub use normalize::normalize;
pub use orchestrator::{Orchestrator, SearchOutcome, SourceReport};
pub use session::{ChromiumOpener, PageRenderer, ScrapeSession, SessionOpener};
pub use types::{RawPrice, RawRecord, SourceBatch};
