use thiserror::Error;

/// Errors returned by the shopping-search API client.
#[derive(Debug, Error)]
pub enum SerpApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a top-level `"error"` message.
    #[error("shopping API error: {0}")]
    Upstream(String),

    /// Non-2xx status without an `"error"` body.
    #[error("unexpected HTTP status {status} from shopping API")]
    UnexpectedStatus { status: u16 },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
