use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeQuery {
    q: Option<String>,
}

/// `GET /scrape?q=<keyword>`: merged listings from every configured source,
/// cheapest first.
pub(super) async fn scrape(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ScrapeQuery>,
) -> Response {
    let Some(keyword) = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    else {
        return ApiError::bad_request("Missing search query.").into_response();
    };

    match state.orchestrator.run(keyword).await {
        Ok(products) => {
            tracing::info!(
                request_id = %req_id.0,
                keyword,
                products = products.len(),
                "scrape served"
            );
            Json(products).into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %req_id.0,
                keyword,
                error = %e,
                "scrape failed"
            );
            ApiError::internal().into_response()
        }
    }
}
