use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Extension,
};
use mmbypass_core::{PriceRange, RequestError, SearchRequest, SortOrder};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

/// A number the caller may send either as JSON integer or as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum LooseInt {
    Int(i64),
    Text(String),
}

impl LooseInt {
    fn to_i64(&self, field: &'static str) -> Result<i64, RequestError> {
        match self {
            LooseInt::Int(n) => Ok(*n),
            LooseInt::Text(s) => s.trim().parse().map_err(|_| RequestError::InvalidNumber {
                field,
                value: s.clone(),
            }),
        }
    }

    fn to_u64(&self, field: &'static str) -> Result<u64, RequestError> {
        let invalid = || RequestError::InvalidNumber {
            field,
            value: match self {
                LooseInt::Int(n) => n.to_string(),
                LooseInt::Text(s) => s.clone(),
            },
        };
        match self {
            LooseInt::Int(n) => u64::try_from(*n).map_err(|_| invalid()),
            LooseInt::Text(s) => s.trim().parse().map_err(|_| invalid()),
        }
    }

    fn to_sort_order(&self) -> Result<SortOrder, RequestError> {
        match self {
            LooseInt::Int(n) => i32::try_from(*n)
                .map(SortOrder::from_code)
                .map_err(|_| RequestError::InvalidSortOrder(n.to_string())),
            LooseInt::Text(s) => s.parse(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PriceFilterParams {
    price_down: LooseInt,
    price_up: LooseInt,
}

/// Inbound body of `POST /mmarket`.
#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    query: String,
    sample: LooseInt,
    sort: LooseInt,
    #[serde(default)]
    show_not_available: bool,
    #[serde(default)]
    is_price_filter_set: bool,
    #[serde(default)]
    price_filter: Option<PriceFilterParams>,
}

impl SearchParams {
    /// Validates the inbound fields into a [`SearchRequest`].
    ///
    /// `price_filter` is only read when `is_price_filter_set` is true.
    pub(super) fn into_request(self) -> Result<SearchRequest, RequestError> {
        let page = self.sample.to_i64("sample")?;
        let sort = self.sort.to_sort_order()?;

        let price_filter = if self.is_price_filter_set {
            let filter = self
                .price_filter
                .as_ref()
                .ok_or(RequestError::MissingPriceFilter)?;
            Some(PriceRange::new(
                filter.price_down.to_u64("price_filter.price_down")?,
                filter.price_up.to_u64("price_filter.price_up")?,
            )?)
        } else {
            None
        };

        SearchRequest::new(
            self.query,
            page,
            sort,
            self.show_not_available,
            price_filter,
        )
    }
}

/// `POST /mmarket`: runs one catalog search and relays the upstream body.
pub(super) async fn search_catalog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let params: SearchParams = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(request_id = %req_id.0, error = %e, "malformed search body");
        ApiError::bad_request(format!("error of the request's structure: {e}"))
    })?;

    let request = params.into_request().map_err(|e| {
        tracing::debug!(request_id = %req_id.0, error = %e, "invalid search request");
        ApiError::from(e)
    })?;

    tracing::debug!(
        request_id = %req_id.0,
        query = request.text(),
        page = request.page(),
        "catalog search"
    );

    let payload = state.builder.build(&request);
    let upstream_body = state.catalog.fetch(&payload).await.map_err(|e| {
        tracing::warn!(request_id = %req_id.0, error = %e, "catalog fetch failed");
        ApiError::from(e)
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], upstream_body).into_response())
}
