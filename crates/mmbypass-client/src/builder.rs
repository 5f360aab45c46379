use std::sync::Arc;

use mmbypass_core::{AuthBlock, SearchRequest};

use crate::payload::{
    Address, FilterBound, SelectedFilter, UpstreamPayload, PAGE_SIZE,
    TEXT_SEARCH_REQUEST_VERSION,
};

/// Turns validated [`SearchRequest`]s into catalog payloads.
///
/// Holds the auth block for the lifetime of the process; every payload it
/// builds shares the same `Arc`.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    auth: Arc<AuthBlock>,
}

impl QueryBuilder {
    #[must_use]
    pub fn new(auth: AuthBlock) -> Self {
        Self {
            auth: Arc::new(auth),
        }
    }

    #[must_use]
    pub fn auth(&self) -> &AuthBlock {
        &self.auth
    }

    /// Builds the free-text search payload for `request`.
    ///
    /// `SearchRequest` guarantees a non-blank query and `page >= 1`, so this
    /// cannot fail.
    #[must_use]
    pub fn build(&self, request: &SearchRequest) -> UpstreamPayload {
        let offset = u64::from(request.page() - 1) * u64::from(PAGE_SIZE);

        let selected_filters = request
            .price_filter()
            .map(|range| {
                vec![
                    SelectedFilter::price(FilterBound::Lower, range.low()),
                    SelectedFilter::price(FilterBound::Upper, range.high()),
                ]
            })
            .unwrap_or_default();

        UpstreamPayload {
            request_version: TEXT_SEARCH_REQUEST_VERSION,
            merchant: serde_json::Map::new(),
            limit: PAGE_SIZE,
            offset,
            is_multi_category_search: false,
            search_by_original_query: false,
            selected_suggest_params: Vec::new(),
            expanded_filters_ids: Vec::new(),
            sorting: request.sort().code(),
            age_more18: None,
            show_not_available: request.include_unavailable(),
            selected_filters,
            address: Address::SearchText(request.text().to_string()),
            auth: Arc::clone(&self.auth),
        }
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(AuthBlock::web())
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
