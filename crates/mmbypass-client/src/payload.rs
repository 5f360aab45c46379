//! Wire format of a catalog search request.

use std::sync::Arc;

use mmbypass_core::AuthBlock;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Fixed page size of the catalog search endpoint.
pub const PAGE_SIZE: u32 = 44;

/// Identifier of the catalog's price facet. Both bounds of a price filter use it.
pub const PRICE_FILTER_ID: &str = "88C83F68482F447C9F4E401955196697";

/// `requestVersion` sent with a free-text search.
pub const TEXT_SEARCH_REQUEST_VERSION: u32 = 12;

/// `requestVersion` sent with a collection re-query.
pub const COLLECTION_REQUEST_VERSION: u32 = 10;

/// How the payload addresses the catalog.
///
/// The upstream accepts exactly one of these per request. A collection is
/// sent as both `collectionId` and `selectedAssumedCollectionId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    SearchText(String),
    Collection(String),
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Address::SearchText(text) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("searchText", text)?;
                map.end()
            }
            Address::Collection(id) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("collectionId", id)?;
                map.serialize_entry("selectedAssumedCollectionId", id)?;
                map.end()
            }
        }
    }
}

/// Which side of a range filter an entry bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterBound {
    Lower,
    Upper,
}

impl Serialize for FilterBound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let code: u8 = match self {
            FilterBound::Lower => 1,
            FilterBound::Upper => 2,
        };
        serializer.serialize_u8(code)
    }
}

/// One entry of `selectedFilters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFilter {
    pub filter_id: String,
    #[serde(rename = "type")]
    pub bound: FilterBound,
    /// Decimal string, as the web client sends it.
    pub value: String,
}

impl SelectedFilter {
    pub(crate) fn price(bound: FilterBound, value: u64) -> Self {
        Self {
            filter_id: PRICE_FILTER_ID.to_string(),
            bound,
            value: value.to_string(),
        }
    }
}

/// Body of a `catalog/search` POST.
///
/// Built by [`crate::QueryBuilder`]; the only mutation the client performs is
/// [`UpstreamPayload::to_collection_lookup`], which returns a new value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamPayload {
    pub(crate) request_version: u32,
    pub(crate) merchant: serde_json::Map<String, serde_json::Value>,
    pub(crate) limit: u32,
    pub(crate) offset: u64,
    pub(crate) is_multi_category_search: bool,
    pub(crate) search_by_original_query: bool,
    pub(crate) selected_suggest_params: Vec<serde_json::Value>,
    pub(crate) expanded_filters_ids: Vec<String>,
    pub(crate) sorting: i32,
    pub(crate) age_more18: Option<bool>,
    pub(crate) show_not_available: bool,
    pub(crate) selected_filters: Vec<SelectedFilter>,
    #[serde(flatten)]
    pub(crate) address: Address,
    pub(crate) auth: Arc<AuthBlock>,
}

impl UpstreamPayload {
    /// Copy of this payload re-addressed to `collection_id`.
    ///
    /// Paging, sorting, availability and filters are kept as they are.
    #[must_use]
    pub fn to_collection_lookup(&self, collection_id: impl Into<String>) -> Self {
        Self {
            request_version: COLLECTION_REQUEST_VERSION,
            address: Address::Collection(collection_id.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    #[must_use]
    pub fn request_version(&self) -> u32 {
        self.request_version
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn sorting(&self) -> i32 {
        self.sorting
    }

    #[must_use]
    pub fn show_not_available(&self) -> bool {
        self.show_not_available
    }

    #[must_use]
    pub fn selected_filters(&self) -> &[SelectedFilter] {
        &self.selected_filters
    }

    #[must_use]
    pub fn auth(&self) -> &AuthBlock {
        &self.auth
    }

    /// Serializes the payload to the JSON text sent upstream.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error; with the field types used here this
    /// only happens if a serializer invariant is broken.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
