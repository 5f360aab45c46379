use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RequestError;

/// Upstream sort code.
///
/// The catalog only documents a handful of codes; any other integer is
/// forwarded unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum SortOrder {
    #[default]
    Relevance,
    PriceAscending,
    PriceDescending,
    Newest,
    Other(i32),
}

impl SortOrder {
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            SortOrder::Relevance => 0,
            SortOrder::PriceAscending => 1,
            SortOrder::PriceDescending => 2,
            SortOrder::Newest => 5,
            SortOrder::Other(code) => code,
        }
    }

    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => SortOrder::Relevance,
            1 => SortOrder::PriceAscending,
            2 => SortOrder::PriceDescending,
            5 => SortOrder::Newest,
            other => SortOrder::Other(other),
        }
    }
}

impl From<i32> for SortOrder {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl From<SortOrder> for i32 {
    fn from(order: SortOrder) -> Self {
        order.code()
    }
}

impl FromStr for SortOrder {
    type Err = RequestError;

    /// Accepts an integer code or one of `priceup`, `pricedown`, `newly`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "priceup" => Ok(SortOrder::PriceAscending),
            "pricedown" => Ok(SortOrder::PriceDescending),
            "newly" => Ok(SortOrder::Newest),
            _ => s
                .parse::<i32>()
                .map(SortOrder::from_code)
                .map_err(|_| RequestError::InvalidSortOrder(s.to_string())),
        }
    }
}

/// Inclusive price bounds in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    low: u64,
    high: u64,
}

impl PriceRange {
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidPriceRange`] when `low > high`.
    pub fn new(low: u64, high: u64) -> Result<Self, RequestError> {
        if low > high {
            return Err(RequestError::InvalidPriceRange { low, high });
        }
        Ok(Self { low, high })
    }

    #[must_use]
    pub fn low(&self) -> u64 {
        self.low
    }

    #[must_use]
    pub fn high(&self) -> u64 {
        self.high
    }
}

/// A validated catalog search.
///
/// Fields are private so every instance has gone through [`SearchRequest::new`]:
/// the text is non-blank and the page is at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    text: String,
    page: u32,
    sort: SortOrder,
    include_unavailable: bool,
    price_filter: Option<PriceRange>,
}

impl SearchRequest {
    /// Validates and builds a search request.
    ///
    /// # Errors
    ///
    /// - [`RequestError::EmptyQuery`] if `text` is empty or whitespace.
    /// - [`RequestError::InvalidPage`] if `page < 1` or does not fit in `u32`.
    pub fn new(
        text: impl Into<String>,
        page: i64,
        sort: SortOrder,
        include_unavailable: bool,
        price_filter: Option<PriceRange>,
    ) -> Result<Self, RequestError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(RequestError::EmptyQuery);
        }

        let page = u32::try_from(page)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or(RequestError::InvalidPage(page))?;

        Ok(Self {
            text,
            page,
            sort,
            include_unavailable,
            price_filter,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    #[must_use]
    pub fn include_unavailable(&self) -> bool {
        self.include_unavailable
    }

    #[must_use]
    pub fn price_filter(&self) -> Option<PriceRange> {
        self.price_filter
    }
}
