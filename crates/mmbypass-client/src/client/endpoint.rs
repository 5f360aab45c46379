//! Catalog endpoint addressing.

pub use mmbypass_core::DEFAULT_ORIGIN;

/// Path of the mobile catalog search endpoint.
pub const CATALOG_SEARCH_PATH: &str = "/api/mobile/v1/catalogService/catalog/search";

/// Joins `origin` and the search path, tolerating trailing slashes on the origin.
#[must_use]
pub fn search_url(origin: &str) -> String {
    format!("{}{CATALOG_SEARCH_PATH}", origin.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_for_default_origin() {
        assert_eq!(
            search_url(DEFAULT_ORIGIN),
            "https://megamarket.ru/api/mobile/v1/catalogService/catalog/search"
        );
    }

    #[test]
    fn search_url_strips_trailing_slash() {
        assert_eq!(
            search_url("http://127.0.0.1:4000/"),
            "http://127.0.0.1:4000/api/mobile/v1/catalogService/catalog/search"
        );
    }
}
