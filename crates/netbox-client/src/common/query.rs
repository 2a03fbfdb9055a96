//! List queries against NetBox collection endpoints
//!
//! Filters go straight into the query string. When every page is wanted the
//! first request asks for large pages, and later pages follow the `next`
//! links NetBox returns (which carry the same limit).

use crate::common::{HttpClient, PaginatedResponse};
use crate::error::NetBoxError;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Page size requested when walking every page of a collection
pub const FETCH_ALL_PAGE_SIZE: u32 = 1000;

/// Path of a collection listing, e.g. `/api/ipam/prefixes/?vrf_id=3&limit=1000`
#[must_use]
pub fn list_path(http: &HttpClient, endpoint: &str, filters: &[(&str, &str)], page_size: Option<u32>) -> String {
    let limit = page_size.map(|size| size.to_string());
    let mut params: Vec<(&str, &str)> = filters.to_vec();
    if let Some(limit) = limit.as_deref() {
        params.push(("limit", limit));
    }

    if params.is_empty() {
        format!("/api/{}/", endpoint)
    } else {
        format!("/api/{}/?{}", endpoint, http.build_query_string(&params))
    }
}

/// List `endpoint` (e.g. `ipam/prefixes`) with filters; first page only unless `fetch_all`
pub async fn query_resources<T: DeserializeOwned>(
    http: &HttpClient,
    endpoint: &str,
    filters: &[(&str, &str)],
    fetch_all: bool,
) -> Result<Vec<T>, NetBoxError> {
    debug!("Listing {} (all pages: {}) with filters: {:?}", endpoint, fetch_all, filters);

    if fetch_all {
        let path = list_path(http, endpoint, filters, Some(FETCH_ALL_PAGE_SIZE));
        http.fetch_all_pages(http.build_url(&path)).await
    } else {
        let path = list_path(http, endpoint, filters, None);
        let page: PaginatedResponse<T> = http.get(&path).await?;
        Ok(page.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http() -> HttpClient {
        HttpClient::new(reqwest::Client::new(), "http://netbox".to_string(), "token".to_string())
    }

    #[test]
    fn test_list_path_without_filters() {
        assert_eq!(list_path(&http(), "dcim/regions", &[], None), "/api/dcim/regions/");
    }

    #[test]
    fn test_list_path_encodes_filters_and_limit() {
        let path = list_path(&http(), "ipam/prefixes", &[("prefix", "10.0.0.0/16"), ("vrf_id", "3")], Some(1000));
        assert_eq!(path, "/api/ipam/prefixes/?prefix=10.0.0.0%2F16&vrf_id=3&limit=1000");
    }
}
