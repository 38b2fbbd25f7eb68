//! Collect every page of a list endpoint.

use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::client::{ApiClient, ApiRequest};
use super::error::RegistrarError;

/// Page size requested from list endpoints.
pub const PER_PAGE: u32 = 100;

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    data: Vec<Value>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    current_page: Option<u32>,
    total_pages: Option<u32>,
}

/// Fetch `path` page by page and concatenate the `data` arrays in order.
///
/// `filters` are attached to every page request. A response without a
/// pagination block is the last page. Fails with
/// [`RegistrarError::PageLimitExceeded`] if the server still reports more
/// pages after `max_pages` requests.
#[instrument(skip(client, filters))]
pub fn fetch_all_pages(
    client: &ApiClient<'_>,
    path: &str,
    filters: &[(&str, String)],
    max_pages: u32,
) -> Result<Vec<Value>, RegistrarError> {
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let mut request = ApiRequest::new(Method::GET, path)
            .query("page", page)
            .query("per_page", PER_PAGE);
        for (key, value) in filters {
            request = request.query(*key, value);
        }

        let body: Page = client.send(request)?.error_for_status()?.json()?;
        debug!(page, items = body.data.len(), "Fetched page");
        items.extend(body.data);

        let done = match body.pagination {
            None => true,
            Some(p) => p.current_page.unwrap_or(page) >= p.total_pages.unwrap_or(1),
        };
        if done {
            return Ok(items);
        }

        if page >= max_pages {
            warn!(path, max_pages, "Server reported more pages than the cap");
            return Err(RegistrarError::PageLimitExceeded {
                path: path.to_string(),
                limit: max_pages,
            });
        }
        page += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registrar::credentials::Credential;
    use crate::domains::registrar::testing::FakeRegistrar;
    use serde_json::json;

    fn domains(count: usize) -> Vec<Value> {
        (0..count)
            .map(|i| json!({"id": i, "name": format!("domain{i}.com")}))
            .collect()
    }

    #[test]
    fn test_concatenates_all_pages_in_order() {
        let fake = FakeRegistrar::new();
        fake.set_domains(domains(237));
        let client = ApiClient::new(&fake, Credential::new("token"));

        let items = fetch_all_pages(&client, "/1010/domains", &[], 1000).unwrap();

        assert_eq!(items.len(), 237);
        assert_eq!(items[0]["name"], "domain0.com");
        assert_eq!(items[236]["name"], "domain236.com");
        assert_eq!(fake.count(&Method::GET, "/1010/domains"), 3);
    }

    #[test]
    fn test_missing_pagination_is_single_page() {
        let fake = FakeRegistrar::new();
        fake.respond(Method::GET, "/1010/things", 200, json!({"data": [1, 2, 3]}));
        let client = ApiClient::new(&fake, Credential::new("token"));

        let items = fetch_all_pages(&client, "/1010/things", &[], 1000).unwrap();

        assert_eq!(items, vec![json!(1), json!(2), json!(3)]);
        assert_eq!(fake.count(&Method::GET, "/1010/things"), 1);
    }

    #[test]
    fn test_runaway_pagination_is_capped() {
        let fake = FakeRegistrar::new();
        // Claims to always be on page 1 of 2.
        fake.respond(
            Method::GET,
            "/1010/things",
            200,
            json!({"data": [1], "pagination": {"current_page": 1, "total_pages": 2}}),
        );
        let client = ApiClient::new(&fake, Credential::new("token"));

        let err = fetch_all_pages(&client, "/1010/things", &[], 5).unwrap_err();

        assert!(matches!(err, RegistrarError::PageLimitExceeded { limit: 5, .. }));
        assert_eq!(fake.count(&Method::GET, "/1010/things"), 5);
    }

    #[test]
    fn test_filters_attached_to_every_page() {
        let fake = FakeRegistrar::new();
        fake.respond(
            Method::GET,
            "/1010/things",
            200,
            json!({"data": [], "pagination": {"current_page": 1, "total_pages": 1}}),
        );
        let client = ApiClient::new(&fake, Credential::new("token"));

        fetch_all_pages(&client, "/1010/things", &[("type", "MX".to_string())], 10).unwrap();

        let requests = fake.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_param("type"), Some("MX"));
        assert_eq!(requests[0].query_param("per_page"), Some("100"));
    }

    #[test]
    fn test_http_error_fails_fetch() {
        let fake = FakeRegistrar::new();
        fake.respond(Method::GET, "/1010/things", 500, json!({"message": "boom"}));
        let client = ApiClient::new(&fake, Credential::new("token"));

        let err = fetch_all_pages(&client, "/1010/things", &[], 10).unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
