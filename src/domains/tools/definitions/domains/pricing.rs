//! Lookups shared by the cost tools.
//!
//! Price and registrar lookups are best-effort per domain: a failure turns
//! into an empty price list or an absent record and never aborts the batch.

use serde_json::Value;
use tracing::debug;

use crate::domains::registrar::{RegistrarError, fetch_all_pages};
use crate::domains::tools::context::ToolContext;

/// The TLD a domain is priced under: everything after the last dot.
pub fn tld_of(domain: &str) -> &str {
    domain.rsplit_once('.').map_or(domain, |(_, tld)| tld)
}

/// Price list of `tld`, empty on any failure.
pub fn fetch_tld_prices(ctx: &ToolContext<'_>, tld: &str) -> Vec<Value> {
    match ctx.client.get(ctx.path(&format!("/registrar/tlds/{tld}/prices"))) {
        Ok(response) if response.is_status(&[200]) => match response.data() {
            Some(Value::Array(prices)) => prices,
            _ => Vec::new(),
        },
        Ok(response) => {
            debug!(tld, status = response.status, "No prices for TLD");
            Vec::new()
        }
        Err(e) => {
            debug!(tld, "Price lookup failed: {}", e);
            Vec::new()
        }
    }
}

/// Registrar record of `domain`, `None` on any failure.
pub fn fetch_registrar_domain(ctx: &ToolContext<'_>, domain: &str) -> Option<Value> {
    match ctx.client.get(ctx.path(&format!("/registrar/domains/{domain}"))) {
        Ok(response) if response.is_status(&[200]) => response.data().filter(|d| !d.is_null()),
        Ok(response) => {
            debug!(domain, status = response.status, "No registrar record");
            None
        }
        Err(e) => {
            debug!(domain, "Registrar lookup failed: {}", e);
            None
        }
    }
}

/// The requested names, or every domain in the account when none are given.
pub fn domain_names_or_all(
    ctx: &ToolContext<'_>,
    requested: Option<&[String]>,
) -> Result<Vec<String>, RegistrarError> {
    match requested {
        Some(names) if !names.is_empty() => Ok(names.to_vec()),
        _ => {
            let domains = fetch_all_pages(&ctx.client, &ctx.path("/domains"), &[], ctx.max_pages)?;
            Ok(domains
                .iter()
                .filter_map(|d| d.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect())
        }
    }
}

/// Numeric amount of a price entry; the API sends prices as decimal strings.
pub fn price_amount(entry: &Value) -> Option<f64> {
    match entry.get("price") {
        None | Some(Value::Null) => Some(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registrar::testing::FakeRegistrar;
    use crate::domains::tools::context::test_context;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_tld_of() {
        assert_eq!(tld_of("example.com"), "com");
        assert_eq!(tld_of("example.co.uk"), "uk");
        assert_eq!(tld_of("localhost"), "localhost");
    }

    #[test]
    fn test_price_amount() {
        assert_eq!(price_amount(&json!({"price": "14.50"})), Some(14.5));
        assert_eq!(price_amount(&json!({"price": 20})), Some(20.0));
        assert_eq!(price_amount(&json!({"operation": "renew"})), Some(0.0));
        assert_eq!(price_amount(&json!({"price": "n/a"})), None);
    }

    #[test]
    fn test_prices_best_effort() {
        let fake = FakeRegistrar::new();
        fake.set_prices("com", vec![json!({"operation": "renew", "price": "14.00"})]);
        fake.unreachable(Method::GET, "/1010/registrar/tlds/net/prices");
        let ctx = test_context(&fake);

        assert_eq!(fetch_tld_prices(&ctx, "com").len(), 1);
        assert!(fetch_tld_prices(&ctx, "net").is_empty());
        assert!(fetch_tld_prices(&ctx, "org").is_empty());
    }

    #[test]
    fn test_registrar_domain_best_effort() {
        let fake = FakeRegistrar::new();
        fake.set_registrar_domain("example.com", json!({"name": "example.com"}));
        let ctx = test_context(&fake);

        assert!(fetch_registrar_domain(&ctx, "example.com").is_some());
        assert!(fetch_registrar_domain(&ctx, "missing.com").is_none());
    }

    #[test]
    fn test_domain_names_default_to_account_listing() {
        let fake = FakeRegistrar::new();
        fake.set_domains(vec![json!({"name": "a.com"}), json!({"name": "b.io"})]);
        let ctx = test_context(&fake);

        let requested = vec!["x.org".to_string()];
        assert_eq!(domain_names_or_all(&ctx, Some(requested.as_slice())).unwrap(), requested);
        assert_eq!(domain_names_or_all(&ctx, Some(&[][..])).unwrap(), vec!["a.com", "b.io"]);
        assert_eq!(domain_names_or_all(&ctx, None).unwrap(), vec!["a.com", "b.io"]);
    }
}
