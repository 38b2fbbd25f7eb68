//! Annual renewal cost per domain and in total.

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::pricing::{
    domain_names_or_all, fetch_registrar_domain, fetch_tld_prices, price_amount, tld_of,
};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::tool_model;
use crate::domains::tools::envelope::Envelope;

/// Operation tag of the renewal entry in a TLD price list.
const RENEW_OPERATION: &str = "renew";

/// Currency assumed when a price entry omits it.
const DEFAULT_CURRENCY: &str = "USD";

/// Parameters for the renewal cost tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RenewalCostsParams {
    /// List of domain names to get renewal costs for. If empty, returns costs for all domains in account.
    #[serde(default)]
    pub domain_names: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct RenewalCosts {
    account_id: String,
    total_domains: usize,
    total_annual_renewal_cost: f64,
    domains: Vec<RenewalCost>,
}

#[derive(Debug, Serialize)]
struct RenewalCost {
    domain: String,
    expires_at: Value,
    auto_renew: Value,
    renewal_price: Option<f64>,
    currency: Option<String>,
}

pub struct RenewalCostsTool;

impl RenewalCostsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_renewal_costs";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get renewal costs for domains. Returns total annual renewal cost and per-domain breakdown.";

    #[instrument(skip_all, fields(account_id = %ctx.account_id))]
    pub fn execute(params: &RenewalCostsParams, ctx: &ToolContext<'_>) -> Envelope {
        let names = match domain_names_or_all(ctx, params.domain_names.as_deref()) {
            Ok(names) => names,
            Err(e) => {
                error!("Failed to list domains: {}", e);
                return Envelope::error(format!("Failed to list domains: {e}"));
            }
        };

        let mut total = 0.0;
        let mut domains = Vec::with_capacity(names.len());

        for domain in &names {
            let info = fetch_registrar_domain(ctx, domain);
            let renewal = find_renewal_price(&fetch_tld_prices(ctx, tld_of(domain)), domain);

            let (renewal_price, currency) = match renewal {
                Some((amount, currency)) => {
                    total += amount;
                    (Some(amount), Some(currency))
                }
                None => (None, None),
            };

            domains.push(RenewalCost {
                domain: domain.clone(),
                expires_at: info
                    .as_ref()
                    .and_then(|i| i.get("expires_at").cloned())
                    .unwrap_or(Value::Null),
                auto_renew: info
                    .as_ref()
                    .map(|i| i.get("auto_renew").cloned().unwrap_or(Value::Bool(false)))
                    .unwrap_or(Value::Null),
                renewal_price,
                currency,
            });
        }

        info!("Renewal total for {} domains: {:.2}", names.len(), total);

        Envelope::from_serialize(&RenewalCosts {
            account_id: ctx.account_id.to_string(),
            total_domains: names.len(),
            total_annual_renewal_cost: round_cents(total),
            domains,
        })
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_model(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<RenewalCostsParams>(),
        )
    }
}

/// Amount and currency of the `renew` entry, if the price list has one.
fn find_renewal_price(prices: &[Value], domain: &str) -> Option<(f64, String)> {
    let entry = prices
        .iter()
        .find(|p| p.get("operation").and_then(Value::as_str) == Some(RENEW_OPERATION))?;

    let Some(amount) = price_amount(entry) else {
        warn!(domain, "Unparseable renewal price: {}", entry);
        return None;
    };

    let currency = entry
        .get("currency")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_CURRENCY)
        .to_string();

    Some((amount, currency))
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registrar::testing::FakeRegistrar;
    use crate::domains::tools::context::test_context;
    use serde_json::json;

    fn params(names: &[&str]) -> RenewalCostsParams {
        RenewalCostsParams {
            domain_names: Some(names.iter().map(|n| n.to_string()).collect()),
        }
    }

    #[test]
    fn test_total_counts_only_found_renewal_prices() {
        let fake = FakeRegistrar::new();
        fake.set_prices(
            "com",
            vec![
                json!({"operation": "registration", "price": "12.00", "currency": "USD"}),
                json!({"operation": "renew", "price": "14.50", "currency": "EUR"}),
            ],
        );
        fake.set_prices("io", vec![json!({"operation": "registration", "price": "40.00"})]);
        fake.set_registrar_domain(
            "example.com",
            json!({"name": "example.com", "expires_at": "2027-01-01T00:00:00Z", "auto_renew": true}),
        );
        let ctx = test_context(&fake);

        let value = RenewalCostsTool::execute(&params(&["example.com", "example.io"]), &ctx)
            .into_value();

        assert_eq!(value["total_domains"], 2);
        assert_eq!(value["total_annual_renewal_cost"].as_f64(), Some(14.5));

        let domains = value["domains"].as_array().unwrap();
        assert_eq!(domains[0]["renewal_price"].as_f64(), Some(14.5));
        assert_eq!(domains[0]["currency"], "EUR");
        assert_eq!(domains[0]["expires_at"], "2027-01-01T00:00:00Z");
        assert_eq!(domains[0]["auto_renew"], true);

        assert_eq!(domains[1]["renewal_price"], Value::Null);
        assert_eq!(domains[1]["currency"], Value::Null);
        assert_eq!(domains[1]["auto_renew"], Value::Null);
    }

    #[test]
    fn test_total_is_zero_without_prices() {
        let fake = FakeRegistrar::new();
        let ctx = test_context(&fake);

        let value = RenewalCostsTool::execute(&params(&["a.xyz"]), &ctx).into_value();

        assert_eq!(value["total_domains"], 1);
        assert_eq!(value["total_annual_renewal_cost"].as_f64(), Some(0.0));
    }

    #[test]
    fn test_registrar_record_without_auto_renew_reports_false() {
        let fake = FakeRegistrar::new();
        fake.set_registrar_domain("bare.com", json!({"name": "bare.com"}));
        let ctx = test_context(&fake);

        let value = RenewalCostsTool::execute(&params(&["bare.com"]), &ctx).into_value();
        assert_eq!(value["domains"][0]["auto_renew"], false);
    }

    #[test]
    fn test_currency_defaults_to_usd() {
        let prices = vec![json!({"operation": "renew", "price": 9})];
        assert_eq!(
            find_renewal_price(&prices, "x.com"),
            Some((9.0, "USD".to_string()))
        );
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
        assert_eq!(round_cents(14.0), 14.0);
    }
}
