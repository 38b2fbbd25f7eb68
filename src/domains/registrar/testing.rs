//! In-memory DNSimple stand-in for unit tests.
//!
//! Routes requests the way the real API lays out its paths and keeps enough
//! state (zone records, whois privacy, auto-renew) for multi-call flows.
//! Canned responses registered with [`FakeRegistrar::respond`] take
//! precedence over the routing.

use std::collections::HashMap;
use std::sync::Mutex;

use reqwest::Method;
use serde_json::{Value, json};

use super::client::{ApiRequest, ApiResponse, HttpBackend};
use super::credentials::Credential;
use super::error::RegistrarError;

/// Account id the fake reports from `/whoami` by default.
pub const ACCOUNT_ID: &str = "1010";

#[derive(Default)]
struct State {
    requests: Vec<ApiRequest>,
    whoami: Value,
    accounts: Vec<Value>,
    domains: Vec<Value>,
    registrar_domains: HashMap<String, Value>,
    prices: HashMap<String, Vec<Value>>,
    records: HashMap<String, Vec<Value>>,
    next_record_id: u64,
    whois: HashMap<String, Value>,
    canned: Vec<(Method, String, ApiResponse)>,
    unreachable: Vec<(Method, String)>,
}

pub struct FakeRegistrar {
    state: Mutex<State>,
}

impl FakeRegistrar {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                whoami: json!({"data": {"user": null, "account": {"id": 1010}}}),
                next_record_id: 1,
                ..State::default()
            }),
        }
    }

    pub fn set_whoami(&self, body: Value) {
        self.state.lock().unwrap().whoami = body;
    }

    pub fn set_accounts(&self, accounts: Vec<Value>) {
        self.state.lock().unwrap().accounts = accounts;
    }

    pub fn set_domains(&self, domains: Vec<Value>) {
        self.state.lock().unwrap().domains = domains;
    }

    /// Registrar-side record of `name` (expiry, auto-renew).
    pub fn set_registrar_domain(&self, name: &str, data: Value) {
        self.state
            .lock()
            .unwrap()
            .registrar_domains
            .insert(name.to_string(), data);
    }

    pub fn registrar_domain(&self, name: &str) -> Option<Value> {
        self.state.lock().unwrap().registrar_domains.get(name).cloned()
    }

    pub fn set_prices(&self, tld: &str, prices: Vec<Value>) {
        self.state
            .lock()
            .unwrap()
            .prices
            .insert(tld.to_string(), prices);
    }

    /// Seed a zone record, returning its id.
    pub fn add_record(&self, zone: &str, mut record: Value) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_record_id;
        state.next_record_id += 1;
        record["id"] = json!(id);
        state.records.entry(zone.to_string()).or_default().push(record);
        id
    }

    pub fn records(&self, zone: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .records
            .get(zone)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_whois(&self, domain: &str, data: Value) {
        self.state
            .lock()
            .unwrap()
            .whois
            .insert(domain.to_string(), data);
    }

    /// Always answer `method path` with `status` and a JSON body.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    /// Always answer `method path` with `status` and a raw body.
    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        self.state.lock().unwrap().canned.push((
            method,
            path.to_string(),
            ApiResponse::new(status, body),
        ));
    }

    /// Fail `method path` at the transport level.
    pub fn unreachable(&self, method: Method, path: &str) {
        self.state
            .lock()
            .unwrap()
            .unreachable
            .push((method, path.to_string()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of requests received for `method path`.
    pub fn count(&self, method: &Method, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .count()
    }
}

impl HttpBackend for FakeRegistrar {
    fn send(&self, _token: &Credential, request: &ApiRequest) -> Result<ApiResponse, RegistrarError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());

        if state
            .unreachable
            .iter()
            .any(|(m, p)| *m == request.method && *p == request.path)
        {
            return Err(RegistrarError::transport("Connection failed: connection refused"));
        }

        if let Some((_, _, response)) = state
            .canned
            .iter()
            .find(|(m, p, _)| *m == request.method && *p == request.path)
        {
            return Ok(response.clone());
        }

        Ok(state.route(request))
    }
}

impl State {
    fn route(&mut self, request: &ApiRequest) -> ApiResponse {
        let segments: Vec<&str> = request.path.trim_start_matches('/').split('/').collect();
        let method = request.method.clone();

        match (method, segments.as_slice()) {
            (Method::GET, ["whoami"]) => ApiResponse::json_body(200, &self.whoami),
            (Method::GET, ["accounts"]) => ok(json!(self.accounts)),
            (Method::GET, [_, "domains"]) => paginate(&self.domains, request),
            (Method::GET, [_, "registrar", "tlds", tld, "prices"]) => match self.prices.get(*tld) {
                Some(prices) => ok(json!(prices)),
                None => not_found(&format!("TLD .{tld} not supported")),
            },
            (Method::GET, [_, "registrar", "domains", domain]) => {
                match self.registrar_domains.get(*domain) {
                    Some(data) => ok(data.clone()),
                    None => not_found(&format!("Domain `{domain}` not found")),
                }
            }
            (Method::PATCH, [_, "registrar", "domains", domain]) => {
                match self.registrar_domains.get_mut(*domain) {
                    Some(data) => {
                        merge(data, request.body.as_ref());
                        ok(data.clone())
                    }
                    None => not_found(&format!("Domain `{domain}` not found")),
                }
            }
            (Method::POST, [_, "registrar", "domains", domain, "transfers"]) => {
                let body = request.body.clone().unwrap_or_default();
                ApiResponse::json_body(
                    201,
                    &json!({"data": {
                        "id": 361,
                        "domain": domain,
                        "registrant_id": body.get("registrant_id"),
                        "state": "transferring",
                    }}),
                )
            }
            (Method::GET, [_, "registrar", "domains", domain, "whois_privacy"]) => {
                match self.whois.get(*domain) {
                    Some(data) => ok(data.clone()),
                    None => not_found("Whois privacy not found"),
                }
            }
            (Method::PUT, [_, "registrar", "domains", domain, "whois_privacy"]) => {
                let data = json!({"domain": domain, "enabled": true, "expires_on": "2027-10-17"});
                self.whois.insert(domain.to_string(), data.clone());
                ApiResponse::json_body(201, &json!({"data": data}))
            }
            (Method::GET, [_, "zones", zone, "records"]) => {
                let name = request.query_param("name");
                let kind = request.query_param("type");
                let matching: Vec<Value> = self
                    .records
                    .get(*zone)
                    .into_iter()
                    .flatten()
                    .filter(|r| name.is_none_or(|n| r["name"] == n))
                    .filter(|r| kind.is_none_or(|t| r["type"] == t))
                    .cloned()
                    .collect();
                paginate(&matching, request)
            }
            (Method::POST, [_, "zones", zone, "records"]) => {
                let mut record = request.body.clone().unwrap_or_default();
                record["id"] = json!(self.next_record_id);
                record["zone_id"] = json!(zone);
                self.next_record_id += 1;
                self.records
                    .entry(zone.to_string())
                    .or_default()
                    .push(record.clone());
                ApiResponse::json_body(201, &json!({"data": record}))
            }
            (Method::PATCH, [_, "zones", zone, "records", id]) => {
                match self.find_record(zone, id) {
                    Some(record) => {
                        merge(record, request.body.as_ref());
                        let record = record.clone();
                        ok(record)
                    }
                    None => not_found("Record not found"),
                }
            }
            (Method::DELETE, [_, "zones", zone, "records", id]) => {
                let records = self.records.entry(zone.to_string()).or_default();
                let before = records.len();
                records.retain(|r| r["id"].to_string() != *id);
                if records.len() < before {
                    ApiResponse::new(204, "")
                } else {
                    not_found("Record not found")
                }
            }
            _ => not_found("Not found"),
        }
    }

    fn find_record(&mut self, zone: &str, id: &str) -> Option<&mut Value> {
        self.records
            .get_mut(zone)?
            .iter_mut()
            .find(|r| r["id"].to_string() == id)
    }
}

fn ok(data: Value) -> ApiResponse {
    ApiResponse::json_body(200, &json!({"data": data}))
}

fn not_found(message: &str) -> ApiResponse {
    ApiResponse::json_body(404, &json!({"message": message}))
}

fn merge(target: &mut Value, patch: Option<&Value>) {
    if let (Some(target), Some(Value::Object(patch))) = (target.as_object_mut(), patch) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
}

fn paginate(items: &[Value], request: &ApiRequest) -> ApiResponse {
    let page: usize = request
        .query_param("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let per_page: usize = request
        .query_param("per_page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(30);
    let total_pages = items.len().div_ceil(per_page).max(1);

    let data: Vec<Value> = items
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    ApiResponse::json_body(
        200,
        &json!({
            "data": data,
            "pagination": {
                "current_page": page,
                "per_page": per_page,
                "total_entries": items.len(),
                "total_pages": total_pages,
            }
        }),
    )
}
