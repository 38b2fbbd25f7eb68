//! DNSimple MCP Server Library
//!
//! A Model Context Protocol server exposing DNSimple registrar and DNS
//! operations as tools: domain listing, pricing and renewal costs, DNS record
//! management, auto-renew, transfers and whois privacy.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **registrar**: credential resolution, account lookup, HTTP client, pagination
//!   - **tools**: tool catalog, dispatcher, result envelopes and tool definitions
//!
//! Every tool call yields exactly one JSON envelope. Failures (missing token,
//! API errors, unknown tools) are reported inside the envelope with
//! `isError` set, never as protocol faults.
//!
//! # Example
//!
//! ```rust,no_run
//! use dnsimple_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let transport = TransportService::new(config.transport.clone());
//!     transport.run(McpServer::new(config)).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
