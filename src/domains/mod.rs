//! Domain modules organized by bounded context.
//!
//! - `registrar` - talking to the DNSimple API (credentials, account, HTTP, pagination)
//! - `tools` - the MCP tools built on top of it

pub mod registrar;
pub mod tools;
