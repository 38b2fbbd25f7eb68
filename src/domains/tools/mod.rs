//! Tools domain module.
//!
//! Tools are the operations MCP clients call against the DNSimple account.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `request.rs` - Name + arguments to typed request
//! - `dispatcher.rs` - Credential and account prologue, then the handler
//! - `envelope.rs` - Uniform JSON result returned by every call
//! - `registry.rs` - Tool catalog and entry point for all transports
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with params, `execute()` and `to_tool()`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add a variant to `ToolRequest`
//! 4. List it in `registry.rs`

mod context;
pub mod definitions;
mod dispatcher;
mod envelope;
mod error;
mod registry;
mod request;

pub use context::ToolContext;
pub use dispatcher::Dispatcher;
pub use envelope::Envelope;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use request::ToolRequest;
