//! DNSimple MCP server entry point.
//!
//! Loads configuration, initializes logging on stderr and serves the tool
//! catalog over the configured transport.

use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use dnsimple_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging.level, config.logging.with_timestamps);

    config.validate()?;
    if let Err(e) = config.ensure_config_dir() {
        warn!("Could not create config directory: {}", e);
    }

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("DNSimple API: {}", config.api.base_url);

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config);

    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Logs go to stderr; stdout belongs to the stdio transport.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
