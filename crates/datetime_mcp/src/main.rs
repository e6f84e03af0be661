mod cli;
mod config;
mod core;
mod server;
mod utils;

use std::process::ExitCode;

use cli::Cli;
use utils::logging;

/// DateTime MCP Server
///
/// Tools: current_time, relative_time, days_in_month, get_timestamp,
/// convert_time, get_week_year
///
/// Usage: npx @modelcontextprotocol/inspector cargo run --bin mcp-server-datetime
#[tokio::main]
async fn main() -> ExitCode {
    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Error running DateTime MCP server: {}", e);
            // stdout belongs to the protocol, so failures go to stderr
            eprintln!("Error starting DateTime MCP server: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn start() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments
    let config = Cli::parse_config()?;

    // Initialize logging based on environment
    logging::init_logging()?;

    tracing::info!("Starting DateTime MCP server");
    server::run(config).await
}
