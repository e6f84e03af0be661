use std::str::FromStr;

use chrono_tz::Tz;
use clap::Parser;

use crate::config::Config;
use crate::core::error::{StartupError, StartupResult};

/// DateTime MCP Server
///
/// A Model Context Protocol server providing date and time utilities over stdio.
///
/// ## Features
/// - **Tools**: current_time, relative_time, days_in_month, get_timestamp,
///   convert_time, get_week_year
/// - **Resources**: Server status, help and the list of output formats
/// - **Prompts**: Guidance for calling the tools
///
/// ## Development
/// ```bash
/// npx @modelcontextprotocol/inspector cargo run --bin mcp-server-datetime
/// ```
///
/// ## Configuration
/// Add to your MCP client configuration:
/// ```json
/// {
///   "mcpServers": {
///     "datetime": {
///       "command": "mcp-server-datetime",
///       "args": ["--local-timezone", "Asia/Shanghai"],
///       "env": {
///         "RUST_LOG": "info"
///       }
///     }
///   }
/// }
/// ```
///
/// ## Environment Variables
/// - `RUST_LOG`: Controls logging verbosity (trace, debug, info, warn, error)
#[derive(Parser, Debug, Clone)]
#[command(name = "mcp-server-datetime")]
#[command(about = "A date and time utilities MCP server")]
#[command(version)]
#[command(
    long_about = "A Model Context Protocol (MCP) server that provides date and time utilities. \nSupports current time in any timezone, relative time, days in month, timestamps, timezone conversion and week numbers."
)]
pub struct Cli {
    /// Local timezone used when a tool call does not name one.
    ///
    /// If not specified, the host timezone is detected, falling back to UTC.
    #[arg(
        long,
        value_name = "IANA_TIMEZONE",
        help = "Local timezone to use instead of the detected one, e.g. Asia/Shanghai"
    )]
    pub local_timezone: Option<String>,
}

impl Cli {
    /// Parse CLI arguments and convert to configuration
    pub fn parse_config() -> StartupResult<Config> {
        Self::parse().into_config()
    }

    fn into_config(self) -> StartupResult<Config> {
        let local_timezone = self
            .local_timezone
            .map(|name| {
                let name = name.trim();
                Tz::from_str(name).map_err(|_| StartupError::InvalidLocalTimezone {
                    timezone: name.to_string(),
                })
            })
            .transpose()?;

        Ok(Config { local_timezone })
    }
}
