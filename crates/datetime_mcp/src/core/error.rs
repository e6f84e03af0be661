use rmcp::ErrorData as McpError;
use rmcp::serde_json::json;

use crate::core::utils::AVAILABLE_RESOURCES;

// Error codes
const ERROR_RESOURCE_NOT_FOUND: &str = "resource_not_found";

/// Errors returned to MCP clients.
///
/// The six tools never fail on malformed dates; those degrade to
/// `Invalid Date` / `NaN` in the response text instead.
#[derive(Debug, thiserror::Error)]
pub enum DateTimeServerError {
    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },
}

/// Errors that stop the server before the transport starts
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Invalid local timezone: {timezone}. Expected an IANA timezone name")]
    InvalidLocalTimezone { timezone: String },
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
}

impl From<DateTimeServerError> for McpError {
    fn from(err: DateTimeServerError) -> Self {
        match err {
            DateTimeServerError::ResourceNotFound { uri } => McpError::resource_not_found(
                ERROR_RESOURCE_NOT_FOUND,
                Some(json!({
                    "uri": uri,
                    "available_resources": AVAILABLE_RESOURCES
                })),
            ),
        }
    }
}

pub type StartupResult<T> = Result<T, StartupError>;
pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::{DateTimeServerError, StartupError};
    use crate::core::error::McpError;

    #[test]
    fn test_resource_not_found_conversion() {
        let error = DateTimeServerError::ResourceNotFound {
            uri: "time://nowhere".to_string(),
        };
        let mcp_error: McpError = error.into();

        assert!(mcp_error.to_string().contains("resource_not_found"));
        let data = mcp_error.data.expect("error data");
        assert_eq!(data["uri"], "time://nowhere");
        assert!(data["available_resources"].is_array());
    }

    #[test]
    fn test_invalid_local_timezone_message() {
        let error = StartupError::InvalidLocalTimezone {
            timezone: "Mars/Olympus".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid local timezone: Mars/Olympus. Expected an IANA timezone name"
        );
    }

    #[test]
    fn test_logging_initialization_message() {
        let error = StartupError::LoggingInitialization("already set".to_string());
        assert_eq!(error.to_string(), "Logging initialization failed: already set");
    }
}
