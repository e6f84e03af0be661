use std::sync::Arc;

use rmcp::{
    RoleServer, ServerHandler,
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::*,
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::format::FormatPattern;
use crate::core::provider::TimeServer;
use crate::core::{
    error::{DateTimeServerError, McpResult},
    messages,
    models::{
        ConvertTimeRequest, CurrentTimeRequest, DaysInMonthRequest, GetTimestampRequest,
        RelativeTimeRequest, WeekOfYearRequest,
    },
};

/// DateTime MCP Server exposing the date/time tools
#[derive(Clone)]
pub struct DateTimeService {
    time_server: TimeServer,
    local_timezone_name: String,
    tool_router: ToolRouter<DateTimeService>,
    prompt_router: PromptRouter<DateTimeService>,
}

impl DateTimeService {
    pub fn new(time_server: TimeServer) -> Self {
        let local_timezone_name = time_server.local_timezone().name().to_string();

        Self {
            time_server,
            local_timezone_name,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let clock = match config.local_timezone {
            Some(tz) => SystemClock::with_local_timezone(tz),
            None => SystemClock::new(),
        };
        Self::new(TimeServer::with_clock(Arc::new(clock)))
    }

    fn create_resource_text(&self, uri: &str, name: &str) -> Resource {
        RawResource::new(uri, name.to_string()).no_annotation()
    }

    pub(crate) fn get_local_timezone_name(&self) -> &str {
        &self.local_timezone_name
    }

    fn generate_status_content(&self) -> String {
        let current = self
            .time_server
            .get_current_time(FormatPattern::DateTime, None);
        let week = self.time_server.get_week_year(None);

        format!(
            r#"DateTime MCP Server Status

Server: Running
Local Timezone: {}
Current UTC Time: {}
Current Local Time: {}
Days In Current Month: {}
Week / ISO Week: {} / {}
Tools Available: 6
Prompts Available: 1
Resources Available: 3"#,
            current.timezone,
            current.utc,
            current.local,
            self.time_server.days_in_month(None).unwrap_or_default(),
            week.week.unwrap_or_default(),
            week.iso_week.unwrap_or_default(),
        )
    }

    fn generate_help_content(&self) -> String {
        format!(
            r#"DateTime MCP Server Help

TOOLS:
- current_time: Current time in UTC and in a timezone
  - format: One of the output formats (optional, default "YYYY-MM-DD HH:mm:ss")
  - timezone: IANA timezone name (optional, default local timezone)
  - Example: {{"format": "h:mm A", "timezone": "Asia/Shanghai"}}

- relative_time: Distance from now as a phrase ("3 hours ago", "in 2 days")
  - time: Date and time, read in the local timezone (required)
  - Example: {{"time": "2025-03-23 12:30:00"}}

- days_in_month: Number of days in the month of a date
  - date: Date, read in the local timezone (optional, default today)
  - Example: {{"date": "2024-02-15"}}

- get_timestamp: Milliseconds since the Unix epoch
  - time: Date and time, read as UTC (optional, default now)
  - Example: {{"time": "2025-01-01 00:00:00.000"}}

- convert_time: Convert a time between timezones
  - sourceTimezone: Source IANA timezone name (required)
  - targetTimezone: Target IANA timezone name (required)
  - time: Date and time read in the source timezone (optional, default now)
  - Example: {{"sourceTimezone": "Asia/Shanghai", "targetTimezone": "Europe/London", "time": "2025-03-23 12:30:00"}}

- get_week_year: Week and ISO week of the year
  - date: Date, read in the local timezone (optional, default today)
  - Example: {{"date": "2025-03-23"}}

PROMPTS:
- datetime_guidance: Get best practices for the date/time tools

RESOURCES:
- time://status: Current server status and local time
- time://help: This help documentation
- time://formats: Output formats accepted by current_time

LOCAL TIMEZONE: {}

DATE INPUT:
- Year first: "2025-03-23 12:30:00", "2025/3/23", "2025-03", "2025"
- Optional milliseconds: "2025-03-23 12:30:00.250"
- With an offset: "2025-03-23T12:30:00Z", "2025-03-23T12:30:00+08:00"
- Unparseable dates produce "Invalid Date" or NaN instead of an error"#,
            self.local_timezone_name
        )
    }

    fn generate_formats_content(&self) -> String {
        let now = self.time_server.now_local();
        let mut content = String::from("Output Formats for current_time\n\n");
        for pattern in FormatPattern::ALL {
            let marker = if pattern == FormatPattern::default() {
                " (default)"
            } else {
                ""
            };
            content.push_str(&format!(
                "- {}{} -> {}\n",
                pattern,
                marker,
                pattern.render(&now)
            ));
        }
        content
    }
}

#[tool_router]
impl DateTimeService {
    #[tool(description = "Get the current date and time.")]
    pub(crate) async fn current_time(
        &self,
        Parameters(req): Parameters<CurrentTimeRequest>,
    ) -> McpResult<CallToolResult> {
        tracing::debug!(format = %req.format, timezone = ?req.timezone, "current_time");
        let result = self
            .time_server
            .get_current_time(req.format, req.timezone.as_deref());
        Ok(CallToolResult::success(vec![Content::text(
            messages::current_time(&result),
        )]))
    }

    #[tool(description = "Get the relative time from now.")]
    pub(crate) async fn relative_time(
        &self,
        Parameters(req): Parameters<RelativeTimeRequest>,
    ) -> McpResult<CallToolResult> {
        tracing::debug!(time = %req.time, "relative_time");
        let phrase = self.time_server.relative_time(&req.time);
        Ok(CallToolResult::success(vec![Content::text(
            messages::relative_time(phrase),
        )]))
    }

    #[tool(
        description = "Get the number of days in a month. If no date is provided, get the number of days in the current month."
    )]
    pub(crate) async fn days_in_month(
        &self,
        Parameters(req): Parameters<DaysInMonthRequest>,
    ) -> McpResult<CallToolResult> {
        tracing::debug!(date = ?req.date, "days_in_month");
        let days = self.time_server.days_in_month(req.date.as_deref());
        Ok(CallToolResult::success(vec![Content::text(
            messages::days_in_month(days),
        )]))
    }

    #[tool(description = "Get the timestamp for the time.")]
    pub(crate) async fn get_timestamp(
        &self,
        Parameters(req): Parameters<GetTimestampRequest>,
    ) -> McpResult<CallToolResult> {
        tracing::debug!(time = ?req.time, "get_timestamp");
        let millis = self.time_server.get_timestamp(req.time.as_deref());
        Ok(CallToolResult::success(vec![Content::text(
            messages::timestamp(req.time.as_deref(), millis),
        )]))
    }

    #[tool(description = "Convert time between timezones.")]
    pub(crate) async fn convert_time(
        &self,
        Parameters(req): Parameters<ConvertTimeRequest>,
    ) -> McpResult<CallToolResult> {
        tracing::debug!(
            source = %req.source_timezone,
            target = %req.target_timezone,
            time = ?req.time,
            "convert_time"
        );
        let result = self.time_server.convert_time(
            &req.source_timezone,
            &req.target_timezone,
            req.time.as_deref(),
        );
        Ok(CallToolResult::success(vec![Content::text(
            messages::convert_time(&req.source_timezone, &req.target_timezone, &result),
        )]))
    }

    #[tool(description = "Get the week and isoWeek of the year.")]
    pub(crate) async fn get_week_year(
        &self,
        Parameters(req): Parameters<WeekOfYearRequest>,
    ) -> McpResult<CallToolResult> {
        tracing::debug!(date = ?req.date, "get_week_year");
        let result = self.time_server.get_week_year(req.date.as_deref());
        Ok(CallToolResult::success(vec![Content::text(
            messages::week_year(&result),
        )]))
    }
}

#[prompt_router]
impl DateTimeService {
    /// Generate guidance for calling the date/time tools
    #[prompt(name = "datetime_guidance")]
    async fn datetime_guidance(
        &self,
        _ctx: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<Vec<PromptMessage>> {
        let local_tz = self.get_local_timezone_name();
        let guidance = format!(
            r#"Date and Time Tool Best Practices:

1. **IANA Timezone Names**
   - Use full IANA timezone names (e.g., 'Asia/Shanghai', 'Europe/London')
   - Avoid abbreviations like 'EST' or 'CST' as they are ambiguous
   - Unknown names are treated as UTC
   - Your local timezone is detected as: {}

2. **Date Input**
   - Write dates year first: 'YYYY-MM-DD HH:mm:ss' (e.g., '2025-03-23 12:30:00')
   - Trailing parts may be left out: '2025-03-23', '2025-03'
   - relative_time, days_in_month and get_week_year read dates in the local timezone
   - get_timestamp reads dates as UTC
   - convert_time reads the time in the source timezone

3. **Daylight Saving Time**
   - Offsets follow each timezone's DST rules on the given date
   - convert_time reports the difference in whole hours, truncated toward zero
   - Times skipped by a DST change move forward; repeated times use the first occurrence

4. **Invalid Input**
   - Unparseable dates do not fail the call
   - Look for 'Invalid Date' or 'NaN' in the response text"#,
            local_tz
        );

        Ok(vec![PromptMessage {
            role: PromptMessageRole::Assistant,
            content: PromptMessageContent::text(guidance),
        }])
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for DateTimeService {
    fn get_info(&self) -> ServerInfo {
        let local_tz = self.get_local_timezone_name();
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "DateTime MCP Server for date and time utilities. Tools: current_time, relative_time, days_in_month, get_timestamp, convert_time, get_week_year. Local timezone: {}. Use IANA timezone names.",
                local_tz
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ListResourcesResult> {
        Ok(ListResourcesResult {
            resources: vec![
                self.create_resource_text("time://status", "server-status"),
                self.create_resource_text("time://help", "help-documentation"),
                self.create_resource_text("time://formats", "format-list"),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ReadResourceResult> {
        let text = match uri.as_str() {
            "time://status" => self.generate_status_content(),
            "time://help" => self.generate_help_content(),
            "time://formats" => self.generate_formats_content(),
            _ => {
                return Err(DateTimeServerError::ResourceNotFound {
                    uri: uri.to_string(),
                }
                .into());
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<rmcp::RoleServer>,
    ) -> McpResult<ListResourceTemplatesResult> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: Vec::new(),
        })
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> McpResult<InitializeResult> {
        tracing::info!(
            local_timezone = %self.local_timezone_name,
            "DateTime MCP Server initialized successfully"
        );
        Ok(self.get_info())
    }
}

/// Run the DateTime MCP server over stdio until the client disconnects
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::{ServiceExt, transport::stdio};

    let service = DateTimeService::from_config(&config)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}
