//! # DateTime MCP Server Core
//!
//! This module provides the date/time computations behind the MCP tools.
//!
//! ## Features
//! - Current time in UTC and any IANA timezone, in nine output layouts
//! - Relative time phrases ("3 hours ago", "in 2 days")
//! - Days in month, epoch timestamps, week and ISO week numbers
//! - Time conversion between timezones with DST-aware offsets
//!
//! ## Modules
//! - `calendar`: Month lengths and week numbering
//! - `clock`: Injected source of the current instant and local timezone
//! - `error`: Custom error types and error handling
//! - `format`: Allowed output layouts
//! - `humanize`: Relative time phrasing
//! - `messages`: Response text for each tool
//! - `models`: Data structures for requests and responses
//! - `parse`: Parsing of caller-supplied date strings
//! - `provider`: The operations themselves
//! - `utils`: Shared constants and helpers

pub mod calendar;
pub mod clock;
pub mod error;
pub mod format;
pub mod humanize;
pub mod messages;
pub mod models;
pub mod parse;
pub mod provider;
pub mod utils;
