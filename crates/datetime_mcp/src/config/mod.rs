use chrono_tz::Tz;

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Overrides the detected host timezone when set
    pub local_timezone: Option<Tz>,
}
