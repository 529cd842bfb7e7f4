use chrono::{DateTime, Utc};

/// Layout for timestamps on dashboard pages, e.g. `5/Mar/2024 15:05:05`.
pub const TIMESTAMP_FORMAT: &str = "%-d/%b/%Y %H:%M:%S";

/// Format an instant with the dashboard layout, in UTC.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Template-side formatting of optional instants.
pub trait TimeDisplay {
    /// Dashboard layout, or `-` when there is no instant.
    fn formatted(&self) -> String;
}

impl TimeDisplay for DateTime<Utc> {
    fn formatted(&self) -> String {
        format_timestamp(self)
    }
}

impl TimeDisplay for Option<DateTime<Utc>> {
    fn formatted(&self) -> String {
        self.as_ref()
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string())
    }
}
