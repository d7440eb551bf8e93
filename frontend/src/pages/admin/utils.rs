use crate::api::{AccessLogEntry, ApiError};
use crate::utils::time;
use chrono::{DateTime, TimeZone, Utc};

/// Criteria applied to the fetched access logs. Bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub user_id: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl LogFilter {
    pub fn is_empty(&self) -> bool {
        self.user_id.trim().is_empty() && self.from.is_none() && self.to.is_none()
    }

    pub fn matches(&self, entry: &AccessLogEntry) -> bool {
        let needle = self.user_id.trim().to_lowercase();
        if !needle.is_empty() && !entry.user_id.to_lowercase().contains(&needle) {
            return false;
        }
        if self.from.is_some_and(|from| entry.timestamp < from) {
            return false;
        }
        if self.to.is_some_and(|to| entry.timestamp > to) {
            return false;
        }
        true
    }
}

pub fn filter_logs(logs: &[AccessLogEntry], filter: &LogFilter) -> Vec<AccessLogEntry> {
    logs.iter()
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect()
}

/// Raw values of the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInputs {
    pub user_id: String,
    pub from_date: String,
    pub to_date: String,
}

impl FilterInputs {
    /// Calendar dates cover the whole day in `tz`: `from` starts at local
    /// midnight and `to` ends at the last instant of its day.
    pub fn to_filter<Tz: TimeZone>(&self, tz: &Tz) -> Result<LogFilter, ApiError> {
        let from = time::parse_date_input(&self.from_date).map_err(ApiError::validation)?;
        let to = time::parse_date_input(&self.to_date).map_err(ApiError::validation)?;
        Ok(LogFilter {
            user_id: self.user_id.trim().to_string(),
            from: from.map(|d| time::start_of_day(d, tz)),
            to: to.map(|d| time::end_of_day(d, tz)),
        })
    }
}
