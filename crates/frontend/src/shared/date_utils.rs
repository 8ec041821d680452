/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting across the application
use chrono::{DateTime, NaiveDate, Utc};

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// Format a stored timestamp to DD.MM.YYYY HH:MM (UTC)
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%d.%m.%Y %H:%M").to_string()
}
