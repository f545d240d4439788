/// Format a stored ISO date for display the way the office reads dates:
/// DD.MM.YYYY. Anything that is not an ISO date passes through unchanged.
pub fn display_date(iso: &str) -> String {
    match chrono::NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Display form of an optional date: empty when absent.
pub fn display_date_opt(iso: Option<&str>) -> String {
    iso.map(display_date).unwrap_or_default()
}
