use calamine::Data;
use regex::Regex;

/// Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug).
pub fn excel_serial_to_date(serial: f64) -> String {
    if serial <= 0.0 {
        return String::new();
    }
    let base = chrono::NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    let date = base + chrono::Duration::days(serial as i64);
    date.format("%Y-%m-%d").to_string()
}

/// Canonicalize a spreadsheet date cell to `YYYY-MM-DD`, or `""` when the
/// value cannot be read as a date. Unrecognized input never errors: the
/// importer's required-field validation works off the empty string.
pub fn normalize_date_cell(cell: &Data) -> String {
    match cell {
        Data::Float(f) => excel_serial_to_date(*f),
        Data::Int(i) => excel_serial_to_date(*i as f64),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::String(s) => normalize_date_str(s),
        Data::DateTimeIso(s) => normalize_date_str(s),
        _ => String::new(),
    }
}

/// String shape of the same contract. A dot-separated day-first date
/// (`15.01.2024`, `1.1.2024`) is reordered and zero-padded without range
/// validation; anything else goes through a generic parse attempt.
pub fn normalize_date_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Ok(re) = Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$") {
        if let Some(caps) = re.captures(trimmed) {
            return format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[2], &caps[1]);
        }
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    for fmt in ["%m/%d/%Y", "%Y/%m/%d"] {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, fmt) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    String::new()
}

const AFFIRMATIVE: &[&str] = &["так", "yes", "true", "1", "да"];

/// Yes/no cell: bool passthrough, affirmative-set match for strings,
/// equality to 1 for numbers. Everything else is false, never an error.
pub fn normalize_yes_no_cell(cell: &Data) -> bool {
    match cell {
        Data::Bool(b) => *b,
        Data::String(s) => normalize_yes_no_str(s),
        Data::Float(f) => *f == 1.0,
        Data::Int(i) => *i == 1,
        _ => false,
    }
}

pub fn normalize_yes_no_str(raw: &str) -> bool {
    let lower = raw.trim().to_lowercase();
    AFFIRMATIVE.contains(&lower.as_str())
}

/// Plain-text view of a cell for the non-date, non-flag columns. Numeric
/// cells lose a trailing `.0` so tax ids survive Excel's number typing.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::DateTimeIso(s) => s.trim().to_string(),
        _ => String::new(),
    }
}
