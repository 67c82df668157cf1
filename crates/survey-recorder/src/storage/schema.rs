//! Row layout of the survey record store.
//!
//! The store is a comma-separated file with a fixed header. Fields that
//! contain a delimiter, quote or line break are quoted with embedded quotes
//! doubled; rows end in `\r\n`.

use crate::survey::SurveyResponse;

/// Column names, in file order.
pub const COLUMNS: [&str; 10] = [
    "timestamp",
    "age",
    "gender",
    "income",
    "utilities",
    "entertainment",
    "school_fees",
    "shopping",
    "healthcare",
    "total_expenses",
];

/// Row terminator.
pub const LINE_TERMINATOR: &str = "\r\n";

/// The header row, terminator included.
#[must_use]
pub fn header_line() -> String {
    encode_line(COLUMNS.iter().copied())
}

/// Encode a response as one complete row, terminator included.
#[must_use]
pub fn encode_record(record: &SurveyResponse) -> String {
    let fields = record.to_fields();
    encode_line(fields.iter().map(String::as_str))
}

fn encode_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut line = fields.map(escape_field).collect::<Vec<_>>().join(",");
    line.push_str(LINE_TERMINATOR);
    line
}

/// Quote a field if it would otherwise break the row.
#[must_use]
pub fn escape_field(value: &str) -> String {
    if !value.contains([',', '"', '\n', '\r']) {
        return value.to_string();
    }
    let escaped = value.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

/// Count the complete rows in `content`, ignoring line breaks inside quotes.
#[must_use]
pub fn count_rows(content: &str) -> usize {
    let mut in_quotes = false;
    let mut rows = 0;
    for ch in content.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '\n' if !in_quotes => rows += 1,
            _ => {}
        }
    }
    rows
}
