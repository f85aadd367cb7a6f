//! CSV encoding for audit rows
//!
//! Turns an `AuditRecord` into header and data rows. Quoting follows the
//! usual rules: a field is quoted only when it holds a comma, a quote or a
//! line break, and embedded quotes are doubled.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::Value;

use crate::audit::AuditRecord;
use crate::error::{AuditSinkError, AuditSinkResult};

/// Derive a header cell from a field name (`old_values` -> `Old Values`)
///
/// Only an ASCII first letter of each word is upper-cased; the rest is kept
/// as-is.
pub fn header_title(key: &str) -> String {
    let mut title = String::with_capacity(key.len());
    let mut word_start = true;

    for c in key.replace('_', " ").chars() {
        title.push(if word_start { c.to_ascii_uppercase() } else { c });
        word_start = c.is_whitespace();
    }

    title
}

/// Header cells for a record, in column order
pub fn header_row(record: &AuditRecord) -> Vec<String> {
    record.keys().map(header_title).collect()
}

/// Data cells for a record, in column order
///
/// Strings are written verbatim, `true` becomes `1`, `false` and `null`
/// become empty cells, and anything else is written as compact JSON.
pub fn data_row(record: &AuditRecord) -> Vec<String> {
    record.values().map(cell_text).collect()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Encode the header row for `record`, terminated by `\n`
pub fn encode_header(record: &AuditRecord) -> AuditSinkResult<Vec<u8>> {
    encode_line(&header_row(record))
}

/// Encode the data row for `record`, terminated by `\n`
pub fn encode_row(record: &AuditRecord) -> AuditSinkResult<Vec<u8>> {
    encode_line(&data_row(record))
}

fn encode_line(cells: &[String]) -> AuditSinkResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .double_quote(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(cells)?;

    writer
        .into_inner()
        .map_err(|e| AuditSinkError::Io(format!("Failed to encode audit row: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditChange, AuditRecord};
    use chrono::NaiveDate;
    use serde_json::json;

    fn record_with(change: &AuditChange) -> AuditRecord {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        AuditRecord::from_auditable(change, now).sanitized()
    }

    fn person_record() -> AuditRecord {
        let old = json!({"name": "John", "age": 31});
        let new = json!({"name": "John", "age": 32});
        record_with(&AuditChange::new(
            old.as_object().unwrap().clone(),
            new.as_object().unwrap().clone(),
        ))
    }

    #[test]
    fn test_header_title() {
        assert_eq!(header_title("old_values"), "Old Values");
        assert_eq!(header_title("new_values"), "New Values");
        assert_eq!(header_title("created_at"), "Created At");
        assert_eq!(header_title("ip"), "Ip");
        assert_eq!(header_title("user_ID"), "User ID");
        assert_eq!(header_title("ßtraße_ok"), "ßtraße Ok");
        assert_eq!(header_title("émis_le"), "émis Le");
    }

    #[test]
    fn test_encode_header() {
        let header = encode_header(&person_record()).unwrap();
        assert_eq!(
            String::from_utf8(header).unwrap(),
            "Old Values,New Values,Created At\n"
        );
    }

    #[test]
    fn test_encode_row_quotes_json_cells() {
        let row = encode_row(&person_record()).unwrap();
        assert_eq!(
            String::from_utf8(row).unwrap(),
            "\"{\"\"name\"\":\"\"John\"\",\"\"age\"\":31}\",\
             \"{\"\"name\"\":\"\"John\"\",\"\"age\"\":32}\",\
             2024-01-01 12:00:00\n"
        );
    }

    #[test]
    fn test_boolean_cells() {
        let change = AuditChange::default()
            .with_field("active", true)
            .with_field("deleted", false);
        let cells = data_row(&record_with(&change));

        assert_eq!(cells[2], "1");
        assert_eq!(cells[3], "");
    }

    #[test]
    fn test_extra_cells() {
        let change = AuditChange::default()
            .with_field("note", "line one\nline two")
            .with_field("user_id", 42)
            .with_field("reason", Value::Null);
        let cells = data_row(&record_with(&change));

        assert_eq!(cells[0], "{}");
        assert_eq!(cells[2], "line one\nline two");
        assert_eq!(cells[3], "42");
        assert_eq!(cells[4], "");

        let encoded = String::from_utf8(encode_row(&record_with(&change)).unwrap()).unwrap();
        assert!(encoded.contains("\"line one\nline two\""));
    }
}
