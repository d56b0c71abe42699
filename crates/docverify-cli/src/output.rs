//! Output formatting utilities.

use docverify_canonical::{render_canonical, FieldType, RenderError, ResolvedField};
use serde_json::Value;

/// Formats a report as canonical JSON so equal results print identically.
pub fn format_json(report: &Value) -> Result<String, RenderError> {
    render_canonical(report)
}

/// Formats a resolved field as a table row.
pub fn format_field_row(field: &ResolvedField) -> String {
    let value = match (field.field_type, field.value.is_empty()) {
        (_, true) => "-".to_string(),
        (FieldType::Status, false) => match field.is_valid {
            Some(true) => format!("{} [ok]", field.value),
            Some(false) => format!("{} [!]", field.value),
            None => field.value.clone(),
        },
        _ => field.value.clone(),
    };
    format!("{:<28} {}", truncate(&field.label, 28), value)
}

/// Formats the overall validity line.
pub fn format_validity(is_valid: Option<bool>) -> String {
    match is_valid {
        Some(true) => "VALID".to_string(),
        Some(false) => "INVALID".to_string(),
        None => "VALIDITY UNKNOWN".to_string(),
    }
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!("{:<28} {}", "FIELD", "VALUE");
    println!("{}", "-".repeat(60));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(field_type: FieldType, value: &str, is_valid: Option<bool>) -> ResolvedField {
        ResolvedField {
            label: "Status:".into(),
            key: Some("status".into()),
            field_type,
            value: value.into(),
            is_valid,
        }
    }

    #[test]
    fn status_rows_flag_validity() {
        assert!(format_field_row(&field(FieldType::Status, "Valid", Some(true))).ends_with("Valid [ok]"));
        assert!(format_field_row(&field(FieldType::Status, "Invalid", Some(false))).ends_with("Invalid [!]"));
        assert!(format_field_row(&field(FieldType::Text, "", None)).ends_with(" -"));
    }

    #[test]
    fn long_labels_are_truncated() {
        assert_eq!(truncate("abcdef", 5), "ab...");
        assert_eq!(truncate("abc", 5), "abc");
    }
}
