use crate::domain::model::{is_timestamp, Member};
use chrono::DateTime;
use serde_json::Value;

/// Coerce a single attribute value into its CSV field text.
///
/// In order: absent/null becomes an empty field, baseline timestamps are
/// reformatted as `YYYY-MM-DD HH:MM:SS`, arrays are joined with `;`, and
/// everything else takes its plain string form. Quoting is left to the CSV
/// writer.
pub fn flatten_value(attribute: &str, value: Option<&Value>) -> String {
    let value = match value {
        None | Some(Value::Null) => return String::new(),
        Some(v) => v,
    };

    if is_timestamp(attribute) {
        if let Value::String(s) = value {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
            }
        }
    }

    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(";"),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Flatten one member into a row aligned 1:1 with the selected attributes.
pub fn flatten_row(member: &Member, selection: &[String]) -> Vec<String> {
    selection
        .iter()
        .map(|attribute| flatten_value(attribute, member.attribute(attribute)))
        .collect()
}
