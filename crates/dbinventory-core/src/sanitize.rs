//! Group-name sanitizing
//!
//! Ansible group names may only contain `[A-Za-z0-9_.-]`. Everything a provider
//! hands back is pushed through [`to_safe`] before it is used as a group key or
//! stored in the snapshot.

use crate::model::{RawRecord, Record};
use serde_json::Value;

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Replace every character outside `[A-Za-z0-9_.-]` with `_`
pub fn to_safe(word: &str) -> String {
    word.chars()
        .map(|c| if is_safe_char(c) { c } else { '_' })
        .collect()
}

/// Whether `word` is already a group-safe token
pub fn is_safe(word: &str) -> bool {
    word.chars().all(is_safe_char)
}

/// Sanitize a scalar; `null` has no token
pub fn sanitize_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(to_safe(s)),
        other => Some(to_safe(&other.to_string())),
    }
}

/// Sanitize keys and values of a flat record, dropping null values
pub fn sanitize_record(record: &RawRecord) -> Record {
    record
        .iter()
        .filter_map(|(k, v)| sanitize_value(v).map(|v| (to_safe(k), v)))
        .collect()
}

pub fn sanitize_records(records: &[RawRecord]) -> Vec<Record> {
    records.iter().map(sanitize_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_safe_replaces_punctuation() {
        assert_eq!(to_safe("New York 1"), "New_York_1");
        assert_eq!(to_safe("ubuntu-14.04 x64"), "ubuntu-14.04_x64");
        assert_eq!(to_safe("a/b:c@d"), "a_b_c_d");
        assert_eq!(to_safe(""), "");
    }

    #[test]
    fn test_to_safe_is_idempotent() {
        for word in ["New York 1", "ünïcödé", "10.0.0.5", "web-1_a.b", "$(rm -rf)"] {
            let once = to_safe(word);
            assert_eq!(to_safe(&once), once);
            assert!(is_safe(&once), "{once} should be safe");
        }
    }

    #[test]
    fn test_multibyte_chars_become_single_underscore() {
        assert_eq!(to_safe("東京"), "__");
    }

    #[test]
    fn test_sanitize_value_coerces_scalars() {
        assert_eq!(sanitize_value(&json!(42)), Some("42".to_string()));
        assert_eq!(sanitize_value(&json!(true)), Some("true".to_string()));
        assert_eq!(sanitize_value(&json!("a b")), Some("a_b".to_string()));
        assert_eq!(sanitize_value(&Value::Null), None);
    }

    #[test]
    fn test_sanitize_record_drops_nulls() {
        let raw = json!({
            "id": 5,
            "name": "web 1",
            "backup ids": null,
            "ip_address": "10.0.0.5"
        });
        let record = sanitize_record(raw.as_object().unwrap());

        assert_eq!(record.len(), 3);
        assert_eq!(record["id"], "5");
        assert_eq!(record["name"], "web_1");
        assert_eq!(record["ip_address"], "10.0.0.5");
        assert!(!record.contains_key("backup_ids"));
    }

    #[test]
    fn test_sanitize_records_is_elementwise() {
        let raw = vec![
            json!({"id": 1}).as_object().unwrap().clone(),
            json!({"id": 2, "slug": "nyc 2"}).as_object().unwrap().clone(),
        ];
        let records = sanitize_records(&raw);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["slug"], "nyc_2");
    }
}
