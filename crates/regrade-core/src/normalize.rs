//! Answer text canonicalization.
//!
//! `normalize` defines the equality relation used by the evaluator: two
//! answers are the same iff their normalized forms are identical.

use serde_json::Value;

/// Canonicalize a raw answer value for comparison.
///
/// Null and absent values become the empty string, any other value is
/// stringified, then trimmed, runs of whitespace collapsed to a single
/// space, and lowercased. Total; never fails.
pub fn normalize(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => normalize_str(s),
        other => normalize_str(&other.to_string()),
    }
}

/// Canonicalize an already-string value.
pub fn normalize_str(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Canonicalize an optional stored field; absence maps to the empty string.
pub fn normalize_opt(s: Option<&str>) -> String {
    s.map(normalize_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_is_empty() {
        assert_eq!(normalize(&Value::Null), "");
    }

    #[test]
    fn trims_and_collapses_whitespace() {
        assert_eq!(normalize_str("  Sahih   al-Bukhari \t"), "sahih al-bukhari");
        assert_eq!(normalize_str("a\n\nb"), "a b");
    }

    #[test]
    fn lowercases() {
        assert_eq!(normalize(&json!("YES")), "yes");
    }

    #[test]
    fn stringifies_non_strings() {
        assert_eq!(normalize(&json!(42)), "42");
        assert_eq!(normalize(&json!(true)), "true");
    }

    #[test]
    fn equal_normalized_forms_are_identical() {
        let a = normalize(&json!(" Imam  MALIK "));
        let b = normalize(&json!("imam malik"));
        assert_eq!(a, b);
    }

    #[test]
    fn absent_field_is_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some(" X ")), "x");
    }
}
