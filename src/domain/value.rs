//! Helpers for dynamically typed frontmatter values
//!
//! Frontmatter has no fixed schema, so every field is a [`serde_json::Value`].
//! These helpers give the rest of the crate one place that decides what a
//! value means: whether it is truthy, how two values order, and whether a
//! value carries a given tag.

use std::cmp::Ordering;

use serde_json::Value;

/// Returns true unless the value reads as "off".
///
/// Falsy: `false`, `null`, zero, `""`, `"false"`, `"0"`, `[]` and `{}`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Rank used when two values have different types
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Array(_) => 3,
        Value::Object(_) => 4,
        Value::Null => 5,
    }
}

/// Total ordering over values.
///
/// Same-typed values compare naturally (numbers numerically, strings
/// lexicographically, lists element-wise, maps by size). Mixed types fall
/// back to a fixed type rank with `null` last.
pub fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (left, right) in x.iter().zip(y.iter()) {
                let ord = compare(left, right);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => x.len().cmp(&y.len()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn compare_numbers(x: &serde_json::Number, y: &serde_json::Number) -> Ordering {
    // Exact integer comparison first so large i64/u64 values don't lose precision
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a.cmp(&b);
    }
    let a = x.as_f64().unwrap_or(f64::NAN);
    let b = y.as_f64().unwrap_or(f64::NAN);
    a.total_cmp(&b)
}

/// Returns true if the value is a list containing `tag`, or is the string `tag`
pub fn contains_tag(value: &Value, tag: &str) -> bool {
    match value {
        Value::Array(items) => items.iter().any(|item| item.as_str() == Some(tag)),
        Value::String(s) => s == tag,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!(["a"])));

        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!("False")));
        assert!(!is_truthy(&json!(" 0 ")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(compare(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare(&json!(2.5), &json!(2)), Ordering::Greater);
        assert_eq!(compare(&json!(-1), &json!(u64::MAX)), Ordering::Less);
        assert_eq!(compare(&json!(3), &json!(3)), Ordering::Equal);
    }

    #[test]
    fn strings_compare_lexicographically() {
        assert_eq!(compare(&json!("2024-01-02"), &json!("2024-01-10")), Ordering::Less);
        assert_eq!(compare(&json!("b"), &json!("a")), Ordering::Greater);
    }

    #[test]
    fn mixed_types_use_rank() {
        assert_eq!(compare(&json!(false), &json!(0)), Ordering::Less);
        assert_eq!(compare(&json!(99), &json!("1")), Ordering::Less);
        assert_eq!(compare(&json!({"a": 1}), &json!(null)), Ordering::Less);
    }

    #[test]
    fn lists_compare_elementwise() {
        assert_eq!(compare(&json!(["a", "b"]), &json!(["a", "c"])), Ordering::Less);
        assert_eq!(compare(&json!(["a"]), &json!(["a", "b"])), Ordering::Less);
    }

    #[test]
    fn tag_matching_is_exact() {
        let tags = json!(["rust", "web dev"]);
        assert!(contains_tag(&tags, "rust"));
        assert!(contains_tag(&tags, "web dev"));
        assert!(!contains_tag(&tags, "Rust"));
        assert!(!contains_tag(&tags, "web"));

        assert!(contains_tag(&json!("solo"), "solo"));
        assert!(!contains_tag(&json!(7), "7"));
    }
}
