use std::cmp::Ordering;

use serde_json::Number;

/// Formats a JSON number for reports: integers verbatim, floats in their
/// shortest round-tripping form (`1.1`, `0.9`, `1e20`).
pub fn format_number(number: &Number) -> String {
    if let Some(value) = number.as_i64() {
        let mut buffer = itoa::Buffer::new();
        return buffer.format(value).to_string();
    }
    if let Some(value) = number.as_u64() {
        let mut buffer = itoa::Buffer::new();
        return buffer.format(value).to_string();
    }
    match number.as_f64() {
        Some(value) if value.is_finite() => {
            let mut buffer = ryu::Buffer::new();
            buffer.format_finite(value).to_string()
        }
        _ => number.to_string(),
    }
}

/// Orders numbers by magnitude regardless of integer/float representation.
pub fn compare_numbers(left: &Number, right: &Number) -> Ordering {
    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        return l.cmp(&r);
    }
    if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
        return l.cmp(&r);
    }
    let l = left.as_f64().unwrap_or(f64::NAN);
    let r = right.as_f64().unwrap_or(f64::NAN);
    l.partial_cmp(&r).unwrap_or(Ordering::Equal)
}
