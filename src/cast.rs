//! Lenient conversion from `toml::Value` to the getter types of
//! [`ConfigSource`](crate::ConfigSource).
//!
//! Values that come from env vars and flags are usually strings, so strings
//! are parsed into the requested type. Anything that cannot be converted
//! yields `None`; the caller decides on the fallback.

use toml::Value;

pub fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        Value::Datetime(d) => Some(d.to_string()),
        Value::Array(_) | Value::Table(_) => None,
    }
}

pub fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(*b),
        Value::Integer(i) => Some(*i != 0),
        Value::String(s) => parse_bool(s.trim()),
        _ => None,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

pub fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Boolean(b) => Some(i64::from(*b)),
        Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

/// Negative values do not convert.
pub fn to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Integer(i) => u64::try_from(*i).ok(),
        Value::Boolean(b) => Some(u64::from(*b)),
        Value::Float(f) if f.is_finite() && *f >= 0.0 => Some(f.trunc() as u64),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            })
        }
        _ => None,
    }
}

/// Arrays convert element-wise; a string splits on whitespace.
pub fn to_string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => items.iter().map(to_string).collect(),
        Value::String(s) => Some(s.split_whitespace().map(str::to_string).collect()),
        other => to_string(other).map(|s| vec![s]),
    }
}

/// Arrays convert element-wise and fail as a whole if any element fails.
pub fn to_int_list(value: &Value) -> Option<Vec<i64>> {
    match value {
        Value::Array(items) => items.iter().map(to_i64).collect(),
        Value::String(s) => s
            .split_whitespace()
            .map(|part| to_i64(&Value::String(part.to_string())))
            .collect(),
        other => to_i64(other).map(|i| vec![i]),
    }
}
