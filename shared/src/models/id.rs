//! Identifier Model

use serde::{Deserialize, Serialize};

/// Identifier as rendered by the server
///
/// Page data mixes numeric ids (`10`) with string ids (`"10"`, from form
/// values and JSON object keys). Equality between ids always goes through
/// [`RawId::as_int`]; the raw form is kept so it round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    /// Normalized integer value
    ///
    /// Strings are parsed leniently: surrounding whitespace is ignored and
    /// an optional sign followed by the leading run of ASCII digits is taken
    /// (`" 12px"` -> 12). Strings without leading digits are not ids.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawId::Int(v) => Some(*v),
            RawId::Text(s) => parse_leading_int(s),
        }
    }

    /// Whether both ids normalize to the same integer
    pub fn same_as(&self, other: &RawId) -> bool {
        match (self.as_int(), other.as_int()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for RawId {
    fn from(value: i64) -> Self {
        RawId::Int(value)
    }
}

impl From<i32> for RawId {
    fn from(value: i32) -> Self {
        RawId::Int(i64::from(value))
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        RawId::Text(value.to_string())
    }
}

impl From<String> for RawId {
    fn from(value: String) -> Self {
        RawId::Text(value)
    }
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Int(v) => write!(f, "{}", v),
            RawId::Text(s) => write!(f, "{}", s),
        }
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
