use chrono::NaiveDateTime;
use serde::ser::{Serialize, Serializer};

/// Timestamp wire format used in response bodies.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A single database value in a report row.
///
/// The report's SELECT list only produces text, integer, boolean, float,
/// timestamp, and NULL values; anything else is read back as text.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
}

impl RowValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let RowValue::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if let RowValue::Bool(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let RowValue::Timestamp(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }
}

impl Serialize for RowValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RowValue::Int(i) => serializer.serialize_i64(*i),
            RowValue::Float(f) => serializer.serialize_f64(*f),
            RowValue::Text(s) => serializer.serialize_str(s),
            RowValue::Bool(b) => serializer.serialize_bool(*b),
            RowValue::Timestamp(dt) => serializer.collect_str(&dt.format(TIMESTAMP_FORMAT)),
            RowValue::Null => serializer.serialize_unit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_serialize_without_trailing_zero_fraction() {
        let dt = NaiveDateTime::parse_from_str("2023-01-01 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let json = serde_json::to_value(RowValue::Timestamp(dt)).unwrap();
        assert_eq!(json, serde_json::json!("2023-01-01T08:00:00"));
    }

    #[test]
    fn null_serializes_as_json_null() {
        let json = serde_json::to_value(RowValue::Null).unwrap();
        assert!(json.is_null());
    }
}
