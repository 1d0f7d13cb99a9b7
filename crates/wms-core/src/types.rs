//! Core value and record types for the grid

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{FieldKind, FieldSpec, GridError, Result, format_timestamp};

/// A single cell value of a record
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing value
    #[default]
    Null,
    /// Boolean flag
    Bool(bool),
    /// Plain number
    Number(f64),
    /// Free text
    Text(String),
    /// Currency amount as displayed, e.g. `"$250.00"`
    Currency(String),
    /// Date or timestamp as displayed, e.g. `"2025-04-01 08:30:00"`
    Date(String),
}

impl Value {
    /// Create a currency value from its display string
    pub fn currency(raw: impl Into<String>) -> Self {
        Value::Currency(raw.into())
    }

    /// Create a date value from its display string
    pub fn date(raw: impl Into<String>) -> Self {
        Value::Date(raw.into())
    }

    /// Check if the value is missing
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get the underlying string for text-like values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Currency(s) | Value::Date(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerce a JSON value into a grid value according to the field kind.
    ///
    /// Coercion never fails: anything that does not fit the kind is kept as
    /// text so it still renders and searches the way it was written.
    pub fn from_json(json: &serde_json::Value, kind: FieldKind) -> Self {
        use serde_json::Value as Json;

        match (kind, json) {
            (_, Json::Null) => Value::Null,

            (FieldKind::Numeric, Json::Number(n)) => {
                n.as_f64().map(Value::Number).unwrap_or(Value::Null)
            }
            (FieldKind::Numeric, Json::String(s)) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Value::Number(n),
                _ => Value::Text(s.clone()),
            },

            (FieldKind::Currency, Json::String(s)) => Value::Currency(s.clone()),
            (FieldKind::Currency, Json::Number(n)) => Value::Currency(n.to_string()),

            (FieldKind::Date, Json::String(s)) => Value::Date(s.clone()),
            (FieldKind::Date, Json::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .and_then(format_timestamp)
                .map(Value::Date)
                .unwrap_or_else(|| Value::Text(n.to_string())),

            (FieldKind::Boolean, Json::Bool(b)) => Value::Bool(*b),
            (FieldKind::Boolean, Json::String(s)) if s.eq_ignore_ascii_case("true") => {
                Value::Bool(true)
            }
            (FieldKind::Boolean, Json::String(s)) if s.eq_ignore_ascii_case("false") => {
                Value::Bool(false)
            }

            (_, Json::String(s)) => Value::Text(s.clone()),
            (_, Json::Bool(b)) => Value::Bool(*b),
            (FieldKind::Text, Json::Number(n)) => Value::Text(n.to_string()),
            (_, Json::Number(n)) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            (_, other) => Value::Text(other.to_string()),
        }
    }

    /// Convert back into a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    serde_json::Value::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
            Value::Text(s) | Value::Currency(s) | Value::Date(s) => {
                serde_json::Value::String(s.clone())
            }
        }
    }
}

/// Rendering used by search and categorical filters
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Number(v) => write!(f, "{}", v),
            Value::Text(v) | Value::Currency(v) | Value::Date(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// Anything the grid can display as a row.
///
/// The grid only needs to look values up by field name; how a record stores
/// them is up to the implementor.
pub trait GridRecord: Clone + fmt::Debug {
    /// Look up the value of a field, `None` if the record has no such field
    fn value(&self, field: &str) -> Option<Cow<'_, Value>>;

    /// Rendered value of a field, empty when missing
    fn rendered(&self, field: &str) -> String {
        self.value(field).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Rendered values a search term is matched against.
    ///
    /// Defaults to the given fields; records that carry extra fields should
    /// return every value they hold.
    fn search_values(&self, fields: &[FieldSpec]) -> Vec<String> {
        fields.iter().map(|field| self.rendered(&field.name)).collect()
    }
}

/// A row of domain data: an ordered mapping from field name to value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    values: IndexMap<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field, keeping its position if it already exists
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(field.into(), value.into());
    }

    /// Get a value by field name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Field names in insertion order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate over `(field, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a record from a JSON object, coercing each configured field by
    /// its kind. Fields present in the object but not configured are kept
    /// and coerced as text.
    pub fn from_json_object(json: &serde_json::Value, fields: &[FieldSpec]) -> Result<Self> {
        let object = json
            .as_object()
            .ok_or_else(|| GridError::InvalidRecord(format!("expected an object, got {}", json)))?;

        let mut record = Record::new();
        for field in fields {
            let value = object
                .get(&field.name)
                .map(|v| Value::from_json(v, field.kind))
                .unwrap_or(Value::Null);
            record.set(field.name.clone(), value);
        }
        for (name, value) in object {
            if !record.values.contains_key(name) {
                record.set(name.clone(), Value::from_json(value, FieldKind::Text));
            }
        }
        Ok(record)
    }
}

impl GridRecord for Record {
    fn value(&self, field: &str) -> Option<Cow<'_, Value>> {
        self.values.get(field).map(Cow::Borrowed)
    }

    fn search_values(&self, _fields: &[FieldSpec]) -> Vec<String> {
        self.values.values().map(|v| v.to_string()).collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (k, v) in &self.values {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Parse a JSON array of objects into records
pub fn load_records(json: &str, fields: &[FieldSpec]) -> Result<Vec<Record>> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    let items = parsed
        .as_array()
        .ok_or_else(|| GridError::InvalidRecord("expected a JSON array of records".into()))?;
    items
        .iter()
        .map(|item| Record::from_json_object(item, fields))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_value_rendering() {
        assert_eq!(Value::Number(15.0).to_string(), "15");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::currency("$250.00").to_string(), "$250.00");
    }

    #[test]
    fn test_value_from_json_by_kind() {
        assert_eq!(
            Value::from_json(&json!(12), FieldKind::Numeric),
            Value::Number(12.0)
        );
        assert_eq!(
            Value::from_json(&json!("7"), FieldKind::Numeric),
            Value::Number(7.0)
        );
        assert_eq!(
            Value::from_json(&json!("seven"), FieldKind::Numeric),
            Value::Text("seven".into())
        );
        assert_eq!(
            Value::from_json(&json!("$1.00"), FieldKind::Currency),
            Value::currency("$1.00")
        );
        assert_eq!(
            Value::from_json(&json!("TRUE"), FieldKind::Boolean),
            Value::Bool(true)
        );
        assert_eq!(
            Value::from_json(&json!(3), FieldKind::Text),
            Value::Text("3".into())
        );
        assert_eq!(Value::from_json(&json!(null), FieldKind::Date), Value::Null);
    }

    #[test]
    fn test_numeric_date_reads_as_epoch_millis() {
        let value = Value::from_json(&json!(1_712_000_000_000i64), FieldKind::Date);
        assert_eq!(value, Value::date("2024-04-01T19:33:20.000Z"));
        assert_eq!(
            FieldKind::Date.numeric_value(Some(&value)),
            1_712_000_000_000.0
        );

        let earlier = Value::from_json(&json!(0), FieldKind::Date);
        assert_eq!(
            FieldKind::Date.compare(Some(&earlier), Some(&value)),
            std::cmp::Ordering::Less
        );
    }

    #[test]
    fn test_record_from_json_object() {
        let fields = vec![
            FieldSpec::text("item"),
            FieldSpec::numeric("quantity"),
            FieldSpec::date("started"),
        ];
        let record = Record::from_json_object(
            &json!({"item": "Bleach", "quantity": 1, "extra": true}),
            &fields,
        )
        .expect("valid record");

        assert_eq!(record.get("item"), Some(&Value::Text("Bleach".into())));
        assert_eq!(record.get("quantity"), Some(&Value::Number(1.0)));
        assert_eq!(record.get("started"), Some(&Value::Null));
        assert_eq!(record.get("extra"), Some(&Value::Bool(true)));
        assert_eq!(
            record.fields().collect::<Vec<_>>(),
            vec!["item", "quantity", "started", "extra"]
        );
    }

    #[test]
    fn test_record_from_non_object_is_rejected() {
        let err = Record::from_json_object(&json!([1, 2]), &[]).unwrap_err();
        assert!(matches!(err, GridError::InvalidRecord(_)));
    }

    #[test]
    fn test_load_records_round_trips_through_json() {
        let fields = vec![FieldSpec::text("invoice"), FieldSpec::currency("totalAmount")];
        let records = load_records(
            r#"[{"invoice": "INV001", "totalAmount": "$250.00"}]"#,
            &fields,
        )
        .expect("valid json");

        assert_eq!(records.len(), 1);
        let out = serde_json::to_value(&records[0]).expect("serializable");
        assert_eq!(out, json!({"invoice": "INV001", "totalAmount": "$250.00"}));
    }

    #[test]
    fn test_load_records_rejects_non_array() {
        assert!(load_records(r#"{"invoice": "INV001"}"#, &[]).is_err());
        assert!(matches!(
            load_records("not json", &[]),
            Err(GridError::Json(_))
        ));
    }

    #[test]
    fn test_grid_record_rendered() {
        let record = Record::new().with("quantity", 15).with("item", "Screw Set");
        assert_eq!(record.rendered("quantity"), "15");
        assert_eq!(record.rendered("item"), "Screw Set");
        assert_eq!(record.rendered("missing"), "");
    }

    #[test]
    fn test_record_search_values_cover_every_field() {
        let fields = vec![FieldSpec::text("sku")];
        let record = Record::from_json_object(
            &json!({"sku": "A-1", "note": "urgent", "qty": 4}),
            &fields,
        )
        .expect("valid record");
        assert_eq!(record.search_values(&fields), vec!["A-1", "urgent", "4"]);
    }
}
