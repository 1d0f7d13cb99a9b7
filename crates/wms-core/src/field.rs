//! Field descriptors and per-kind comparison
//!
//! Every field of a grid has a [`FieldKind`] that decides how its values are
//! compared when sorting and how they are read as numbers for range filters.
//! Comparison is total: values that fail to parse fall back to a default
//! sort key instead of producing an error.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::{GridRecord, Value};

/// How a field's values are compared and coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Lexicographic comparison of the rendered string
    #[default]
    Text,
    /// Numeric comparison; unparsable values compare as 0
    Numeric,
    /// Currency string such as `"$250.00"`; malformed values compare as 0
    Currency,
    /// Date string; unparsable values compare as the epoch
    Date,
    /// `false` sorts before `true`
    Boolean,
}

impl FieldKind {
    /// Get the display label for the kind
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Numeric => "Number",
            Self::Currency => "Currency",
            Self::Date => "Date",
            Self::Boolean => "Boolean",
        }
    }

    /// Get all kinds in display order
    pub fn all() -> &'static [FieldKind] {
        &[
            Self::Text,
            Self::Numeric,
            Self::Currency,
            Self::Date,
            Self::Boolean,
        ]
    }

    /// Extract the key this kind sorts by. Missing values get the kind's
    /// default key.
    pub fn sort_key(&self, value: Option<&Value>) -> SortKey {
        match self {
            Self::Text => SortKey::Text(value.map(|v| v.to_string()).unwrap_or_default()),
            Self::Boolean => SortKey::Flag(match value {
                Some(Value::Bool(b)) => *b,
                Some(Value::Text(s)) => s.eq_ignore_ascii_case("true"),
                _ => false,
            }),
            Self::Numeric | Self::Currency | Self::Date => {
                SortKey::Number(self.numeric_value(value))
            }
        }
    }

    /// Read a value as a number the way this kind understands it.
    ///
    /// Used by range filters as well as sorting. Dates read as milliseconds
    /// since the epoch.
    pub fn numeric_value(&self, value: Option<&Value>) -> f64 {
        let Some(value) = value else {
            return 0.0;
        };

        let n = match (self, value) {
            (_, Value::Null) => 0.0,
            (_, Value::Bool(b)) => f64::from(u8::from(*b)),
            (_, Value::Number(n)) => *n,
            (Self::Currency, Value::Text(s) | Value::Currency(s) | Value::Date(s)) => {
                currency_amount(s)
            }
            (Self::Date, Value::Text(s) | Value::Currency(s) | Value::Date(s)) => {
                timestamp_millis(s) as f64
            }
            (_, Value::Text(s) | Value::Currency(s) | Value::Date(s)) => {
                s.trim().parse::<f64>().unwrap_or(0.0)
            }
        };

        if n.is_finite() { n } else { 0.0 }
    }

    /// Compare two values of this kind
    pub fn compare(&self, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        self.sort_key(a).compare(&self.sort_key(b))
    }
}

/// Comparable key extracted from a value
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl SortKey {
    /// Total ordering between keys. Keys of one kind are always the same
    /// variant; mixed variants order as flag < number < text.
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => {
                normalize_zero(*a).total_cmp(&normalize_zero(*b))
            }
            (SortKey::Flag(a), SortKey::Flag(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Flag(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

fn normalize_zero(n: f64) -> f64 {
    if n == 0.0 { 0.0 } else { n }
}

/// Descriptor of one record field
///
/// # Examples
///
/// ```
/// use wms_core::{FieldKind, FieldSpec};
///
/// let field = FieldSpec::currency("totalAmount").with_label("Amount");
/// assert_eq!(field.kind, FieldKind::Currency);
/// assert_eq!(field.label(), "Amount");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as stored in records
    pub name: String,
    /// Column header; defaults to the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Comparison kind
    #[serde(default)]
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Create a new field descriptor
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            kind,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Numeric)
    }

    pub fn currency(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Currency)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Set the column header
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Column header, falling back to the field name
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Compare two records on this field
    pub fn compare_records<R: GridRecord>(&self, a: &R, b: &R) -> Ordering {
        let va = a.value(&self.name);
        let vb = b.value(&self.name);
        self.kind.compare(va.as_deref(), vb.as_deref())
    }
}

/// Parse a currency display string into an amount.
///
/// Leading currency symbols, thousands separators and whitespace are
/// ignored; a minus sign before or after the symbol negates the amount.
/// Returns `None` when no number can be read.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let digits_start = trimmed.find(|c: char| c.is_ascii_digit() || c == '.')?;
    let (prefix, amount) = trimmed.split_at(digits_start);

    let cleaned: String = amount
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    let value = cleaned.parse::<f64>().ok().filter(|v| v.is_finite())?;

    if prefix.contains('-') {
        Some(-value)
    } else {
        Some(value)
    }
}

/// Currency amount used for sorting and range filters; malformed values read as 0
pub fn currency_amount(raw: &str) -> f64 {
    parse_currency(raw).unwrap_or(0.0)
}

/// Parse a date or timestamp string into milliseconds since the Unix epoch.
///
/// Naive timestamps are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let s = raw.trim();

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"));
    if let Ok(dt) = naive {
        return Some(dt.and_utc().timestamp_millis());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Render milliseconds since the epoch as an RFC 3339 UTC timestamp.
///
/// Returns `None` when the instant is outside the range chrono can represent.
pub fn format_timestamp(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Timestamp used for sorting; unparsable dates read as the epoch
pub fn timestamp_millis(raw: &str) -> i64 {
    parse_timestamp(raw).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("$250.00"), Some(250.0));
        assert_eq!(parse_currency("  $1,250.50 "), Some(1250.5));
        assert_eq!(parse_currency("€ 12"), Some(12.0));
        assert_eq!(parse_currency("-$5.00"), Some(-5.0));
        assert_eq!(parse_currency("$-5.00"), Some(-5.0));
        assert_eq!(parse_currency("300"), Some(300.0));
        assert_eq!(parse_currency("$"), None);
        assert_eq!(parse_currency("$12abc"), None);
        assert_eq!(parse_currency(""), None);
    }

    #[test]
    fn test_malformed_currency_reads_as_zero() {
        assert_eq!(currency_amount("n/a"), 0.0);
        assert_eq!(currency_amount("$1.2.3"), 0.0);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let base = parse_timestamp("2025-04-01 08:30:00").expect("space separated");
        assert_eq!(parse_timestamp("2025-04-01T08:30:00"), Some(base));
        assert_eq!(parse_timestamp("2025-04-01T08:30:00Z"), Some(base));
        assert_eq!(parse_timestamp("2025-04-01T10:30:00+02:00"), Some(base));
        assert_eq!(parse_timestamp("2025-04-01 08:30"), Some(base));
        assert_eq!(
            parse_timestamp("2025-04-01"),
            Some(base - (8 * 60 + 30) * 60 * 1000)
        );
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(timestamp_millis("yesterday"), 0);
    }

    #[test]
    fn test_text_compare_is_lexicographic() {
        let kind = FieldKind::Text;
        let a = Value::from("INV010");
        let b = Value::from("INV002");
        assert_eq!(kind.compare(Some(&a), Some(&b)), Ordering::Greater);
        // raw comparison: uppercase before lowercase
        assert_eq!(
            kind.compare(Some(&Value::from("Zinc")), Some(&Value::from("apple"))),
            Ordering::Less
        );
    }

    #[test]
    fn test_numeric_compare() {
        let kind = FieldKind::Numeric;
        assert_eq!(
            kind.compare(Some(&Value::from(2)), Some(&Value::from(10))),
            Ordering::Less
        );
        assert_eq!(
            kind.compare(Some(&Value::from("abc")), Some(&Value::from(0))),
            Ordering::Equal
        );
        assert_eq!(kind.compare(None, Some(&Value::from(-1))), Ordering::Greater);
    }

    #[test]
    fn test_currency_compare() {
        let kind = FieldKind::Currency;
        assert_eq!(
            kind.compare(
                Some(&Value::currency("$850.00")),
                Some(&Value::currency("$1,000.00"))
            ),
            Ordering::Less
        );
        assert_eq!(
            kind.compare(Some(&Value::currency("free")), Some(&Value::currency("$0"))),
            Ordering::Equal
        );
    }

    #[test]
    fn test_date_compare_unparsable_is_epoch() {
        let kind = FieldKind::Date;
        assert_eq!(
            kind.compare(
                Some(&Value::date("2025-04-02 22:00:00")),
                Some(&Value::date("2025-04-01 08:30:00"))
            ),
            Ordering::Greater
        );
        assert_eq!(
            kind.compare(
                Some(&Value::date("garbage")),
                Some(&Value::date("1970-01-01 00:00:00"))
            ),
            Ordering::Equal
        );
    }

    #[test]
    fn test_boolean_compare() {
        let kind = FieldKind::Boolean;
        assert_eq!(
            kind.compare(Some(&Value::Bool(false)), Some(&Value::Bool(true))),
            Ordering::Less
        );
        assert_eq!(kind.compare(None, Some(&Value::Bool(false))), Ordering::Equal);
    }

    #[test]
    fn test_numeric_value_by_kind() {
        assert_eq!(
            FieldKind::Currency.numeric_value(Some(&Value::currency("$200.00"))),
            200.0
        );
        assert_eq!(FieldKind::Numeric.numeric_value(Some(&Value::from("12"))), 12.0);
        assert_eq!(FieldKind::Numeric.numeric_value(Some(&Value::from("NaN"))), 0.0);
        assert_eq!(FieldKind::Numeric.numeric_value(None), 0.0);
    }

    #[test]
    fn test_field_spec_compare_records() {
        let field = FieldSpec::numeric("quantity");
        let a = Record::new().with("quantity", 3);
        let b = Record::new().with("quantity", 15);
        assert_eq!(field.compare_records(&a, &b), Ordering::Less);
        assert_eq!(field.label(), "quantity");
    }

    #[test]
    fn test_field_spec_deserialize_defaults_to_text() {
        let field: FieldSpec = serde_json::from_str(r#"{"name": "item"}"#).expect("valid");
        assert_eq!(field, FieldSpec::text("item"));

        let field: FieldSpec =
            serde_json::from_str(r#"{"name": "ended", "kind": "date", "label": "Ended"}"#)
                .expect("valid");
        assert_eq!(field.kind, FieldKind::Date);
        assert_eq!(field.label(), "Ended");
    }
}
