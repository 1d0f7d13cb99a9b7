//! Filter and sort types for the record grid
//!
//! Shared data structures for active filters and the single-key sort state.

use serde::Serialize;
use wms_core::{FieldSpec, Value};

use crate::config::RangeBucket;

/// Option value meaning "no filter on this field"
pub const ALL_OPTION: &str = "all";

/// Check whether a filter option clears the filter
pub fn is_all_option(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case(ALL_OPTION)
}

/// An active filter on one field
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPredicate {
    /// Rendered value must equal the given string
    Exact(String),
    /// Numeric reading of the value must fall inside the bucket
    Range(RangeBucket),
    /// Value must equal the given flag
    Bool(bool),
}

impl FilterPredicate {
    /// Option value the predicate was created from
    pub fn option(&self) -> String {
        match self {
            Self::Exact(value) => value.clone(),
            Self::Range(bucket) => bucket.name.clone(),
            Self::Bool(flag) => flag.to_string(),
        }
    }

    /// Test a record's value for this field
    pub fn matches(&self, field: &FieldSpec, value: Option<&Value>) -> bool {
        match self {
            Self::Exact(expected) => {
                value.map(|v| v.to_string()).unwrap_or_default() == *expected
            }
            Self::Range(bucket) => bucket.contains(field.kind.numeric_value(value)),
            Self::Bool(expected) => {
                let actual = match value {
                    Some(Value::Bool(b)) => Some(*b),
                    Some(Value::Text(s)) if s.eq_ignore_ascii_case("true") => Some(true),
                    Some(Value::Text(s)) if s.eq_ignore_ascii_case("false") => Some(false),
                    _ => None,
                };
                actual == Some(*expected)
            }
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Current sort of the grid
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SortState {
    /// Baseline order
    #[default]
    Unsorted,
    /// Sorted by one field
    Sorted {
        key: String,
        direction: SortDirection,
    },
}

impl SortState {
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Unsorted => None,
            Self::Sorted { key, .. } => Some(key),
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            Self::Unsorted => None,
            Self::Sorted { direction, .. } => Some(*direction),
        }
    }

    pub fn is_sorted(&self) -> bool {
        matches!(self, Self::Sorted { .. })
    }

    /// State after a sort request on `field`: the same key flips direction,
    /// any other key starts ascending.
    pub fn requested(&self, field: &str) -> Self {
        let direction = match self {
            Self::Sorted { key, direction } if key == field => direction.toggle(),
            _ => SortDirection::Ascending,
        };
        Self::Sorted {
            key: field.to_string(),
            direction,
        }
    }
}
