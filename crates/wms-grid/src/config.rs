//! Static grid configuration
//!
//! A `GridConfig` describes the fields of one table, which of them identify a
//! row, and which filters the table offers. It does not change for the
//! lifetime of a grid.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use wms_core::{FieldSpec, GridError, GridRecord, Result};

/// Named numeric range offered by a range filter.
///
/// Both bounds are inclusive unless marked exclusive, so adjacent buckets can
/// share a bound without leaving a gap between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBucket {
    /// Option value, e.g. `"1-5"` or `"200to500"`
    pub name: String,
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub min_exclusive: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub max_exclusive: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl RangeBucket {
    /// Bucket with both bounds inclusive
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            min_exclusive: false,
            max_exclusive: false,
        }
    }

    /// Exclude the lower bound
    pub fn above(mut self) -> Self {
        self.min_exclusive = true;
        self
    }

    /// Exclude the upper bound
    pub fn below(mut self) -> Self {
        self.max_exclusive = true;
        self
    }

    /// Check whether a number falls inside the bucket
    pub fn contains(&self, n: f64) -> bool {
        let above_min = if self.min_exclusive { n > self.min } else { n >= self.min };
        let below_max = if self.max_exclusive { n < self.max } else { n <= self.max };
        above_min && below_max
    }
}

/// Kind of filter a field offers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterKind {
    /// Exact match on the rendered value, options taken from the data
    #[default]
    Categorical,
    /// One of a fixed set of numeric buckets
    Range { buckets: Vec<RangeBucket> },
    /// Boolean equality
    Boolean,
}

/// Filter descriptor for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub field: String,
    #[serde(flatten)]
    pub kind: FilterKind,
}

impl FilterConfig {
    pub fn categorical(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: FilterKind::Categorical,
        }
    }

    pub fn range(field: impl Into<String>, buckets: Vec<RangeBucket>) -> Self {
        Self {
            field: field.into(),
            kind: FilterKind::Range { buckets },
        }
    }

    pub fn boolean(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: FilterKind::Boolean,
        }
    }
}

/// Configuration of one record grid
///
/// # Examples
///
/// ```
/// use wms_core::FieldSpec;
/// use wms_grid::GridConfig;
///
/// let config = GridConfig::new(
///     vec![FieldSpec::text("invoice"), FieldSpec::currency("totalAmount")],
///     "invoice",
/// );
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Field descriptors in column order
    pub fields: Vec<FieldSpec>,
    /// Fields whose rendered values, joined with `-`, identify a record
    pub identity: Vec<String>,
    /// Field used to name a record in notifications; defaults to the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_field: Option<String>,
    /// Filters offered by the table
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
}

impl GridConfig {
    /// Create a configuration keyed by a single identity field
    pub fn new(fields: Vec<FieldSpec>, identity: impl Into<String>) -> Self {
        Self {
            fields,
            identity: vec![identity.into()],
            label_field: None,
            filters: Vec::new(),
        }
    }

    /// Key records by several fields joined with `-`
    pub fn with_composite_identity<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identity = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_label_field(mut self, field: impl Into<String>) -> Self {
        self.label_field = Some(field.into());
        self
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filters.push(filter);
        self
    }

    /// Parse a configuration from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Look up a field descriptor by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Filter kind of a field; fields without an explicit entry are categorical
    pub fn filter_kind(&self, field: &str) -> Option<&FilterKind> {
        self.filters
            .iter()
            .find(|f| f.field == field)
            .map(|f| &f.kind)
    }

    /// Check that the configuration is internally consistent
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(GridError::DuplicateField(field.name.clone()));
            }
        }

        if self.identity.is_empty() {
            return Err(GridError::MissingIdentity);
        }
        for name in &self.identity {
            self.require_field(name)?;
        }
        if let Some(label) = &self.label_field {
            self.require_field(label)?;
        }

        let mut filtered = HashSet::new();
        for filter in &self.filters {
            self.require_field(&filter.field)?;
            if !filtered.insert(filter.field.as_str()) {
                return Err(GridError::DuplicateField(filter.field.clone()));
            }
            if let FilterKind::Range { buckets } = &filter.kind {
                let mut names = HashSet::new();
                for bucket in buckets {
                    if !names.insert(bucket.name.as_str()) {
                        return Err(GridError::DuplicateBucket {
                            field: filter.field.clone(),
                            bucket: bucket.name.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn require_field(&self, name: &str) -> Result<()> {
        if self.field(name).is_some() {
            Ok(())
        } else {
            Err(GridError::UnknownField(name.to_string()))
        }
    }

    /// Identity key of a record
    pub fn key_of<R: GridRecord>(&self, record: &R) -> String {
        self.identity
            .iter()
            .map(|field| record.rendered(field))
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Name used for a record in user-facing messages
    pub fn label_of<R: GridRecord>(&self, record: &R) -> String {
        match &self.label_field {
            Some(field) => record.rendered(field),
            None => self.key_of(record),
        }
    }
}
