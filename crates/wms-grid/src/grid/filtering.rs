use super::*;
use crate::config::FilterKind;
use crate::filter_types::{is_all_option, ALL_OPTION};

impl<R: GridRecord> RecordGrid<R> {
    /// Set the free-text search term. Matching is case-insensitive against
    /// the rendering of every configured field.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.search_lower = term.to_lowercase();
        self.search_term = term;
        self.page = 0;
        tracing::debug!("Search term set to '{}'", self.search_term);
    }

    /// Replace the filter on `field` with the option `value`.
    ///
    /// `"all"` or an empty value removes the filter. Unknown fields and
    /// options that the field's filter does not offer leave the filters
    /// unchanged.
    pub fn set_filter(&mut self, field: &str, value: &str) {
        if self.config.field(field).is_none() {
            tracing::warn!("Ignoring filter on unknown field '{}'", field);
            return;
        }

        if is_all_option(value) {
            if self.filters.shift_remove(field).is_some() {
                self.page = 0;
                tracing::debug!("Cleared filter on '{}'", field);
            }
            return;
        }

        let predicate = match self.config.filter_kind(field) {
            None | Some(FilterKind::Categorical) => FilterPredicate::Exact(value.to_string()),
            Some(FilterKind::Range { buckets }) => {
                match buckets.iter().find(|bucket| bucket.name == value) {
                    Some(bucket) => FilterPredicate::Range(bucket.clone()),
                    None => {
                        tracing::warn!("Unknown range '{}' for field '{}'", value, field);
                        return;
                    }
                }
            }
            Some(FilterKind::Boolean) => {
                if value.eq_ignore_ascii_case("true") {
                    FilterPredicate::Bool(true)
                } else if value.eq_ignore_ascii_case("false") {
                    FilterPredicate::Bool(false)
                } else {
                    tracing::warn!("Unknown boolean option '{}' for field '{}'", value, field);
                    return;
                }
            }
        };

        tracing::debug!("Filter on '{}' set to {:?}", field, predicate);
        self.filters.insert(field.to_string(), predicate);
        self.page = 0;
    }

    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.page = 0;
        }
    }

    /// Records that pass search and filters, in sort order
    pub fn visible_rows(&self) -> Vec<&R> {
        self.visible_indices()
            .into_iter()
            .map(|ix| &self.records[ix])
            .collect()
    }

    /// Keys of the visible rows, in display order
    pub fn visible_keys(&self) -> Vec<String> {
        self.visible_indices()
            .into_iter()
            .map(|ix| self.config.key_of(&self.records[ix]))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| self.record_matches(record))
            .count()
    }

    /// `"all"` followed by the distinct rendered values of `field` over the
    /// whole baseline, in first-seen order. Blank values are not offered.
    pub fn unique_values(&self, field: &str) -> Vec<String> {
        let mut seen = IndexSet::new();
        seen.insert(ALL_OPTION.to_string());
        for record in &self.records {
            let rendered = record.rendered(field);
            if !rendered.is_empty() {
                seen.insert(rendered);
            }
        }
        seen.into_iter().collect()
    }

    /// Options a filter control for `field` should offer, `"all"` first
    pub fn filter_options(&self, field: &str) -> Vec<String> {
        match self.config.filter_kind(field) {
            None | Some(FilterKind::Categorical) => self.unique_values(field),
            Some(FilterKind::Range { buckets }) => std::iter::once(ALL_OPTION.to_string())
                .chain(buckets.iter().map(|bucket| bucket.name.clone()))
                .collect(),
            Some(FilterKind::Boolean) => vec![
                ALL_OPTION.to_string(),
                "true".to_string(),
                "false".to_string(),
            ],
        }
    }

    /// Baseline indices of the visible rows, in display order
    pub(super) fn visible_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.record_matches(record))
            .map(|(ix, _)| ix)
            .collect();
        self.sort_indices(&mut indices);
        indices
    }

    fn record_matches(&self, record: &R) -> bool {
        self.matches_search(record) && self.matches_filters(record)
    }

    fn matches_search(&self, record: &R) -> bool {
        if self.search_lower.is_empty() {
            return true;
        }
        record
            .search_values(&self.config.fields)
            .iter()
            .any(|value| value.to_lowercase().contains(&self.search_lower))
    }

    fn matches_filters(&self, record: &R) -> bool {
        self.filters.iter().all(|(name, predicate)| {
            let Some(field) = self.config.field(name) else {
                return true;
            };
            let value = record.value(name);
            predicate.matches(field, value.as_deref())
        })
    }
}
