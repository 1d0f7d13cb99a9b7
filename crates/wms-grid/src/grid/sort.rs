use super::*;
use crate::filter_types::SortDirection;

impl<R: GridRecord> RecordGrid<R> {
    /// Sort by `field`, or go back to baseline order with `None`.
    ///
    /// Requesting the active key again flips the direction; any other key
    /// starts ascending.
    pub fn request_sort(&mut self, field: Option<&str>) {
        let Some(field) = field else {
            self.sort = SortState::Unsorted;
            tracing::debug!("Sort cleared");
            return;
        };

        if self.config.field(field).is_none() {
            tracing::warn!("Ignoring sort on unknown field '{}'", field);
            return;
        }

        self.sort = self.sort.requested(field);
        tracing::debug!("Sort set to {:?}", self.sort);
    }

    /// Sort by `field` in an explicit direction
    pub fn set_sort(&mut self, field: &str, direction: SortDirection) {
        if self.config.field(field).is_none() {
            tracing::warn!("Ignoring sort on unknown field '{}'", field);
            return;
        }
        self.sort = SortState::Sorted {
            key: field.to_string(),
            direction,
        };
    }

    /// Stable sort of baseline indices by the active sort key
    pub(super) fn sort_indices(&self, indices: &mut Vec<usize>) {
        let SortState::Sorted { key, direction } = &self.sort else {
            return;
        };
        let Some(field) = self.config.field(key) else {
            return;
        };

        let mut keyed: Vec<_> = indices
            .iter()
            .map(|ix| {
                let value = self.records[*ix].value(&field.name);
                (*ix, field.kind.sort_key(value.as_deref()))
            })
            .collect();

        keyed.sort_by(|(_, a), (_, b)| {
            let ordering = a.compare(b);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        *indices = keyed.into_iter().map(|(ix, _)| ix).collect();
    }
}
