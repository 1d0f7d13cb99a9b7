//! Grid events
//!
//! Events emitted by the grid when its records change, so the owner can
//! persist edits and deletions. The grid only queues them; callers collect
//! them with `RecordGrid::drain_events`.

/// Events emitted by a record grid
#[derive(Clone, Debug, PartialEq)]
pub enum GridEvent<R> {
    /// A pending edit was committed
    RecordUpdated {
        /// Key of the record before the edit
        key: String,
        /// Record as stored after the edit
        record: R,
    },

    /// A single record was deleted after confirmation
    RecordDeleted { key: String, record: R },

    /// Several selected records were deleted after confirmation
    ///
    /// Keys are listed in selection order. Keys that no longer matched a
    /// record at confirmation time are left out.
    RecordsDeleted { keys: Vec<String> },
}

impl<R> GridEvent<R> {
    /// Keys of the records the event is about
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::RecordUpdated { key, .. } | Self::RecordDeleted { key, .. } => vec![key],
            Self::RecordsDeleted { keys } => keys.iter().map(String::as_str).collect(),
        }
    }
}
