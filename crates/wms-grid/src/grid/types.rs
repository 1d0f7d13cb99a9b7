use serde::Serialize;

use crate::filter_types::SortState;
use crate::notification::Notification;

/// Uncommitted intent awaiting confirmation or cancellation.
///
/// Only one can be pending at a time; starting a new one replaces the old.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingAction<R> {
    Idle,
    /// Snapshot of the record being edited
    Editing(R),
    /// Record waiting for delete confirmation
    ConfirmingDelete(R),
    /// Selected keys waiting for delete confirmation, in selection order
    ConfirmingBulkDelete(Vec<String>),
}

impl<R> PendingAction<R> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Record being edited, if any
    pub fn editing(&self) -> Option<&R> {
        match self {
            Self::Editing(record) => Some(record),
            _ => None,
        }
    }

    /// Record waiting for delete confirmation, if any
    pub fn pending_delete(&self) -> Option<&R> {
        match self {
            Self::ConfirmingDelete(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_confirming_delete(&self) -> bool {
        matches!(
            self,
            Self::ConfirmingDelete(_) | Self::ConfirmingBulkDelete(_)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Editing(_) => "editing",
            Self::ConfirmingDelete(_) => "confirming delete",
            Self::ConfirmingBulkDelete(_) => "confirming bulk delete",
        }
    }
}

/// Position of the current page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Zero-based page index, already clamped to the visible rows
    pub index: usize,
    /// Number of pages, at least 1
    pub count: usize,
    /// Rows per page, `None` when paging is off
    pub size: Option<usize>,
}

/// View model handed to renderers
#[derive(Clone, Debug)]
pub struct GridView<R> {
    /// Rows of the current page
    pub rows: Vec<R>,
    /// Rows left after search and filters
    pub visible_count: usize,
    /// Rows in the baseline
    pub total_count: usize,
    pub page: PageInfo,
    pub search_term: String,
    /// Active filter options by field
    pub filters: Vec<(String, String)>,
    pub sort: SortState,
    /// Selected keys in selection order
    pub selection: Vec<String>,
    pub pending: PendingAction<R>,
    pub notification: Option<Notification>,
}
