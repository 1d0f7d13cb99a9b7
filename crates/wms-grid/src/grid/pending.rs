use super::*;

impl<R: GridRecord> RecordGrid<R> {
    pub fn has_pending_action(&self) -> bool {
        !self.pending.is_idle()
    }

    /// Start editing the record with `key`, replacing any pending action
    pub fn request_edit(&mut self, key: &str) {
        let Some(record) = self.record(key).cloned() else {
            tracing::debug!("Ignoring edit of unknown key '{}'", key);
            return;
        };
        self.pending = PendingAction::Editing(record);
        tracing::debug!("Editing record '{}'", key);
    }

    /// Replace the baseline record that has the same key as `updated`.
    ///
    /// The new values are taken as given. When no record has that key the
    /// grid is left untouched.
    pub fn commit_edit(&mut self, updated: R) {
        let key = self.config.key_of(&updated);
        let Some(ix) = self.position(&key) else {
            tracing::warn!("Dropped edit for '{}': record no longer exists", key);
            return;
        };

        let label = self.config.label_of(&updated);
        self.records[ix] = updated.clone();
        if matches!(self.pending, PendingAction::Editing(_)) {
            self.pending = PendingAction::Idle;
        }
        self.events.push(GridEvent::RecordUpdated {
            key: key.clone(),
            record: updated,
        });
        self.notify_success(format!("{} updated successfully!", label));
        tracing::info!("Committed edit of record '{}'", key);
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.pending, PendingAction::Editing(_)) {
            self.pending = PendingAction::Idle;
            tracing::debug!("Edit cancelled");
        }
    }

    /// Ask for confirmation before deleting the record with `key`
    pub fn request_delete(&mut self, key: &str) {
        let Some(record) = self.record(key).cloned() else {
            tracing::debug!("Ignoring delete of unknown key '{}'", key);
            return;
        };
        self.pending = PendingAction::ConfirmingDelete(record);
        tracing::debug!("Delete of '{}' awaiting confirmation", key);
    }

    /// Ask for confirmation before deleting every selected record
    pub fn request_delete_selected(&mut self) {
        if self.selection.is_empty() {
            tracing::debug!("Nothing selected to delete");
            return;
        }
        let keys: Vec<String> = self.selection.iter().cloned().collect();
        tracing::debug!("Delete of {} selected records awaiting confirmation", keys.len());
        self.pending = PendingAction::ConfirmingBulkDelete(keys);
    }

    /// Carry out the pending delete. Does nothing unless a delete is pending.
    pub fn confirm_delete(&mut self) {
        match std::mem::replace(&mut self.pending, PendingAction::Idle) {
            PendingAction::ConfirmingDelete(record) => {
                let key = self.config.key_of(&record);
                let label = self.config.label_of(&record);
                let Some(removed) = self.remove_record(&key) else {
                    tracing::debug!("Record '{}' vanished before delete was confirmed", key);
                    return;
                };
                self.events.push(GridEvent::RecordDeleted {
                    key: key.clone(),
                    record: removed,
                });
                self.notify_success(format!("{} deleted successfully!", label));
                tracing::info!("Deleted record '{}'", key);
            }
            PendingAction::ConfirmingBulkDelete(keys) => {
                let mut deleted = Vec::with_capacity(keys.len());
                let mut last_label = String::new();
                for key in keys {
                    if let Some(record) = self.remove_record(&key) {
                        last_label = self.config.label_of(&record);
                        deleted.push(key);
                    }
                }
                if deleted.is_empty() {
                    tracing::debug!("Selected records vanished before delete was confirmed");
                    return;
                }

                let message = if deleted.len() == 1 {
                    format!("{} deleted successfully!", last_label)
                } else {
                    format!("{} records deleted successfully!", deleted.len())
                };
                tracing::info!("Deleted {} selected records", deleted.len());
                self.events.push(GridEvent::RecordsDeleted { keys: deleted });
                self.notify_success(message);
            }
            other => {
                self.pending = other;
                tracing::debug!("No delete pending to confirm");
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        if self.pending.is_confirming_delete() {
            self.pending = PendingAction::Idle;
            tracing::debug!("Delete cancelled");
        }
    }
}
