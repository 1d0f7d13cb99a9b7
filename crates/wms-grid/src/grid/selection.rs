use super::*;

impl<R: GridRecord> RecordGrid<R> {
    /// Add `key` to the selection or remove it. Keys without a baseline
    /// record are ignored.
    pub fn toggle_selection(&mut self, key: &str, selected: bool) {
        if !self.contains_key(key) {
            tracing::debug!("Ignoring selection of unknown key '{}'", key);
            return;
        }
        if selected {
            self.selection.insert(key.to_string());
        } else {
            self.selection.shift_remove(key);
        }
    }

    /// Invert the selection state of `key`
    pub fn flip_selection(&mut self, key: &str) {
        let selected = !self.is_selected(key);
        self.toggle_selection(key, selected);
    }

    /// Add every visible row to the selection
    pub fn select_all_visible(&mut self) {
        for key in self.visible_keys() {
            self.selection.insert(key);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.contains(key)
    }

    /// Selected keys in selection order
    pub fn selection(&self) -> &IndexSet<String> {
        &self.selection
    }

    /// Selected records in selection order
    pub fn selected_records(&self) -> Vec<&R> {
        self.selection
            .iter()
            .filter_map(|key| self.record(key))
            .collect()
    }
}
