use super::*;

impl<R: GridRecord> RecordGrid<R> {
    /// Current stepper value for `key`, `None` for unknown keys
    pub fn quantity(&self, key: &str) -> Option<u32> {
        self.quantities.get(key).copied()
    }

    pub fn increment_quantity(&mut self, key: &str) {
        self.update_quantity(key, |n| n.saturating_add(1));
    }

    /// Step down, never below zero
    pub fn decrement_quantity(&mut self, key: &str) {
        self.update_quantity(key, |n| n.saturating_sub(1));
    }

    pub fn set_quantity(&mut self, key: &str, quantity: u32) {
        self.update_quantity(key, |_| quantity);
    }

    fn update_quantity(&mut self, key: &str, f: impl FnOnce(u32) -> u32) {
        match self.quantities.get_mut(key) {
            Some(quantity) => *quantity = f(*quantity),
            None => tracing::debug!("Ignoring quantity change for unknown key '{}'", key),
        }
    }
}
