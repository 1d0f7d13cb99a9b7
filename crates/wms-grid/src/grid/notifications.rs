use std::time::Instant;

use super::*;
use crate::notification::NotificationKind;

impl<R: GridRecord> RecordGrid<R> {
    /// Show an error message in the notification slot
    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.show_notification(message.into(), NotificationKind::Error);
    }

    pub(super) fn notify_success(&mut self, message: String) {
        self.show_notification(message, NotificationKind::Success);
    }

    /// Clear the notification once its lifetime has passed
    pub fn tick(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|notification| notification.is_expired(now))
        {
            tracing::debug!("Notification expired");
            self.notification = None;
        }
    }

    /// `tick` against the grid's own clock
    pub fn tick_now(&mut self) {
        let now = self.clock.now();
        self.tick(now);
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    // A newer message replaces the old one and its expiry.
    fn show_notification(&mut self, message: String, kind: NotificationKind) {
        let now = self.clock.now();
        self.notification = Some(Notification::new(
            message,
            kind,
            now,
            self.notification_ttl,
        ));
    }
}
