//! Notifier that forwards notifications to `tracing`.

use tracing::{error, info};

use crate::task::ports::{Notification, NotificationKind, Notifier};

/// Emits each notification as a `tracing` event.
///
/// Successes are logged at `info` and failures at `error`, both under the
/// `taskboard::notification` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!(target: "taskboard::notification", message = %notification.message);
            }
            NotificationKind::Error => {
                error!(target: "taskboard::notification", message = %notification.message);
            }
        }
    }
}
