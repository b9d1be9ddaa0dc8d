use crate::domain::model::{Notification, NotificationId, NotificationKind};
use crate::domain::ports::{NotificationSurface, Timings};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy)]
struct Lifecycle {
    reveal_after: Duration,
    display_for: Duration,
    fade_out: Duration,
}

/// Shows one notification at a time and drives its reveal/hide/remove timers.
pub struct NotificationCenter<N: NotificationSurface + 'static> {
    surface: Arc<N>,
    lifecycle: Lifecycle,
    next_id: AtomicU64,
    active: Mutex<Option<JoinHandle<()>>>,
}

impl<N: NotificationSurface + 'static> NotificationCenter<N> {
    pub fn new(surface: Arc<N>, timings: &Timings) -> Self {
        Self {
            surface,
            lifecycle: Lifecycle {
                reveal_after: timings.notification_reveal,
                display_for: timings.notification_display,
                fade_out: timings.notification_fade,
            },
            next_id: AtomicU64::new(1),
            active: Mutex::new(None),
        }
    }

    /// Replaces whatever is on screen with a new notification. Must be called inside a tokio runtime.
    pub fn show(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let notification = Notification {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        };

        match kind {
            NotificationKind::Success => tracing::info!("🔔 {}", notification.message),
            NotificationKind::Error => tracing::warn!("🔔 {}", notification.message),
        }

        self.surface.clear_notifications();
        self.surface.mount_notification(&notification);

        let id = notification.id;
        let surface = Arc::clone(&self.surface);
        let lifecycle = self.lifecycle;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(lifecycle.reveal_after).await;
            surface.reveal_notification(id);

            tokio::time::sleep(lifecycle.display_for).await;
            surface.hide_notification(id);

            tokio::time::sleep(lifecycle.fade_out).await;
            surface.remove_notification(id);
            tracing::debug!(
                "Notification {} removed after {}ms",
                id,
                notification.age_at(Utc::now()).num_milliseconds()
            );
        });

        // The previous notification is already gone from the surface; its timers would only touch a stale id.
        if let Some(previous) = self.lock_active().replace(handle) {
            previous.abort();
        }

        id
    }

    /// Waits until the current notification has run its full lifecycle.
    pub async fn settle(&self) {
        let handle = self.lock_active().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    fn lock_active(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
