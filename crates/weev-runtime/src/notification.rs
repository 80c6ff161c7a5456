//! Ephemeral toast notifications.
//!
//! Toasts are appended to a queue and stop being active once their
//! lifetime has elapsed, regardless of user interaction. A toast can also
//! be dismissed early, which hides it until the next sweep removes it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use strum::{AsRefStr, Display, IntoStaticStr};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Tracing target for notification operations.
pub const TRACING_TARGET: &str = "weev_runtime::notification";

/// Shortest period the sweeper runs at.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(100);

/// Severity of a toast, bound to a fixed icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Returns the icon name shown next to the message.
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "exclamation-circle",
            Self::Warning => "exclamation-triangle",
            Self::Info => "info-circle",
        }
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
    pub expires_at: Instant,
    /// Cleared by [`NotificationCenter::dismiss`].
    pub visible: bool,
}

impl Toast {
    /// Returns whether the toast is still shown at `now`.
    #[inline]
    pub fn is_active(&self, now: Instant) -> bool {
        self.visible && now < self.expires_at
    }
}

/// Queue of toasts shared between the controller and its front end.
#[derive(Clone)]
pub struct NotificationCenter {
    toasts: Arc<Mutex<VecDeque<Toast>>>,
    ttl: Duration,
    sweep_interval: Duration,
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("ttl", &self.ttl)
            .field("sweep_interval", &self.sweep_interval)
            .finish_non_exhaustive()
    }
}

impl NotificationCenter {
    /// Creates an empty queue.
    ///
    /// The sweep period is raised to [`MIN_SWEEP_INTERVAL`] if shorter.
    pub fn new(ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            toasts: Arc::default(),
            ttl,
            sweep_interval: sweep_interval.max(MIN_SWEEP_INTERVAL),
        }
    }

    /// Returns the lifetime given to new toasts.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Appends a toast and returns its id.
    pub fn notify(&self, severity: Severity, message: impl Into<String>) -> Uuid {
        let now = Instant::now();
        let toast = Toast {
            id: Uuid::now_v7(),
            message: message.into(),
            severity,
            created_at: now,
            expires_at: now + self.ttl,
            visible: true,
        };
        let id = toast.id;

        tracing::debug!(
            target: TRACING_TARGET,
            toast_id = %id,
            severity = %severity,
            message = %toast.message,
            "Toast shown"
        );

        self.lock().push_back(toast);
        id
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.notify(Severity::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.notify(Severity::Error, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> Uuid {
        self.notify(Severity::Warning, message)
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.notify(Severity::Info, message)
    }

    /// Hides a toast before its lifetime ends.
    ///
    /// Returns `false` if no active toast has this id.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let now = Instant::now();
        let mut toasts = self.lock();
        match toasts.iter_mut().find(|t| t.id == id && t.is_active(now)) {
            Some(toast) => {
                toast.visible = false;
                true
            }
            None => false,
        }
    }

    /// Returns the toasts currently shown, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        let now = Instant::now();
        self.lock()
            .iter()
            .filter(|t| t.is_active(now))
            .cloned()
            .collect()
    }

    /// Removes every toast that is no longer shown.
    ///
    /// Returns the number of toasts removed.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|t| t.is_active(now));
        before - toasts.len()
    }

    /// Returns how many toasts are queued, shown or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Spawns the periodic sweeper.
    ///
    /// The task runs until `cancel` is triggered.
    pub fn spawn_sweeper(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let center = self.clone();
        tokio::spawn(async move { center.run_sweeper(cancel).await })
    }

    async fn run_sweeper(&self, cancel: CancellationToken) {
        tracing::debug!(
            target: TRACING_TARGET,
            interval_ms = self.sweep_interval.as_millis(),
            "Starting toast sweeper"
        );

        let mut interval = tokio::time::interval_at(
            Instant::now() + self.sweep_interval,
            self.sweep_interval,
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(
                        target: TRACING_TARGET,
                        "Toast sweeper stopped"
                    );
                    break;
                }
                _ = interval.tick() => {
                    let removed = self.sweep();
                    if removed > 0 {
                        tracing::trace!(
                            target: TRACING_TARGET,
                            removed,
                            "Swept toasts"
                        );
                    }
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        self.toasts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_have_fixed_icons() {
        assert_eq!(Severity::Success.icon(), "check-circle");
        assert_eq!(Severity::Error.icon(), "exclamation-circle");
        assert_eq!(Severity::Warning.icon(), "exclamation-triangle");
        assert_eq!(Severity::Info.icon(), "info-circle");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[tokio::test(start_paused = true)]
    async fn toast_expires_exactly_after_ttl() {
        let center = NotificationCenter::default();
        center.success("hola");

        tokio::time::advance(Duration::from_millis(4_999)).await;
        assert_eq!(center.active().len(), 1);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(center.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_is_independent_per_toast() {
        let center = NotificationCenter::default();
        center.info("first");
        tokio::time::advance(Duration::from_secs(3)).await;
        center.info("second");

        tokio::time::advance(Duration::from_secs(2)).await;
        let active = center.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn dismissed_toasts_are_hidden_then_swept() {
        let center = NotificationCenter::default();
        let id = center.error("boom");
        center.warning("careful");

        assert!(center.dismiss(id));
        assert!(!center.dismiss(id));
        assert_eq!(center.active().len(), 1);
        assert_eq!(center.len(), 2);

        assert_eq!(center.sweep(), 1);
        assert_eq!(center.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_runs_until_cancelled() {
        let center = NotificationCenter::default();
        let cancel = CancellationToken::new();
        let handle = center.spawn_sweeper(cancel.clone());

        center.info("one");
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert!(center.is_empty());

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn zero_sweep_interval_is_clamped() {
        let center = NotificationCenter::new(Duration::from_secs(5), Duration::ZERO);
        let cancel = CancellationToken::new();
        let handle = center.spawn_sweeper(cancel.clone());

        let id = center.info("one");
        center.dismiss(id);
        tokio::time::sleep(MIN_SWEEP_INTERVAL * 2).await;
        assert!(center.is_empty());

        cancel.cancel();
        handle.await.unwrap();
    }
}
