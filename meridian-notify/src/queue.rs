use crate::models::{Alert, AlertKind};
use crate::preferences::NotificationPreferences;
use meridian_shared::config::NotificationConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

/// Owns the ordered collection of live alerts and the timers that drive
/// each alert through its lifecycle: visible, then exiting once removal is
/// requested or the display window elapses, then purged after the
/// exit-animation window. There is no transition back from exiting.
///
/// All mutation happens synchronously under one lock; the timers are
/// independent per alert and hold only weak references, so a timer firing
/// after the queue is dropped is inert.
pub struct AlertQueue {
    shared: Arc<Shared>,
}

struct Shared {
    display: Duration,
    exit: Duration,
    inner: Mutex<Inner>,
    changed: watch::Sender<Vec<Alert>>,
}

#[derive(Default)]
struct Inner {
    alerts: Vec<Alert>,
    timers: HashMap<Uuid, JoinHandle<()>>,
}

impl AlertQueue {
    pub fn new(config: NotificationConfig) -> Self {
        let (changed, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(Shared {
                display: Duration::from_millis(config.display_ms),
                exit: Duration::from_millis(config.exit_ms),
                inner: Mutex::new(Inner::default()),
                changed,
            }),
        }
    }

    /// Append a new alert and schedule its automatic dismissal after the
    /// display window. Returns the alert's id.
    ///
    /// Must be called from within a tokio runtime: display and purge
    /// timers are spawned tasks.
    pub fn push(&self, kind: AlertKind, message: String) -> Uuid {
        let alert = Alert::new(kind, message);
        let id = alert.id;
        debug!(%id, ?kind, "alert raised");

        let mut inner = self.shared.inner.lock().unwrap();
        inner.alerts.push(alert);

        let weak = Arc::downgrade(&self.shared);
        let display = self.shared.display;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(display).await;
            if let Some(shared) = weak.upgrade() {
                Shared::dismiss(&shared, id);
            }
        });
        inner.timers.insert(id, timer);

        let _ = self.shared.changed.send(inner.alerts.clone());
        id
    }

    /// Like [`push`](Self::push), but drops alert kinds the user has muted.
    pub fn push_filtered(
        &self,
        preferences: &NotificationPreferences,
        kind: AlertKind,
        message: String,
    ) -> Option<Uuid> {
        if !preferences.allows(kind) {
            debug!(?kind, "alert suppressed by preferences");
            return None;
        }
        Some(self.push(kind, message))
    }

    /// Request removal of an alert.
    ///
    /// Idempotent: unknown ids and alerts already exiting are left
    /// untouched, so the display timer and a user-initiated close can both
    /// call this for the same alert.
    pub fn dismiss(&self, id: Uuid) {
        Shared::dismiss(&self.shared, id);
    }

    /// Ordered snapshot of the current alerts, exiting ones included.
    pub fn alerts(&self) -> Vec<Alert> {
        self.shared.inner.lock().unwrap().alerts.clone()
    }

    pub fn len(&self) -> usize {
        self.shared.inner.lock().unwrap().alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Change feed for a rendering layer: receives the full ordered
    /// snapshot after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Alert>> {
        self.shared.changed.subscribe()
    }
}

impl Shared {
    fn dismiss(shared: &Arc<Shared>, id: Uuid) {
        let mut inner = shared.inner.lock().unwrap();

        let alert = match inner.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => alert,
            None => return,
        };
        if alert.exiting {
            return;
        }
        alert.exiting = true;
        debug!(%id, "alert exiting");

        // Replace the display timer with the purge timer. Aborting a timer
        // that already fired is a no-op.
        if let Some(handle) = inner.timers.remove(&id) {
            handle.abort();
        }
        let weak = Arc::downgrade(shared);
        let exit = shared.exit;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(exit).await;
            if let Some(shared) = weak.upgrade() {
                Shared::purge(&shared, id);
            }
        });
        inner.timers.insert(id, timer);

        let _ = shared.changed.send(inner.alerts.clone());
    }

    /// Final removal. The alert is expected to be exiting by now, but the
    /// purge removes it whatever its state.
    fn purge(shared: &Arc<Shared>, id: Uuid) {
        let mut inner = shared.inner.lock().unwrap();

        let before = inner.alerts.len();
        inner.alerts.retain(|a| a.id != id);
        inner.timers.remove(&id);

        if inner.alerts.len() != before {
            debug!(%id, "alert purged");
            let _ = shared.changed.send(inner.alerts.clone());
        }
    }
}

impl Drop for AlertQueue {
    fn drop(&mut self) {
        // Pending timers only hold weak references, but abort them so
        // nothing keeps running past the queue's lifetime.
        if let Ok(inner) = self.shared.inner.lock() {
            for handle in inner.timers.values() {
                handle.abort();
            }
        }
    }
}
