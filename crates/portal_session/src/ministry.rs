//! Ministry context - the active department and its switch notification
//!
//! A switch installs a notification and spawns a timer task that clears it
//! once `NOTIFICATION_LIFETIME` has passed. The timer is cancelled when a
//! newer switch replaces the notification or when the context is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info};
use portal_core::{MinistryId, SwitchNotification, NOTIFICATION_LIFETIME};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
struct NotificationSlot {
    /// Bumped on every switch so a late timer cannot clear a newer notification.
    generation: u64,
    current: Option<SwitchNotification>,
}

#[derive(Debug)]
pub struct MinistryContext {
    active: MinistryId,
    slot: Arc<Mutex<NotificationSlot>>,
    expiry: Option<CancellationToken>,
}

impl Default for MinistryContext {
    fn default() -> Self {
        Self::new(MinistryId::default())
    }
}

fn lock(slot: &Mutex<NotificationSlot>) -> MutexGuard<'_, NotificationSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clear the notification installed by switch number `generation`.
fn expire(slot: &Mutex<NotificationSlot>, generation: u64) {
    let mut slot = lock(slot);
    if slot.generation == generation {
        slot.current = None;
    }
}

impl MinistryContext {
    pub fn new(active: MinistryId) -> Self {
        Self {
            active,
            slot: Arc::new(Mutex::new(NotificationSlot::default())),
            expiry: None,
        }
    }

    pub fn active(&self) -> MinistryId {
        self.active
    }

    /// The live switch notification, if one has not expired yet.
    pub fn notification(&self) -> Option<SwitchNotification> {
        lock(&self.slot).current
    }

    /// Make `target` the active ministry.
    ///
    /// Returns `false` without touching the notification when `target` is
    /// already active. Must be called from within a tokio runtime.
    pub fn switch_to(&mut self, target: MinistryId) -> bool {
        if target == self.active {
            debug!("Ministry {} already active, no switch", target);
            return false;
        }

        let from = self.active;
        self.active = target;
        self.cancel_expiry();

        let now = Instant::now();
        let notification = SwitchNotification::new(target, now.into_std());
        let generation = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.current = Some(notification);
            slot.generation
        };

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let slot = Arc::clone(&self.slot);
        let deadline = now + NOTIFICATION_LIFETIME;
        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => expire(&slot, generation),
            }
        });
        self.expiry = Some(token);

        info!("Switched ministry {} -> {}", from, target);
        true
    }

    fn cancel_expiry(&mut self) {
        if let Some(token) = self.expiry.take() {
            token.cancel();
        }
    }
}

impl Drop for MinistryContext {
    fn drop(&mut self) {
        self.cancel_expiry();
    }
}
