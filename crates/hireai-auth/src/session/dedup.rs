//! Suppression of rapid repeated logins.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

/// Tracks the last cookie mint per user and collapses logins that arrive
/// within the cooldown window.
///
/// Entries are pruned once they are older than twice the window.
#[derive(Debug)]
pub struct LoginDeduplicator {
    window: Duration,
    last_minted: Mutex<HashMap<Uuid, Instant>>,
}

impl LoginDeduplicator {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_minted: Mutex::new(HashMap::new()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns `true` if a new cookie should be minted for `user_id`, and
    /// records the mint. Returns `false` inside the cooldown window; the
    /// recorded time is not refreshed in that case.
    pub fn should_mint(&self, user_id: Uuid) -> bool {
        self.should_mint_at(user_id, Instant::now())
    }

    pub(crate) fn should_mint_at(&self, user_id: Uuid, now: Instant) -> bool {
        let mut map = self.last_minted.lock().unwrap_or_else(|e| e.into_inner());

        let horizon = self.window * 2;
        map.retain(|_, at| now.saturating_duration_since(*at) < horizon);

        if let Some(last) = map.get(&user_id) {
            if now.saturating_duration_since(*last) < self.window {
                return false;
            }
        }

        map.insert(user_id, now);
        true
    }

    /// Drop the entry for `user_id` so the next login mints again.
    pub fn forget(&self, user_id: Uuid) {
        let mut map = self.last_minted.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&user_id);
    }

    /// Number of tracked users.
    pub fn len(&self) -> usize {
        self.last_minted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
