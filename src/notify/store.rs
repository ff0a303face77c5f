use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, warn};

use crate::api::client::ApiClient;
use crate::api::notifications as remote;
use crate::models::notification::{NotificationRecord, RawNotification};
use crate::notify::ingest;

/// Per-session notification list: newest-first, deduplicated by id, owned by
/// this store alone. Presenters read snapshots; only store operations mutate.
///
/// Notifications are advisory, so every remote call degrades to local-only
/// state on failure instead of corrupting the list or escaping as a panic.
pub struct NotificationStore {
    entries: RwLock<Vec<NotificationRecord>>,
    local_seq: AtomicU64,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            local_seq: AtomicU64::new(0),
        }
    }

    /// Session-unique fallback id for events the server did not name. The
    /// prefix keeps it out of the server id space.
    fn next_local_id(&self) -> String {
        format!("local-{}", self.local_seq.fetch_add(1, Ordering::Relaxed))
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<NotificationRecord>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<NotificationRecord>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the server snapshot and merges it in. Live events may already
    /// have arrived while the fetch was in flight, so the merge deduplicates
    /// by id instead of blindly replacing. A fetch error leaves the store
    /// untouched.
    pub async fn load(&self, api: &ApiClient) {
        match remote::fetch(api).await {
            Ok(snapshot) => {
                let added = self.merge_snapshot(snapshot);
                debug!(added, "notification snapshot merged");
            }
            Err(err) => {
                warn!(error = %err, "notification snapshot fetch failed; keeping local list");
            }
        }
    }

    /// Merges a snapshot into the list. Entries already present (live events
    /// that beat the fetch) win; the result is ordered newest-first.
    pub fn merge_snapshot(&self, snapshot: Vec<NotificationRecord>) -> usize {
        let mut entries = self.write();
        let mut added = 0;

        for record in snapshot {
            if entries.iter().all(|existing| existing.id != record.id) {
                entries.push(record);
                added += 1;
            }
        }

        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        added
    }

    /// Normalizes and prepends a live event, returning the stored record for
    /// UI side effects (toast, badge). Synchronous; never suspends. An id
    /// already present is returned as-is instead of duplicated.
    pub fn ingest(&self, raw: RawNotification) -> NotificationRecord {
        let record = ingest::normalize(raw, self.next_local_id(), Utc::now());

        let mut entries = self.write();
        if let Some(existing) = entries.iter().find(|n| n.id == record.id) {
            debug!(id = %record.id, "duplicate notification ignored");
            return existing.clone();
        }

        entries.insert(0, record.clone());
        record
    }

    /// Sets the read flag locally and fires the remote update without
    /// waiting. Read state is best-effort: a remote failure is logged and the
    /// local flag stays set.
    pub fn mark_read(&self, api: &ApiClient, id: &str) -> bool {
        let found = {
            let mut entries = self.write();
            match entries.iter_mut().find(|n| n.id == id) {
                Some(record) => {
                    record.is_read = true;
                    true
                }
                None => false,
            }
        };

        if found {
            let api = api.clone();
            let id = id.to_string();
            tokio::spawn(async move {
                if let Err(err) = remote::mark_read(&api, &id).await {
                    warn!(id = %id, error = %err, "remote read-flag update failed");
                }
            });
        }

        found
    }

    /// Local dismissal only; there is no per-item delete on the backend.
    pub fn remove(&self, id: &str) -> bool {
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|n| n.id != id);
        entries.len() != before
    }

    /// Remote delete-all, then local clear. The local list is emptied even
    /// when the remote call fails, keeping the UI responsive; previously
    /// delivered items must not resurface on the next event.
    pub async fn clear_all(&self, api: &ApiClient) {
        if let Err(err) = remote::delete_all(api).await {
            warn!(error = %err, "remote notification clear failed; clearing local list anyway");
        }
        self.write().clear();
    }

    pub fn unread_count(&self) -> usize {
        self.read().iter().filter(|n| !n.is_read).count()
    }

    pub fn records(&self) -> Vec<NotificationRecord> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}
