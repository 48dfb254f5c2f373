//! Token revocation list with periodic sweep
//! Lock-striped concurrent map so request threads never contend on a
//! global lock; a background task prunes expired entries on a fixed
//! interval

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// In-memory record of tokens treated as invalid before their natural
/// expiry.
///
/// Entries are retained for a fixed window from insertion time,
/// independent of the token's own embedded expiry. The window bounds
/// memory without ever re-parsing the token.
pub struct RevocationStore {
    entries: DashMap<String, DateTime<Utc>>,
    retention: Duration,
}

impl RevocationStore {
    pub fn new(retention_secs: u64) -> Self {
        Self {
            entries: DashMap::new(),
            retention: Duration::seconds(retention_secs as i64),
        }
    }

    /// Revoke a token. Idempotent: re-revoking refreshes the retention
    /// deadline.
    pub fn revoke(&self, token: &str) {
        self.entries
            .insert(token.to_string(), Utc::now() + self.retention);
    }

    /// Whether a token is currently revoked
    pub fn is_revoked(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Remove every entry whose retention deadline has elapsed.
    /// Safe under concurrent insertion; returns the number removed.
    pub fn sweep(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, deadline| *deadline > now);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn retention_secs(&self) -> u64 {
        self.retention.num_seconds() as u64
    }
}

/// Spawn the periodic sweeper task.
///
/// Wakes every `interval_secs`, sweeps, and keeps looping no matter what
/// a sweep does; a panicking sweep is logged, never fatal. Flipping the
/// watch channel stops the task between iterations, so a sweep either
/// completes or never starts.
pub fn spawn_sweeper(
    store: Arc<RevocationStore>,
    interval_secs: u64,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
        // The first tick completes immediately; consume it so the loop
        // waits a full interval before the first sweep.
        ticker.tick().await;

        tracing::info!(interval_secs, "Revocation sweeper started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match std::panic::catch_unwind(AssertUnwindSafe(|| store.sweep())) {
                        Ok(removed) => {
                            if removed > 0 {
                                tracing::info!(removed, remaining = store.len(), "Revocation sweep completed");
                            } else {
                                tracing::debug!(remaining = store.len(), "Revocation sweep found nothing to remove");
                            }
                        }
                        Err(_) => {
                            tracing::error!("Revocation sweep panicked; continuing");
                        }
                    }
                }
                _ = shutdown.changed() => {
                    tracing::info!("Revocation sweeper shutting down");
                    break;
                }
            }
        }
    })
}
