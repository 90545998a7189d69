//! Release cache store

use std::sync::Mutex;
use std::time::{Duration, Instant};

#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::release::error::StoreError;
use crate::release::types::Release;

/// Narrow interface of the cache the service mutates through.
///
/// The store owns its entry lifecycle; the service only ever reads the current
/// collection and replaces it wholesale.
#[cfg_attr(test, automock)]
pub trait ReleaseStore: Send + Sync + 'static {
    /// Current cached collection, if a live entry exists.
    fn get(&self) -> Result<Option<Vec<Release>>, StoreError>;

    /// Replace the cached collection wholesale.
    fn set(&self, releases: Vec<Release>) -> Result<(), StoreError>;
}

struct Entry {
    releases: Vec<Release>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// Volatile in-process store whose entries expire on their own TTL.
pub struct MemoryStore {
    entry: Mutex<Option<Entry>>,
    ttl: Option<Duration>,
}

impl MemoryStore {
    /// `ttl = None` keeps entries until overwritten or the process exits.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            entry: Mutex::new(None),
            ttl,
        }
    }
}

impl ReleaseStore for MemoryStore {
    fn get(&self) -> Result<Option<Vec<Release>>, StoreError> {
        let mut slot = self.entry.lock().map_err(|_| StoreError::LockPoisoned)?;
        match &*slot {
            Some(entry) if entry.is_expired() => {
                debug!("cached release entry expired");
                *slot = None;
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.releases.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, releases: Vec<Release>) -> Result<(), StoreError> {
        let mut slot = self.entry.lock().map_err(|_| StoreError::LockPoisoned)?;
        *slot = Some(Entry {
            releases,
            expires_at: self.ttl.map(|ttl| Instant::now() + ttl),
        });
        Ok(())
    }
}
