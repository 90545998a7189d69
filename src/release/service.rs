//! Release-note cache management engine
//!
//! The service combines two mutation paths over one cached collection: the
//! cold-path remote fetch with bounded retries, and webhook-delivered release
//! events merged in with upsert semantics. Both paths run their
//! read-compute-write against the store inside the same guarded transaction.

use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

use crate::config::GitHubConfig;
use crate::release::client::ReleaseClient;
use crate::release::error::{FetchError, ServiceError, StoreError, WebhookError};
use crate::release::prerequisite::extract_prerequisite;
use crate::release::store::ReleaseStore;
use crate::release::types::{ACTION_EDITED, ACTION_PUBLISHED, Release, ReleaseEvent};

/// Total attempts for the cold-path remote fetch.
pub const MAX_FETCH_ATTEMPTS: u32 = 3;

pub struct ReleaseNoteService<S: ReleaseStore> {
    github: GitHubConfig,
    store: Arc<S>,
    client: Arc<dyn ReleaseClient>,
    // spans every read-compute-write against the store, shared by both
    // mutation paths
    txn_lock: Mutex<()>,
}

impl<S: ReleaseStore> ReleaseNoteService<S> {
    pub fn new(github: GitHubConfig, store: Arc<S>, client: Arc<dyn ReleaseClient>) -> Self {
        Self {
            github,
            store,
            client,
            txn_lock: Mutex::new(()),
        }
    }

    /// Builds the service and eagerly warms the release cache.
    ///
    /// A warm-up failure is logged and swallowed; the service still starts.
    pub async fn start(
        github: GitHubConfig,
        store: Arc<S>,
        client: Arc<dyn ReleaseClient>,
    ) -> Arc<Self> {
        let service = Arc::new(Self::new(github, store, client));
        if let Err(e) = service.get_releases().await {
            error!("release cache warm-up failed: {e}");
        }
        service
    }

    /// Returns the cached collection when present and non-empty, otherwise
    /// fetches it from the remote.
    pub async fn get_releases(&self) -> Result<Vec<Release>, ServiceError> {
        match self.store.get() {
            Ok(Some(releases)) if !releases.is_empty() => return Ok(releases),
            Ok(_) => {}
            Err(e) => warn!("unreadable release cache entry, treating it as empty: {e}"),
        }
        self.fetch_and_cache().await
    }

    /// Ingests one webhook-delivered release event.
    ///
    /// Returns `Ok(false)` for actions other than published/edited; the cache
    /// is left untouched.
    pub fn ingest(&self, payload: &[u8]) -> Result<bool, WebhookError> {
        let event: ReleaseEvent = serde_json::from_slice(payload).map_err(|e| {
            error!("failed to decode release event payload: {e}");
            e
        })?;

        if event.action != ACTION_PUBLISHED && event.action != ACTION_EDITED {
            warn!(
                action = %event.action,
                "handling only published and edited actions, event ignored"
            );
            return Ok(false);
        }

        let incoming = Release::from_event(event.release, &self.github);
        info!(release = %incoming.release_name, "ingesting release event");
        self.upsert_release(incoming)?;
        Ok(true)
    }

    /// Cold-path loader: queries the remote listing with bounded retries and
    /// overwrites the store on success.
    async fn fetch_and_cache(&self) -> Result<Vec<Release>, ServiceError> {
        for attempt in 1..=MAX_FETCH_ATTEMPTS {
            match self
                .client
                .list_releases(&self.github.owner, &self.github.repo)
                .await
            {
                Ok(remote) => {
                    let releases: Vec<Release> = remote
                        .into_iter()
                        .map(|r| Release::from_remote(r, &self.github))
                        .collect();
                    info!(
                        "fetched {} releases from {}/{}",
                        releases.len(),
                        self.github.owner,
                        self.github.repo
                    );
                    return Ok(self.replace_releases(releases)?);
                }
                // a missing repository will not appear on a later attempt
                Err(e @ FetchError::NotFound(_)) => {
                    error!("error fetching releases (attempt {attempt}/{MAX_FETCH_ATTEMPTS}): {e}");
                    return Err(e.into());
                }
                Err(e) => {
                    error!("error fetching releases (attempt {attempt}/{MAX_FETCH_ATTEMPTS}): {e}");
                }
            }
        }

        Err(ServiceError::RetriesExhausted {
            attempts: MAX_FETCH_ATTEMPTS,
        })
    }

    fn upsert_release(&self, incoming: Release) -> Result<(), StoreError> {
        self.with_releases(|mut releases| {
            match releases
                .iter()
                .position(|r| r.release_name == incoming.release_name)
            {
                Some(idx) => {
                    // the body changed, so the prerequisite block is re-derived
                    // from it; timestamps and tag link keep the stored values
                    let existing = &mut releases[idx];
                    existing.body = incoming.body;
                    let (prerequisite, message) = extract_prerequisite(&existing.body);
                    existing.prerequisite = prerequisite;
                    existing.prerequisite_message = message;
                }
                None => releases.insert(0, incoming),
            }
            releases
        })
        .map(|_| ())
    }

    fn replace_releases(&self, releases: Vec<Release>) -> Result<Vec<Release>, StoreError> {
        self.with_releases(|_| releases)
    }

    /// Guarded transaction helper: every read-compute-write against the store
    /// runs under one process-wide lock, so neither mutation path can overwrite
    /// the other with a stale copy.
    fn with_releases<F>(&self, f: F) -> Result<Vec<Release>, StoreError>
    where
        F: FnOnce(Vec<Release>) -> Vec<Release>,
    {
        let _guard = self.txn_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let current = match self.store.get() {
            Ok(current) => current.unwrap_or_default(),
            Err(e) => {
                warn!("unreadable release cache entry, treating it as empty: {e}");
                Vec::new()
            }
        };
        let next = f(current);
        self.store.set(next.clone())?;
        Ok(next)
    }
}
