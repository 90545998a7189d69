//! Release domain entities and their mapping from remote records and webhook events

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::GitHubConfig;
use crate::release::client::RemoteRelease;
use crate::release::prerequisite::extract_prerequisite;

/// Webhook actions that result in a cache mutation.
pub const ACTION_PUBLISHED: &str = "published";
pub const ACTION_EDITED: &str = "edited";

/// Fixed layout of the webhook timestamp fields.
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One published release as served to callers.
///
/// Timestamps carry the Unix epoch as their zero value when the source field
/// could not be parsed.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub tag_name: String,
    pub release_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
    pub tag_link: String,
    pub prerequisite: bool,
    pub prerequisite_message: String,
}

impl Release {
    /// Maps a record returned by the remote listing. The remote contract
    /// guarantees the required fields, so this never falls back to defaults.
    pub fn from_remote(remote: RemoteRelease, github: &GitHubConfig) -> Self {
        let (prerequisite, prerequisite_message) = extract_prerequisite(&remote.body);
        Self {
            tag_link: github.tag_url(&remote.tag_name),
            tag_name: remote.tag_name,
            release_name: remote.name,
            body: remote.body,
            created_at: remote.created_at,
            published_at: remote.published_at,
            prerequisite,
            prerequisite_message,
        }
    }

    /// Builds a release from a webhook event. A timestamp that does not match
    /// [`EVENT_TIME_FORMAT`] is logged and left at the zero value.
    pub fn from_event(release: EventRelease, github: &GitHubConfig) -> Self {
        let created_at = parse_event_time("created_at", &release.created_at);
        let published_at = parse_event_time("published_at", &release.published_at);
        let (prerequisite, prerequisite_message) = extract_prerequisite(&release.body);
        Self {
            tag_link: github.tag_url(&release.tag_name),
            tag_name: release.tag_name,
            release_name: release.name,
            body: release.body,
            created_at,
            published_at,
            prerequisite,
            prerequisite_message,
        }
    }
}

/// Inbound webhook payload, restricted to the fields consumed.
#[derive(Debug, Deserialize)]
pub struct ReleaseEvent {
    pub action: String,
    pub release: EventRelease,
}

/// Release object nested in a webhook payload.
#[derive(Debug, Deserialize)]
pub struct EventRelease {
    pub name: String,
    pub tag_name: String,
    pub created_at: String,
    pub published_at: String,
    pub body: String,
}

fn parse_event_time(field: &str, raw: &str) -> DateTime<Utc> {
    match NaiveDateTime::parse_from_str(raw, EVENT_TIME_FORMAT) {
        Ok(naive) => naive.and_utc(),
        Err(e) => {
            warn!("failed to parse {field} {raw:?}, leaving it at the zero value: {e}");
            DateTime::UNIX_EPOCH
        }
    }
}
