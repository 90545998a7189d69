//! release-hub: an in-process view of a project's published release notes.
//!
//! The release cache is fed from two directions: a cold-path fetch of the
//! GitHub releases listing with bounded retries, and warm-path webhook events
//! merged in with upsert semantics. [`release::service::ReleaseNoteService`]
//! exposes the two entry points a surrounding transport layer needs:
//! `get_releases` and `ingest`.

pub mod config;
pub mod logging;
pub mod module;
pub mod release;
