//! Installable module catalog
//!
//! Fixed metadata describing the modules the platform advertises alongside its
//! release notes. No algorithmic content lives here; the configured core
//! module's fields come from [`crate::config::ModuleConfig`].

pub mod catalog;
