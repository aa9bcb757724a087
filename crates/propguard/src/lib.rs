// crates/propguard/src/lib.rs
// ============================================================================
// Module: propguard
// Description: Denial-tolerant reads of process-level properties.
// Purpose: Treat "not permitted to read" exactly like "not set".
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `propguard` reads named properties from the process environment and
//! absorbs access-policy denial by returning an absent value, so callers
//! never distinguish "not configured" from "not permitted to read".
//! [`get_property`] returns an optional value and [`get_property_or`]
//! substitutes a caller-supplied default. The `_from` variants read from any
//! [`PropertyStore`].
//! Invariants:
//! - Access denial is the only failure absorbed; malformed keys propagate.
//! - The reader functions keep no state and do not log.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod config;
pub mod key;
pub mod policy;
pub mod reader;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditedStore;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::PropertyAuditEvent;
pub use audit::PropertyAuditSink;
pub use audit::ReadOutcome;
pub use audit::StderrAuditSink;
pub use config::AuditConfig;
pub use config::ConfigError;
pub use config::ReaderConfig;
pub use key::KeyError;
pub use policy::AccessPolicy;
pub use policy::AllowAll;
pub use policy::KeyAccessPolicy;
pub use policy::clear_policy;
pub use policy::install_policy;
pub use policy::installed_policy;
pub use reader::PropertyError;
pub use reader::get_property;
pub use reader::get_property_from;
pub use reader::get_property_or;
pub use reader::get_property_or_from;
pub use store::LookupError;
pub use store::MapStore;
pub use store::ProcessEnvStore;
pub use store::PropertyStore;
