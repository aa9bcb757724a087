// crates/propguard/src/audit.rs
// ============================================================================
// Module: Property Read Auditing
// Description: Structured audit events for property lookups.
// Purpose: Emit redacted audit logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines the audit event payload, sinks that write events as
//! JSON lines, and [`AuditedStore`], a store wrapper that records one event
//! per lookup. Auditing is opt-in: the reader functions stay silent unless a
//! host wraps its store.
//! Security posture: property values may hold secrets and are never
//! recorded; only the key and the outcome are logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::store::LookupError;
use crate::store::PropertyStore;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome classification for a single lookup.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadOutcome {
    /// The property was set.
    Found,
    /// The property was not set.
    Missing,
    /// Policy refused the read.
    Denied,
    /// The key was malformed.
    InvalidKey,
}

impl ReadOutcome {
    /// Classifies a store lookup result.
    #[must_use]
    pub fn classify(result: &Result<Option<String>, LookupError>) -> Self {
        match result {
            Ok(Some(_)) => Self::Found,
            Ok(None) => Self::Missing,
            Err(LookupError::AccessDenied {
                ..
            }) => Self::Denied,
            Err(LookupError::InvalidKey(_)) => Self::InvalidKey,
        }
    }

    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::Missing => "missing",
            Self::Denied => "denied",
            Self::InvalidKey => "invalid_key",
        }
    }
}

/// Property read audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Key that was looked up.
    pub key: String,
    /// Lookup outcome.
    pub outcome: ReadOutcome,
}

impl PropertyAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(key: &str, outcome: ReadOutcome) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "property_read",
            timestamp_ms,
            key: key.to_string(),
            outcome,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for property read events.
pub trait PropertyAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &PropertyAuditEvent);
}

/// No-op audit sink.
///
/// # Invariants
/// - Events are intentionally discarded.
pub struct NoopAuditSink;

impl PropertyAuditSink for NoopAuditSink {
    fn record(&self, _event: &PropertyAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl PropertyAuditSink for StderrAuditSink {
    fn record(&self, event: &PropertyAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl PropertyAuditSink for FileAuditSink {
    fn record(&self, event: &PropertyAuditEvent) {
        let Ok(payload) = serde_json::to_string(event) else {
            return;
        };
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(file, "{payload}");
    }
}

// ============================================================================
// SECTION: Audited Store
// ============================================================================

/// Store wrapper that records an audit event for every lookup.
///
/// # Invariants
/// - Lookup results are returned unchanged.
/// - Exactly one event is recorded per lookup.
pub struct AuditedStore<S> {
    /// Store that serves the lookups.
    inner: S,
    /// Sink receiving one event per lookup.
    sink: Arc<dyn PropertyAuditSink>,
}

impl<S: PropertyStore> AuditedStore<S> {
    /// Wraps `inner`, sending events to `sink`.
    #[must_use]
    pub fn new(inner: S, sink: Arc<dyn PropertyAuditSink>) -> Self {
        Self {
            inner,
            sink,
        }
    }

    /// Returns the wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: PropertyStore> PropertyStore for AuditedStore<S> {
    fn lookup(&self, key: &str) -> Result<Option<String>, LookupError> {
        let result = self.inner.lookup(key);
        self.sink.record(&PropertyAuditEvent::new(key, ReadOutcome::classify(&result)));
        result
    }
}
