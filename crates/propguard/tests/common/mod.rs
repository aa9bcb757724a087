// crates/propguard/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared test utilities and fixtures for property reader tests.
// Purpose: Provide reusable stores, policies and audit capture.
// Dependencies: propguard
// ============================================================================

//! ## Overview
//! This module provides shared fixtures for the property reader tests: a
//! sample store mirroring a small application config, a policy that denies
//! secret-looking keys, and an audit sink that captures events in memory.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::sync::Arc;
use std::sync::Mutex;

use propguard::KeyAccessPolicy;
use propguard::MapStore;
use propguard::PropertyAuditEvent;
use propguard::PropertyAuditSink;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

/// Returns a store holding `app.timeout = 30` with no access restrictions.
#[must_use]
pub fn sample_store() -> MapStore {
    MapStore::new().with_entry("app.timeout", "30")
}

/// Returns a store holding `app.timeout` and `secret.key`, denying the latter.
#[must_use]
pub fn guarded_store() -> MapStore {
    MapStore::new()
        .with_entry("app.timeout", "30")
        .with_entry("secret.key", "hunter2")
        .with_policy(Arc::new(KeyAccessPolicy::deny(["secret.key"])))
}

/// Returns every environment variable the process store can address.
///
/// Entries with non-Unicode names or values, empty names or names holding
/// `=` are skipped, so hosts with such variables do not break the tests.
#[must_use]
pub fn addressable_vars() -> Vec<(String, String)> {
    env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .filter(|(key, _)| !key.is_empty() && !key.contains('='))
        .collect()
}

/// Returns one addressable environment variable, if the host has any.
#[must_use]
pub fn first_addressable_var() -> Option<(String, String)> {
    addressable_vars().into_iter().next()
}

/// Returns key names that hosts commonly deny.
#[must_use]
pub fn sensitive_keys() -> Vec<&'static str> {
    vec![
        "AWS_SECRET_ACCESS_KEY",
        "GITHUB_TOKEN",
        "SECRET_KEY",
        "API_KEY",
        "DB_PASSWORD",
        "DATABASE_URL",
    ]
}

// ============================================================================
// SECTION: Audit Capture
// ============================================================================

/// Audit sink that keeps every recorded event in memory.
#[derive(Default)]
pub struct RecordingAuditSink {
    /// Captured events in record order.
    events: Mutex<Vec<PropertyAuditEvent>>,
}

impl RecordingAuditSink {
    /// Returns a copy of the captured events.
    #[must_use]
    pub fn events(&self) -> Vec<PropertyAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl PropertyAuditSink for RecordingAuditSink {
    fn record(&self, event: &PropertyAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
