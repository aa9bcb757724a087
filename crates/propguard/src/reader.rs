// crates/propguard/src/reader.rs
// ============================================================================
// Module: Property Reader
// Description: Denial-tolerant property reads with optional defaults.
// Purpose: Fold "not set" and "not permitted" into a single absent result.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The reader functions forward a key to a [`PropertyStore`] and normalize
//! its outcome. A missing key and a read refused by policy both yield
//! `None`; a malformed key is a programmer error and is returned as
//! [`PropertyError::InvalidKey`]. The reader performs no validation, no
//! logging and no retries of its own.
//! Invariants:
//! - Only [`LookupError::AccessDenied`] is absorbed.
//! - Defaults are returned unchanged when the value is absent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::key::KeyError;
use crate::store::LookupError;
use crate::store::ProcessEnvStore;
use crate::store::PropertyStore;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Property read failure surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The key is malformed.
    #[error("invalid property key: {0}")]
    InvalidKey(#[from] KeyError),
}

// ============================================================================
// SECTION: Ambient Reads
// ============================================================================

/// Reads `key` from the process environment.
///
/// Returns `Ok(None)` when the property is unset or when the installed
/// access policy refuses the read.
///
/// # Errors
///
/// Returns [`PropertyError::InvalidKey`] when the key is malformed.
pub fn get_property(key: &str) -> Result<Option<String>, PropertyError> {
    get_property_from(&ProcessEnvStore, key)
}

/// Reads `key` from the process environment, falling back to `default`.
///
/// `default` is returned as given when the property is absent. Use
/// `D = Option<String>` to express "no default".
///
/// # Errors
///
/// Returns [`PropertyError::InvalidKey`] when the key is malformed.
pub fn get_property_or<D>(key: &str, default: D) -> Result<D, PropertyError>
where
    D: From<String>,
{
    get_property_or_from(&ProcessEnvStore, key, default)
}

// ============================================================================
// SECTION: Store Reads
// ============================================================================

/// Reads `key` from `store`, absorbing access denial.
///
/// # Errors
///
/// Returns [`PropertyError::InvalidKey`] when the store rejects the key.
pub fn get_property_from<S>(store: &S, key: &str) -> Result<Option<String>, PropertyError>
where
    S: PropertyStore + ?Sized,
{
    match store.lookup(key) {
        Ok(value) => Ok(value),
        Err(LookupError::AccessDenied {
            ..
        }) => Ok(None),
        Err(LookupError::InvalidKey(err)) => Err(PropertyError::InvalidKey(err)),
    }
}

/// Reads `key` from `store`, falling back to `default` when absent.
///
/// # Errors
///
/// Returns [`PropertyError::InvalidKey`] when the store rejects the key.
pub fn get_property_or_from<S, D>(store: &S, key: &str, default: D) -> Result<D, PropertyError>
where
    S: PropertyStore + ?Sized,
    D: From<String>,
{
    Ok(get_property_from(store, key)?.map_or(default, D::from))
}
