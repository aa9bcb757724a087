// crates/propguard/src/store.rs
// ============================================================================
// Module: Property Stores
// Description: Key/value stores that property reads are served from.
// Purpose: Abstract the ambient process store behind a lookup interface.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A [`PropertyStore`] resolves a key to an optional value. Stores own key
//! validation and access-policy enforcement, and report both as a
//! [`LookupError`]. [`ProcessEnvStore`] is the ambient store backed by the
//! process environment; [`MapStore`] holds an owned property set.
//! Invariants:
//! - Key validation happens before the policy check, and the policy check
//!   happens before the underlying read.
//! - A store never mutates its backing data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;

use thiserror::Error;

use crate::key::KeyError;
use crate::key::validate_env_key;
use crate::key::validate_key;
use crate::policy::AccessPolicy;
use crate::policy::installed_policy_allows;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Store-level lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The key is malformed.
    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),
    /// The access policy refused the read.
    #[error("read of property {key} denied by policy")]
    AccessDenied {
        /// Key whose read was refused.
        key: String,
    },
}

impl LookupError {
    /// Builds an access-denied error for `key`.
    #[must_use]
    pub fn access_denied(key: &str) -> Self {
        Self::AccessDenied {
            key: key.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Key/value store consulted by the property reader.
pub trait PropertyStore: Send + Sync {
    /// Looks up `key`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidKey`] for malformed keys and
    /// [`LookupError::AccessDenied`] when policy refuses the read.
    fn lookup(&self, key: &str) -> Result<Option<String>, LookupError>;
}

impl<S: PropertyStore + ?Sized> PropertyStore for &S {
    fn lookup(&self, key: &str) -> Result<Option<String>, LookupError> {
        (**self).lookup(key)
    }
}

impl<S: PropertyStore + ?Sized> PropertyStore for Arc<S> {
    fn lookup(&self, key: &str) -> Result<Option<String>, LookupError> {
        (**self).lookup(key)
    }
}

// ============================================================================
// SECTION: Process Environment
// ============================================================================

/// Ambient store backed by the process environment.
///
/// # Invariants
/// - Reads are gated by the process-wide policy from
///   [`crate::install_policy`].
/// - Values that are not valid Unicode are reported as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessEnvStore;

impl PropertyStore for ProcessEnvStore {
    fn lookup(&self, key: &str) -> Result<Option<String>, LookupError> {
        validate_env_key(key)?;
        if !installed_policy_allows(key) {
            return Err(LookupError::access_denied(key));
        }
        Ok(env::var_os(key).and_then(|value| value.into_string().ok()))
    }
}

// ============================================================================
// SECTION: In-memory Store
// ============================================================================

/// Owned property set with an optional access policy.
///
/// # Invariants
/// - Entries are fixed once the store is built.
/// - Without a policy every read is permitted.
#[derive(Clone, Default)]
pub struct MapStore {
    /// Property entries keyed by name.
    entries: BTreeMap<String, String>,
    /// Policy gating reads from this store.
    policy: Option<Arc<dyn AccessPolicy>>,
}

impl MapStore {
    /// Creates an empty store with no policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the store with `key` set to `value`.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Returns the store gated by `policy`.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn AccessPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
            policy: None,
        }
    }
}

impl PropertyStore for MapStore {
    fn lookup(&self, key: &str) -> Result<Option<String>, LookupError> {
        validate_key(key)?;
        if let Some(policy) = &self.policy
            && !policy.allows_read(key)
        {
            return Err(LookupError::access_denied(key));
        }
        Ok(self.entries.get(key).cloned())
    }
}
