// crates/propguard/src/policy.rs
// ============================================================================
// Module: Access Policy
// Description: Installable read-permission checks for property lookups.
// Purpose: Let the host deny reads of selected properties.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! An [`AccessPolicy`] decides whether a property may be read. Stores consult
//! a policy after key validation and before touching the underlying data.
//! The process environment store consults the policy installed process-wide
//! with [`install_policy`]; when none is installed every read is permitted.
//! Invariants:
//! - `denylist` overrides `allowlist` in [`KeyAccessPolicy`].
//! - Policy checks never panic, even when the policy slot lock is poisoned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Read-permission check for property keys.
pub trait AccessPolicy: Send + Sync {
    /// Returns true when the calling context may read `key`.
    fn allows_read(&self, key: &str) -> bool;
}

impl<F> AccessPolicy for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn allows_read(&self, key: &str) -> bool {
        self(key)
    }
}

// ============================================================================
// SECTION: Built-in Policies
// ============================================================================

/// Policy that permits every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn allows_read(&self, _key: &str) -> bool {
        true
    }
}

/// Allowlist/denylist policy over exact key names.
///
/// # Invariants
/// - `denylist` overrides `allowlist` when both are present.
/// - If `allowlist` is `None`, all keys are allowed unless denied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyAccessPolicy {
    /// Optional allowlist of readable keys.
    #[serde(default)]
    pub allowlist: Option<BTreeSet<String>>,
    /// Explicit denylist of keys.
    #[serde(default)]
    pub denylist: BTreeSet<String>,
}

impl KeyAccessPolicy {
    /// Returns a policy that permits all keys.
    #[must_use]
    pub const fn allow_all() -> Self {
        Self {
            allowlist: None,
            denylist: BTreeSet::new(),
        }
    }

    /// Returns a policy that denies exactly the given keys.
    #[must_use]
    pub fn deny<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            allowlist: None,
            denylist: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a policy that permits only the given keys.
    #[must_use]
    pub fn allow_only<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            allowlist: Some(keys.into_iter().map(Into::into).collect()),
            denylist: BTreeSet::new(),
        }
    }
}

impl AccessPolicy for KeyAccessPolicy {
    fn allows_read(&self, key: &str) -> bool {
        if self.denylist.contains(key) {
            return false;
        }
        if let Some(allowlist) = &self.allowlist {
            return allowlist.contains(key);
        }
        true
    }
}

// ============================================================================
// SECTION: Process-wide Installation
// ============================================================================

/// Policy consulted by the process environment store.
static INSTALLED_POLICY: RwLock<Option<Arc<dyn AccessPolicy>>> = RwLock::new(None);

/// Installs `policy` process-wide, returning the previously installed one.
pub fn install_policy(policy: Arc<dyn AccessPolicy>) -> Option<Arc<dyn AccessPolicy>> {
    let mut slot = INSTALLED_POLICY.write().unwrap_or_else(PoisonError::into_inner);
    slot.replace(policy)
}

/// Removes the process-wide policy, returning it if one was installed.
pub fn clear_policy() -> Option<Arc<dyn AccessPolicy>> {
    let mut slot = INSTALLED_POLICY.write().unwrap_or_else(PoisonError::into_inner);
    slot.take()
}

/// Returns the currently installed process-wide policy.
#[must_use]
pub fn installed_policy() -> Option<Arc<dyn AccessPolicy>> {
    INSTALLED_POLICY.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Returns true when the installed policy (if any) permits reading `key`.
pub(crate) fn installed_policy_allows(key: &str) -> bool {
    installed_policy().is_none_or(|policy| policy.allows_read(key))
}
