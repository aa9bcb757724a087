// crates/propguard/src/key.rs
// ============================================================================
// Module: Property Keys
// Description: Well-formedness checks for property keys.
// Purpose: Reject keys no property store can address before any lookup.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Property keys are plain `&str` values. A key is well formed when it is
//! non-empty and carries no NUL byte. The process environment additionally
//! forbids `=` inside a variable name.
//! Invariants:
//! - Validation is performed by stores, never by the reader functions.
//! - Validation never inspects or transforms the key beyond these checks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Malformed property key.
///
/// # Invariants
/// - Variants are stable; messages are short and lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The key is the empty string.
    #[error("empty key")]
    Empty,
    /// The key contains a NUL byte.
    #[error("null byte in key")]
    ContainsNul,
    /// The key contains `=`, which the process environment cannot address.
    #[error("'=' in key")]
    ContainsEquals,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a key against the rules shared by every store.
///
/// # Errors
///
/// Returns [`KeyError::Empty`] or [`KeyError::ContainsNul`].
pub fn validate_key(key: &str) -> Result<(), KeyError> {
    if key.is_empty() {
        return Err(KeyError::Empty);
    }
    if key.contains('\0') {
        return Err(KeyError::ContainsNul);
    }
    Ok(())
}

/// Validates a key for lookup in the process environment.
///
/// # Errors
///
/// Returns any [`validate_key`] error, or [`KeyError::ContainsEquals`].
pub fn validate_env_key(key: &str) -> Result<(), KeyError> {
    validate_key(key)?;
    if key.contains('=') {
        return Err(KeyError::ContainsEquals);
    }
    Ok(())
}
