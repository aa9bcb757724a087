// crates/propguard/src/config.rs
// ============================================================================
// Module: Reader Configuration
// Description: Policy and audit settings for property reads.
// Purpose: Provide strict, fail-closed validation of reader settings.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`ReaderConfig`] describes the access policy and audit sink a host wants
//! for property reads. It derives `Deserialize` so hosts can embed it in
//! their own configuration files; this crate does not load files itself.
//! Invalid settings fail closed with [`ConfigError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::PropertyAuditSink;
use crate::audit::StderrAuditSink;
use crate::key::validate_key;
use crate::policy::AccessPolicy;
use crate::policy::KeyAccessPolicy;
use crate::policy::install_policy;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Property reader configuration.
///
/// # Invariants
/// - Every allowlist and denylist entry is a well-formed key.
/// - A file audit sink carries a non-empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReaderConfig {
    /// Access policy applied to reads.
    #[serde(default)]
    pub policy: KeyAccessPolicy,
    /// Audit sink selection.
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Audit sink selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sink", rename_all = "snake_case")]
pub enum AuditConfig {
    /// Discard audit events.
    #[default]
    None,
    /// Write JSON lines to stderr.
    Stderr,
    /// Append JSON lines to a file.
    File {
        /// Audit log path.
        path: PathBuf,
    },
}

impl ReaderConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a policy entry is not a valid
    /// key or the audit file path is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(allowlist) = &self.policy.allowlist {
            for key in allowlist {
                validate_list_key("policy.allowlist", key)?;
            }
        }
        for key in &self.policy.denylist {
            validate_list_key("policy.denylist", key)?;
        }
        if let AuditConfig::File {
            path,
        } = &self.audit
            && path.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid("audit.path must be non-empty".to_string()));
        }
        Ok(())
    }

    /// Builds the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails or the audit file cannot
    /// be opened.
    pub fn audit_sink(&self) -> Result<Arc<dyn PropertyAuditSink>, ConfigError> {
        self.validate()?;
        match &self.audit {
            AuditConfig::None => Ok(Arc::new(NoopAuditSink)),
            AuditConfig::Stderr => Ok(Arc::new(StderrAuditSink)),
            AuditConfig::File {
                path,
            } => {
                let sink =
                    FileAuditSink::new(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }

    /// Validates the policy and installs it process-wide.
    ///
    /// Returns the previously installed policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when validation fails; nothing is
    /// installed in that case.
    pub fn install_policy(&self) -> Result<Option<Arc<dyn AccessPolicy>>, ConfigError> {
        self.validate()?;
        Ok(install_policy(Arc::new(self.policy.clone())))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Reader configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while preparing a configured resource.
    #[error("config io error: {0}")]
    Io(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates a policy list entry as a property key.
fn validate_list_key(field: &str, key: &str) -> Result<(), ConfigError> {
    validate_key(key).map_err(|err| ConfigError::Invalid(format!("{field} entry: {err}")))
}
