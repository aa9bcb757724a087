// crates/propguard/tests/non_unicode_env.rs
// ============================================================================
// Module: Non-Unicode Environment Tests
// Description: Ambient reads of variables whose values are not valid UTF-8.
// Purpose: Validate that unusable values read as absent, not as errors.
// Dependencies: propguard
// ============================================================================

//! ## Overview
//! The environment is never mutated in-process. The test re-runs its own
//! binary with a non-UTF-8 variable supplied through `Command::env`; the
//! child sees the variable and performs the assertions.

#![cfg(unix)]
#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::env;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::process::Command;

use propguard::ProcessEnvStore;
use propguard::PropertyStore;
use propguard::get_property;
use propguard::get_property_or;

/// Variable carrying a non-UTF-8 value in the child process.
const NON_UNICODE_KEY: &str = "PROPGUARD_TEST_NON_UNICODE_VALUE";

/// Name of the test below, used to re-run only it in the child.
const TEST_NAME: &str = "non_unicode_value_reads_as_absent";

/// Tests that a set variable with a non-UTF-8 value is absent.
#[test]
fn non_unicode_value_reads_as_absent() {
    if env::var_os(NON_UNICODE_KEY).is_some() {
        assert_eq!(get_property(NON_UNICODE_KEY).unwrap(), None);
        assert_eq!(
            get_property_or(NON_UNICODE_KEY, "fallback".to_string()).unwrap(),
            "fallback".to_string()
        );
        assert_eq!(get_property_or(NON_UNICODE_KEY, None::<String>).unwrap(), None);
        assert_eq!(ProcessEnvStore.lookup(NON_UNICODE_KEY), Ok(None));
        return;
    }

    let exe = env::current_exe().unwrap();
    let status = Command::new(exe)
        .args([TEST_NAME, "--exact", "--test-threads=1"])
        .env(NON_UNICODE_KEY, OsStr::from_bytes(b"\xff\xfe"))
        .status()
        .unwrap();
    assert!(status.success(), "child run with non-UTF-8 value failed");
}
