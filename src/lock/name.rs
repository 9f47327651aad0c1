//! Lock name validation.

use crate::error::{FsLockError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Pattern every lock name must match.
pub const LOCK_NAME_PATTERN: &str = "^[a-z]+[a-z0-9.-]*$";

static LOCK_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LOCK_NAME_PATTERN).expect("Invalid lock name regex"));

/// Check that `name` is a valid lock name.
///
/// Names start with a lowercase letter and continue with lowercase letters,
/// digits, `.` or `-`, which keeps them safe as a single path component.
pub fn validate_name(name: &str) -> Result<()> {
    if LOCK_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(FsLockError::InvalidName {
            name: name.to_string(),
            pattern: LOCK_NAME_PATTERN,
        })
    }
}
