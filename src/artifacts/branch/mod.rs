//! Branch name validation
//!
//! Branch names share their alphabet with the attached-HEAD grammar: a HEAD
//! file saying `ref: refs/heads/<name>` must round-trip through the same
//! pattern, so anything outside it is rejected at creation time.

pub mod branch_name;

/// Pattern every branch name must match in full
pub const BRANCH_NAME_REGEX: &str = r"^[A-Za-z0-9\-_]+$";
