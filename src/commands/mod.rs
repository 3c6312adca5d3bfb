//! Command implementations
//!
//! Commands are methods on `Repository`, split the way Git splits its
//! surface:
//!
//! - `plumbing`: direct object manipulation (hash-object, cat-file,
//!   ls-objects)
//! - `porcelain`: user-facing workflows (init, commit, branch, checkout,
//!   status)

pub mod plumbing;
pub mod porcelain;
