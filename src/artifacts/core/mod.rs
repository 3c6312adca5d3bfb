//! Shared core types
//!
//! - `error`: the closed error taxonomy used by every repository component

pub mod error;
