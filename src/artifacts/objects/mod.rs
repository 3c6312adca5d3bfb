//! Object types (blob, tree, commit)
//!
//! The closed set of immutable objects the store knows how to persist,
//! plus their identifiers, type tags and entry modes.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

pub const OBJECT_ID_LENGTH: usize = 40;
