//! Shared utilities: member selector parsing and consistency checks.

pub mod selector;
pub mod validation;

pub use selector::{deserialize_selector, parse_span};
pub use validation::{duplicate_member_names, validate_member_uniqueness, validate_shelf_references};
