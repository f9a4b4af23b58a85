//! ABI layer of the chaingen contract generator.
//!
//! Turns a validated [`chaingen_schema::Schema`] into the machine-readable
//! interface descriptor:
//!
//! 1. [`resolve_field`] maps each declared field to its ABI type string
//!    (primitive name, record/variant name, plus `[]` / `?` / `$` suffixes).
//! 2. [`build_closure`] computes the transitive set of record types that
//!    must be emitted, seeded from action parameters and tables.
//! 3. [`assemble`] builds the final [`AbiDocument`] with deterministic,
//!    lexicographic ordering so re-runs are byte-identical.

mod closure;
mod document;
mod error;
mod primitive;
mod resolve;

pub use closure::build_closure;
pub use document::{
    assemble, AbiAction, AbiDocument, AbiField, AbiStruct, AbiTable, AbiVariant, ABI_VERSION,
};
pub use error::{AbiResult, TypeError};
pub use primitive::primitive_abi_type;
pub use resolve::resolve_field;
