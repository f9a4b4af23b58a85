//! Source emission for the chaingen contract generator.
//!
//! Turns a validated [`chaingen_schema::Schema`] into the generated
//! support source a contract links against:
//!
//! - table accessor types (multi-index and singleton), with numeric id
//!   constants, the primary-key accessor, and per-index getter/setter
//!   accessors ([`tables`])
//! - the `apply` dispatch routine matching on numeric action ids, with
//!   direct actions and notifications routed separately ([`dispatch`])
//!
//! Emission is pure text assembly; all semantic validation happened at
//! schema registration.

mod dispatch;
mod error;
mod tables;

pub use dispatch::{args_type_name, emit_dispatch};
pub use error::{EmitError, EmitResult};
pub use tables::{emit_tables, index_key_type, index_storage_type};

use chaingen_schema::Schema;

/// Emit the complete generated source for one contract: the table
/// accessors followed by the dispatch entry point.
pub fn emit_contract(schema: &Schema) -> EmitResult<String> {
    let mut out = String::new();
    out.push_str("// Generated by chaingen. Do not edit.\n\n");
    out.push_str(&emit_tables(schema)?);
    out.push_str(&emit_dispatch(schema)?);
    Ok(out)
}
