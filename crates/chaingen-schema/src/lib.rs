//! Schema model for the chaingen contract generator.
//!
//! This crate defines the descriptor types produced by the declaration
//! front end (records, tables, actions, variants, wrapper types), the
//! base-32 identifier codec used to derive numeric table/action ids, and
//! the [`Schema`] registry that validates and owns one generation pass's
//! worth of declarations.

mod error;
mod loc;
mod model;
mod schema;

pub mod name;

pub use error::{SchemaError, SchemaResult};
pub use loc::Loc;
pub use model::{
    ActionDef, FieldDef, FieldShape, IndexKind, RecordDef, SecondaryIndexDef, TableDef,
    VariantDef, WrapperDef, WrapperKind,
};
pub use schema::Schema;
