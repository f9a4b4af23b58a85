//! Schema-level error types.

use crate::Loc;
use thiserror::Error;

/// Errors raised while registering declarations into a [`crate::Schema`].
///
/// Any single error aborts the whole generation pass; no partial artifact
/// is ever written.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A declared table, action, or contract name fails the identifier
    /// round trip.
    #[error("{loc}: invalid identifier `{name}` (allowed: `.`, `1`-`5`, `a`-`z`, at most 13 characters)")]
    InvalidName { name: String, loc: Loc },

    /// The same action name declared twice.
    #[error("{loc}: duplicate action name `{name}`")]
    DuplicateAction { name: String, loc: Loc },

    /// The same record or wrapper name declared twice.
    #[error("{loc}: duplicate type name `{name}`")]
    DuplicateType { name: String, loc: Loc },

    /// The same secondary index name declared twice on one table.
    #[error("{loc}: duplicate index name `{index}` on table `{table}`")]
    DuplicateIndex {
        table: String,
        index: String,
        loc: Loc,
    },

    /// A singleton table declaring a primary key or secondary index.
    #[error("{loc}: singleton table `{table}` cannot declare a {what} explicitly")]
    SingletonKey {
        table: String,
        what: &'static str,
        loc: Loc,
    },

    /// A non-singleton table without a primary key.
    #[error("{loc}: table `{table}` has no primary key")]
    MissingPrimaryKey { table: String, loc: Loc },

    /// A secondary index annotation with an empty component.
    #[error("{loc}: malformed secondary index on table `{table}`: empty {what}")]
    MalformedIndex {
        table: String,
        what: &'static str,
        loc: Loc,
    },

    /// A pointer-shaped field inside a record or table declaration, or in
    /// a non-ignored action's parameter list.
    #[error("{loc}: pointer-shaped field `{field}` is not allowed in `{owner}`")]
    PointerField {
        owner: String,
        field: String,
        loc: Loc,
    },

    /// An ignored action with a parameter the dispatcher cannot placeholder.
    #[error("{loc}: parameter `{param}` of ignored action `{action}` must be pointer- or slice-shaped")]
    IgnoredParamShape {
        action: String,
        param: String,
        loc: Loc,
    },

    /// A field without a name outside the wrapper pattern.
    #[error("{loc}: anonymous field of type `{type_name}` is not supported in `{owner}`")]
    AnonymousField {
        owner: String,
        type_name: String,
        loc: Loc,
    },

    /// A table id with reserved low bits set, leaving no room for the
    /// secondary-index numeric namespace.
    #[error(
        "{loc}: table name `{table}` encodes to {id:#x}, which has its low 4 bits set; \
         secondary indexes need those bits free (try a name ending in fewer, earlier characters)"
    )]
    ReservedIndexBits { table: String, id: u64, loc: Loc },

    /// A variant listing the same alternative twice.
    #[error("{loc}: duplicated type `{type_name}` in variant `{variant}`")]
    DuplicateAlternative {
        variant: String,
        type_name: String,
        loc: Loc,
    },
}

/// Schema result type alias.
pub type SchemaResult<T> = Result<T, SchemaError>;
