//! Descriptor types for declared records, tables, actions, variants and
//! wrapper types.
//!
//! Descriptors are built once by the declaration front end, registered
//! into a [`crate::Schema`], and never mutated afterwards. Field order is
//! semantically significant everywhere: it fixes the wire layout of
//! records and the discriminant tags of variants.

use crate::Loc;

// ══════════════════════════════════════════════════════════════════════════════
// Fields
// ══════════════════════════════════════════════════════════════════════════════

/// The shape of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldShape {
    /// A single value.
    #[default]
    Scalar,
    /// A dynamically sized list of values (`[]T`).
    Slice,
    /// A pointer parameter — legal only on action parameters, where it
    /// signals that the handler may receive no value.
    Pointer,
}

/// One declared field: a record member or an action parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name; empty for the anonymous base field of a wrapper
    /// declaration.
    pub name: String,
    /// Declared type name: a primitive or the name of another declared
    /// record, variant or wrapper.
    pub type_name: String,
    pub shape: FieldShape,
    pub loc: Loc,
}

impl FieldDef {
    /// Scalar field shorthand.
    pub fn scalar(name: impl Into<String>, type_name: impl Into<String>, loc: Loc) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            shape: FieldShape::Scalar,
            loc,
        }
    }

    /// Slice field shorthand.
    pub fn slice(name: impl Into<String>, type_name: impl Into<String>, loc: Loc) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            shape: FieldShape::Slice,
            loc,
        }
    }

    pub fn is_slice(&self) -> bool {
        self.shape == FieldShape::Slice
    }

    pub fn is_pointer(&self) -> bool {
        self.shape == FieldShape::Pointer
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Records & Tables
// ══════════════════════════════════════════════════════════════════════════════

/// The kind of a secondary index, fixing its key width and storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    U64,
    U128,
    U256,
    F64,
    F128,
}

impl IndexKind {
    /// Parse the annotation spelling used by the front end.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IDX64" => Some(Self::U64),
            "IDX128" => Some(Self::U128),
            "IDX256" => Some(Self::U256),
            "IDXFloat64" => Some(Self::F64),
            "IDXFloat128" => Some(Self::F128),
            _ => None,
        }
    }
}

/// One secondary index over a table.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryIndexDef {
    pub kind: IndexKind,
    /// Accessor name, unique within the table.
    pub name: String,
    /// Expression yielding the key value from a row (`t.<field>` style).
    pub getter: String,
    /// Expression (or `%v`-bearing template) storing a key value back.
    pub setter: String,
}

/// Table attributes of a persisted record.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDef {
    /// Declared table name; must pass the identifier round trip.
    pub name: String,
    /// Exactly one persisted row, keyed by the table id itself. Singleton
    /// tables declare neither primary key nor secondary indexes.
    pub singleton: bool,
    /// Leave the table (and its record, unless reached otherwise) out of
    /// the emitted ABI.
    pub ignore_from_abi: bool,
    /// Expression yielding the primary key from a row. Required exactly
    /// once on non-singleton tables, forbidden on singletons.
    pub primary_key: Option<String>,
    pub indexes: Vec<SecondaryIndexDef>,
}

impl TableDef {
    /// Plain non-singleton table with a primary key and no indexes.
    pub fn with_primary(name: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            singleton: false,
            ignore_from_abi: false,
            primary_key: Some(primary_key.into()),
            indexes: Vec::new(),
        }
    }

    /// Singleton table.
    pub fn singleton(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            singleton: true,
            ignore_from_abi: false,
            primary_key: None,
            indexes: Vec::new(),
        }
    }
}

/// A declared record: the serialization unit. A record with a [`TableDef`]
/// is persisted; one without is a plain packer.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDef {
    pub name: String,
    /// Ordered members; order fixes the wire layout.
    pub fields: Vec<FieldDef>,
    pub table: Option<TableDef>,
    pub loc: Loc,
}

impl RecordDef {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>, loc: Loc) -> Self {
        Self {
            name: name.into(),
            fields,
            table: None,
            loc,
        }
    }

    pub fn with_table(mut self, table: TableDef) -> Self {
        self.table = Some(table);
        self
    }

    pub fn is_table(&self) -> bool {
        self.table.is_some()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Actions
// ══════════════════════════════════════════════════════════════════════════════

/// A declared action or notification handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDef {
    /// Declared action name; must pass the identifier round trip.
    pub name: String,
    /// Name of the handler function the dispatch routine invokes.
    pub handler: String,
    /// Name of the contract record the handler is a method of.
    pub receiver: String,
    /// Ordered parameters. These double as the fields of the action's
    /// synthetic ABI parameter struct.
    pub params: Vec<FieldDef>,
    /// Dispatched on incoming notifications instead of direct actions.
    pub notify: bool,
    /// The handler never reads its parameters from the payload; every
    /// parameter must then be pointer- or slice-shaped so the dispatcher
    /// can pass placeholders.
    pub ignore_params: bool,
    pub loc: Loc,
}

// ══════════════════════════════════════════════════════════════════════════════
// Variants & Wrappers
// ══════════════════════════════════════════════════════════════════════════════

/// A closed set of alternative types sharing one wire slot.
///
/// Alternative order fixes the discriminant tag.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantDef {
    pub name: String,
    pub alternatives: Vec<String>,
    pub loc: Loc,
}

/// Which wrapper semantics a declaration carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperKind {
    /// Absent state encodes as a zero-length buffer; may only appear as a
    /// trailing field.
    BinaryExtension,
    /// Absent state encodes as a single `0` byte.
    Optional,
}

impl WrapperKind {
    /// ABI type-string suffix for fields of this wrapper.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::BinaryExtension => "$",
            Self::Optional => "?",
        }
    }
}

/// A declared wrapper type: a named Optional or BinaryExtension around a
/// single payload field.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapperDef {
    pub name: String,
    pub kind: WrapperKind,
    pub payload: FieldDef,
    pub loc: Loc,
}

impl WrapperDef {
    /// Recognize a two-field declaration as a wrapper.
    ///
    /// The structural precondition: exactly two fields, the first
    /// anonymous and naming one of the two wrapper base types, the second
    /// carrying the payload. Anything else is an ordinary record.
    pub fn recognize(name: &str, fields: &[FieldDef], loc: Loc) -> Option<Self> {
        if fields.len() != 2 {
            return None;
        }
        let base = &fields[0];
        if !base.name.is_empty() {
            return None;
        }
        let kind = match base.type_name.as_str() {
            "BinaryExtension" => WrapperKind::BinaryExtension,
            "Optional" => WrapperKind::Optional,
            _ => return None,
        };
        let payload = &fields[1];
        if payload.name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            kind,
            payload: payload.clone(),
            loc,
        })
    }
}
