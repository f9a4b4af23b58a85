//! The ABI descriptor document and its assembly.

use serde::{Deserialize, Serialize};

use chaingen_schema::{FieldDef, Schema};

use crate::closure::build_closure;
use crate::error::AbiResult;
use crate::resolve::resolve_field;

/// Version literal emitted into every document.
pub const ABI_VERSION: &str = "eosio::abi/1.1";

/// One field of an ABI struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One struct entry: a closure record or an action's parameter struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiStruct {
    pub name: String,
    /// Always empty; struct inheritance is not generated.
    pub base: String,
    pub fields: Vec<AbiField>,
}

/// One action entry. `type` always equals `name` (the parameter struct is
/// named after the action).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiAction {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub ricardian_contract: String,
}

/// One table entry. The primary index is always the 64-bit one; key
/// names/types are carried by the row struct instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiTable {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub index_type: String,
    pub key_names: Vec<String>,
    pub key_types: Vec<String>,
}

/// One variant entry with its resolved alternative types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiVariant {
    pub name: String,
    pub types: Vec<String>,
}

/// The complete descriptor document.
///
/// Field order here fixes the JSON key order; the four empty lists are
/// reserved for forward compatibility and always serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiDocument {
    pub version: String,
    pub structs: Vec<AbiStruct>,
    pub types: Vec<String>,
    pub actions: Vec<AbiAction>,
    pub tables: Vec<AbiTable>,
    pub ricardian_clauses: Vec<String>,
    pub variants: Vec<AbiVariant>,
    pub abi_extensions: Vec<String>,
    pub error_messages: Vec<String>,
}

impl AbiDocument {
    /// Serialize to the canonical pretty-printed JSON artifact form.
    pub fn to_json(&self) -> String {
        // No map keys anywhere in the document, so this cannot fail; an
        // empty artifact must never be produced in its place.
        serde_json::to_string_pretty(self).expect("ABI document serialization failed")
    }
}

/// Assemble the descriptor document from a validated schema.
///
/// Emission order is deterministic regardless of declaration order:
/// `structs`, `types`, `actions`, `tables` and `variants` are all sorted
/// lexicographically by name. Any field that fails resolution aborts
/// assembly with its [`crate::TypeError`].
pub fn assemble(schema: &Schema) -> AbiResult<AbiDocument> {
    let closure = build_closure(schema);

    let mut structs = Vec::with_capacity(closure.len() + schema.actions().len());
    for record_name in &closure {
        let Some(record) = schema.record(record_name) else {
            continue;
        };
        if record.table.as_ref().is_some_and(|t| t.ignore_from_abi) {
            continue;
        }
        structs.push(AbiStruct {
            name: record.name.clone(),
            base: String::new(),
            fields: resolve_fields(schema, &record.fields)?,
        });
    }

    for action in schema.actions() {
        structs.push(AbiStruct {
            name: action.name.clone(),
            base: String::new(),
            fields: resolve_fields(schema, &action.params)?,
        });
    }

    let mut actions: Vec<AbiAction> = schema
        .actions()
        .iter()
        .map(|action| AbiAction {
            name: action.name.clone(),
            type_name: action.name.clone(),
            ricardian_contract: String::new(),
        })
        .collect();

    let mut tables = Vec::new();
    for record in schema.tables() {
        // Closure membership is guaranteed for tables, but keep the
        // lookup symmetric with struct emission.
        if !closure.contains(&record.name) {
            continue;
        }
        let Some(table) = &record.table else { continue };
        if table.ignore_from_abi {
            continue;
        }
        tables.push(AbiTable {
            name: table.name.clone(),
            type_name: record.name.clone(),
            index_type: "i64".to_string(),
            key_names: Vec::new(),
            key_types: Vec::new(),
        });
    }

    let mut variants = Vec::new();
    for variant in schema.variants() {
        let mut types = Vec::with_capacity(variant.alternatives.len());
        for alt in &variant.alternatives {
            let field = FieldDef::scalar("", alt.clone(), variant.loc.clone());
            types.push(resolve_field(schema, &field)?);
        }
        variants.push(AbiVariant {
            name: variant.name.clone(),
            types,
        });
    }

    structs.sort_by(|a, b| a.name.cmp(&b.name));
    actions.sort_by(|a, b| a.name.cmp(&b.name));
    tables.sort_by(|a, b| a.name.cmp(&b.name));
    variants.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(AbiDocument {
        version: ABI_VERSION.to_string(),
        structs,
        types: Vec::new(),
        actions,
        tables,
        ricardian_clauses: Vec::new(),
        variants,
        abi_extensions: Vec::new(),
        error_messages: Vec::new(),
    })
}

fn resolve_fields(schema: &Schema, fields: &[FieldDef]) -> AbiResult<Vec<AbiField>> {
    fields
        .iter()
        .map(|field| {
            Ok(AbiField {
                name: field.name.clone(),
                type_name: resolve_field(schema, field)?,
            })
        })
        .collect()
}
