//! The per-pass schema registry.
//!
//! One [`Schema`] holds every declaration of a single generation pass,
//! keyed by name for O(1) lookup during resolution and closure building.
//! All validation happens at registration time, so downstream passes can
//! assume a well-formed model. The registry is built once, read many
//! times, and discarded with the pass; nothing here outlives an
//! invocation.

use std::collections::HashMap;

use crate::model::*;
use crate::name;
use crate::{Loc, SchemaError, SchemaResult};

/// Registry of all declarations in one generation pass.
#[derive(Debug, Default)]
pub struct Schema {
    records: HashMap<String, RecordDef>,
    variants: HashMap<String, VariantDef>,
    wrappers: HashMap<String, WrapperDef>,
    actions: Vec<ActionDef>,
    /// Registration order of records, for passes that iterate.
    record_order: Vec<String>,
    variant_order: Vec<String>,
    wrapper_order: Vec<String>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ─────────────────────────────────────────────────────

    /// Register a record (plain packer or table).
    pub fn add_record(&mut self, record: RecordDef) -> SchemaResult<()> {
        self.check_fresh_type_name(&record.name, &record.loc)?;

        for field in &record.fields {
            if field.is_pointer() {
                return Err(SchemaError::PointerField {
                    owner: record.name.clone(),
                    field: field.name.clone(),
                    loc: field.loc.clone(),
                });
            }
            if field.name.is_empty() {
                return Err(SchemaError::AnonymousField {
                    owner: record.name.clone(),
                    type_name: field.type_name.clone(),
                    loc: field.loc.clone(),
                });
            }
        }

        if let Some(table) = &record.table {
            self.validate_table(table, &record.loc)?;
        }

        self.record_order.push(record.name.clone());
        self.records.insert(record.name.clone(), record);
        Ok(())
    }

    fn validate_table(&self, table: &TableDef, loc: &Loc) -> SchemaResult<()> {
        if !name::is_valid(&table.name) {
            return Err(SchemaError::InvalidName {
                name: table.name.clone(),
                loc: loc.clone(),
            });
        }

        let id = name::encode(&table.name);
        if id & 0xf != 0 {
            return Err(SchemaError::ReservedIndexBits {
                table: table.name.clone(),
                id,
                loc: loc.clone(),
            });
        }

        if table.singleton {
            if table.primary_key.is_some() {
                return Err(SchemaError::SingletonKey {
                    table: table.name.clone(),
                    what: "primary key",
                    loc: loc.clone(),
                });
            }
            if !table.indexes.is_empty() {
                return Err(SchemaError::SingletonKey {
                    table: table.name.clone(),
                    what: "secondary index",
                    loc: loc.clone(),
                });
            }
            return Ok(());
        }

        match table.primary_key.as_deref() {
            None | Some("") => {
                return Err(SchemaError::MissingPrimaryKey {
                    table: table.name.clone(),
                    loc: loc.clone(),
                });
            }
            Some(_) => {}
        }

        for (i, index) in table.indexes.iter().enumerate() {
            let component = if index.name.is_empty() {
                Some("name")
            } else if index.getter.is_empty() {
                Some("getter")
            } else if index.setter.is_empty() {
                Some("setter")
            } else {
                None
            };
            if let Some(what) = component {
                return Err(SchemaError::MalformedIndex {
                    table: table.name.clone(),
                    what,
                    loc: loc.clone(),
                });
            }
            if table.indexes[..i].iter().any(|prev| prev.name == index.name) {
                return Err(SchemaError::DuplicateIndex {
                    table: table.name.clone(),
                    index: index.name.clone(),
                    loc: loc.clone(),
                });
            }
        }
        Ok(())
    }

    /// Register an action or notification handler.
    pub fn add_action(&mut self, action: ActionDef) -> SchemaResult<()> {
        if !name::is_valid(&action.name) {
            return Err(SchemaError::InvalidName {
                name: action.name.clone(),
                loc: action.loc.clone(),
            });
        }
        if self.actions.iter().any(|a| a.name == action.name) {
            return Err(SchemaError::DuplicateAction {
                name: action.name.clone(),
                loc: action.loc.clone(),
            });
        }

        for param in &action.params {
            if param.name.is_empty() {
                return Err(SchemaError::AnonymousField {
                    owner: action.name.clone(),
                    type_name: param.type_name.clone(),
                    loc: param.loc.clone(),
                });
            }
            if action.ignore_params && !param.is_pointer() && !param.is_slice() {
                return Err(SchemaError::IgnoredParamShape {
                    action: action.name.clone(),
                    param: param.name.clone(),
                    loc: param.loc.clone(),
                });
            }
        }

        self.actions.push(action);
        Ok(())
    }

    /// Register a variant type.
    pub fn add_variant(&mut self, variant: VariantDef) -> SchemaResult<()> {
        self.check_fresh_type_name(&variant.name, &variant.loc)?;
        for (i, alt) in variant.alternatives.iter().enumerate() {
            if variant.alternatives[..i].contains(alt) {
                return Err(SchemaError::DuplicateAlternative {
                    variant: variant.name.clone(),
                    type_name: alt.clone(),
                    loc: variant.loc.clone(),
                });
            }
        }
        self.variant_order.push(variant.name.clone());
        self.variants.insert(variant.name.clone(), variant);
        Ok(())
    }

    /// Register an Optional / BinaryExtension wrapper type.
    pub fn add_wrapper(&mut self, wrapper: WrapperDef) -> SchemaResult<()> {
        self.check_fresh_type_name(&wrapper.name, &wrapper.loc)?;
        self.wrapper_order.push(wrapper.name.clone());
        self.wrappers.insert(wrapper.name.clone(), wrapper);
        Ok(())
    }

    /// Records, variants and wrappers share one type namespace.
    fn check_fresh_type_name(&self, type_name: &str, loc: &Loc) -> SchemaResult<()> {
        if self.records.contains_key(type_name)
            || self.variants.contains_key(type_name)
            || self.wrappers.contains_key(type_name)
        {
            return Err(SchemaError::DuplicateType {
                name: type_name.to_string(),
                loc: loc.clone(),
            });
        }
        Ok(())
    }

    // ── Lookup ───────────────────────────────────────────────────────────

    pub fn record(&self, type_name: &str) -> Option<&RecordDef> {
        self.records.get(type_name)
    }

    pub fn variant(&self, type_name: &str) -> Option<&VariantDef> {
        self.variants.get(type_name)
    }

    pub fn wrapper(&self, type_name: &str) -> Option<&WrapperDef> {
        self.wrappers.get(type_name)
    }

    /// Records in registration order.
    pub fn records(&self) -> impl Iterator<Item = &RecordDef> {
        self.record_order.iter().filter_map(|n| self.records.get(n))
    }

    /// Variants in registration order.
    pub fn variants(&self) -> impl Iterator<Item = &VariantDef> {
        self.variant_order.iter().filter_map(|n| self.variants.get(n))
    }

    /// Wrappers in registration order.
    pub fn wrappers(&self) -> impl Iterator<Item = &WrapperDef> {
        self.wrapper_order.iter().filter_map(|n| self.wrappers.get(n))
    }

    pub fn actions(&self) -> &[ActionDef] {
        &self.actions
    }

    /// Table-bearing records in registration order.
    pub fn tables(&self) -> impl Iterator<Item = &RecordDef> {
        self.records().filter(|r| r.is_table())
    }
}
