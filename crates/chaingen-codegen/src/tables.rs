//! Table accessor emission.
//!
//! For every table-bearing record this produces the accessor surface the
//! generated contract links against: the numeric table id constants, the
//! multi-index (or singleton) handle type, the primary-key accessor built
//! from the declared key expression, and one getter/setter/index accessor
//! per secondary index.
//!
//! Key expressions are declared against a row receiver named `t`, so they
//! can be spliced into the emitted accessor bodies verbatim. Setter
//! expressions may carry a `%v` placeholder for the incoming value;
//! without one the setter is a plain assignment target.

use std::fmt::Write;

use chaingen_schema::{name, IndexKind, RecordDef, Schema, SecondaryIndexDef, TableDef};

use crate::error::EmitResult;

/// Low 4 bits of a table id are reserved to number its secondary indexes.
const INDEX_ID_MASK: u64 = 0xffff_ffff_ffff_fff0;

/// Storage handle type for an index kind.
pub fn index_storage_type(kind: IndexKind) -> &'static str {
    match kind {
        IndexKind::U64 => "Idx64Table",
        IndexKind::U128 => "Idx128Table",
        IndexKind::U256 => "Idx256Table",
        IndexKind::F64 => "IdxFloat64Table",
        IndexKind::F128 => "IdxFloat128Table",
    }
}

/// Key value type for an index kind.
pub fn index_key_type(kind: IndexKind) -> &'static str {
    match kind {
        IndexKind::U64 => "u64",
        IndexKind::U128 => "u128",
        IndexKind::U256 => "Uint256",
        IndexKind::F64 => "f64",
        IndexKind::F128 => "Float128",
    }
}

/// `SecondaryType` discriminant name for an index kind.
fn index_secondary_type(kind: IndexKind) -> &'static str {
    match kind {
        IndexKind::U64 => "Idx64",
        IndexKind::U128 => "Idx128",
        IndexKind::U256 => "Idx256",
        IndexKind::F64 => "IdxFloat64",
        IndexKind::F128 => "IdxFloat128",
    }
}

/// Emitted setter body: `%v` substitution, or plain assignment.
fn setter_body(index: &SecondaryIndexDef) -> String {
    if index.setter.contains("%v") {
        index.setter.replace("%v", "value")
    } else {
        format!("{} = value", index.setter)
    }
}

/// Constant-name prefix for a record.
fn const_prefix(record_name: &str) -> String {
    record_name.to_uppercase()
}

/// Emit the accessor modules for every table in the schema, in
/// registration order.
pub fn emit_tables(schema: &Schema) -> EmitResult<String> {
    let mut out = String::new();
    for record in schema.tables() {
        let table = match &record.table {
            Some(table) => table,
            None => continue,
        };
        if table.singleton {
            emit_singleton(&mut out, record, table)?;
        } else {
            emit_multi_index(&mut out, record, table)?;
        }
    }
    Ok(out)
}

fn emit_multi_index(out: &mut String, record: &RecordDef, table: &TableDef) -> EmitResult<()> {
    let prefix = const_prefix(&record.name);
    let id = name::encode(&table.name);

    writeln!(out, "// table {}", table.name)?;
    writeln!(out, "pub const {prefix}_TABLE_ID: u64 = {id:#x};")?;
    writeln!(
        out,
        "pub const {prefix}_FIRST_INDEX_ID: u64 = {:#x};",
        id & INDEX_ID_MASK
    )?;
    writeln!(
        out,
        "pub const {prefix}_INDEXES: [SecondaryType; {}] = [",
        table.indexes.len()
    )?;
    for index in &table.indexes {
        writeln!(out, "    SecondaryType::{},", index_secondary_type(index.kind))?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;

    writeln!(out, "pub struct {}Table {{", record.name)?;
    writeln!(out, "    mi: MultiIndex<{}>,", record.name)?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "impl {}Table {{", record.name)?;
    writeln!(out, "    pub fn new(code: Name, scope: Name) -> Self {{")?;
    writeln!(
        out,
        "        let mi = MultiIndex::new(code, scope, Name({prefix}_TABLE_ID), &{prefix}_INDEXES);"
    )?;
    writeln!(out, "        Self {{ mi }}")?;
    writeln!(out, "    }}")?;

    if let Some(primary_key) = &table.primary_key {
        writeln!(out)?;
        writeln!(out, "    pub fn primary_key(t: &{}) -> u64 {{", record.name)?;
        writeln!(out, "        {primary_key}")?;
        writeln!(out, "    }}")?;
    }

    for (number, index) in table.indexes.iter().enumerate() {
        let storage = index_storage_type(index.kind);
        let key = index_key_type(index.kind);
        writeln!(out)?;
        writeln!(out, "    pub fn idx_{}(&self) -> {storage} {{", index.name)?;
        writeln!(
            out,
            "        self.mi.secondary_index({prefix}_FIRST_INDEX_ID + {number})"
        )?;
        writeln!(out, "    }}")?;
        writeln!(out)?;
        writeln!(
            out,
            "    pub fn get_{}(t: &{}) -> {key} {{",
            index.name, record.name
        )?;
        writeln!(out, "        {}", index.getter)?;
        writeln!(out, "    }}")?;
        writeln!(out)?;
        writeln!(
            out,
            "    pub fn set_{}(t: &mut {}, value: {key}) {{",
            index.name, record.name
        )?;
        writeln!(out, "        {};", setter_body(index))?;
        writeln!(out, "    }}")?;
    }

    writeln!(out, "}}")?;
    writeln!(out)?;
    Ok(())
}

fn emit_singleton(out: &mut String, record: &RecordDef, table: &TableDef) -> EmitResult<()> {
    let prefix = const_prefix(&record.name);
    let id = name::encode(&table.name);

    writeln!(out, "// singleton {}", table.name)?;
    writeln!(out, "pub const {prefix}_TABLE_ID: u64 = {id:#x};")?;
    writeln!(out)?;

    // The single row is keyed by the table id itself.
    writeln!(out, "impl {} {{", record.name)?;
    writeln!(out, "    pub fn primary_key(&self) -> u64 {{")?;
    writeln!(out, "        {prefix}_TABLE_ID")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "pub struct {}Table {{", record.name)?;
    writeln!(out, "    db: Singleton<{}>,", record.name)?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "impl {}Table {{", record.name)?;
    writeln!(out, "    pub fn new(code: Name, scope: Name) -> Self {{")?;
    writeln!(
        out,
        "        let db = Singleton::new(code, scope, Name({prefix}_TABLE_ID));"
    )?;
    writeln!(out, "        Self {{ db }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(
        out,
        "    pub fn set(&mut self, data: &{}, payer: Name) {{",
        record.name
    )?;
    writeln!(out, "        self.db.set(data, payer);")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    pub fn get(&self) -> Option<{}> {{", record.name)?;
    writeln!(out, "        self.db.get()")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    pub fn remove(&mut self) {{")?;
    writeln!(out, "        self.db.remove();")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    Ok(())
}
