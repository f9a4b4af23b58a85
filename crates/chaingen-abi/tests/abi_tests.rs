//! Integration tests for ABI assembly.
//!
//! Tests validate:
//! - The exact key set and constants of the emitted document
//! - Deterministic ordering independent of declaration order
//! - Table entries for annotated table records
//! - Failure on unresolvable field types

use chaingen_abi::{assemble, ABI_VERSION};
use chaingen_schema::{
    ActionDef, FieldDef, Loc, RecordDef, Schema, SecondaryIndexDef, TableDef, VariantDef,
    IndexKind,
};

fn loc() -> Loc {
    Loc::new("contract.rs", 1)
}

fn action(name: &str, params: Vec<FieldDef>) -> ActionDef {
    ActionDef {
        name: name.into(),
        handler: name.into(),
        receiver: "Contract".into(),
        params,
        notify: false,
        ignore_params: false,
        loc: loc(),
    }
}

/// A small contract: one table with a secondary index, two actions, one
/// variant, one nested record.
fn sample_schema(reversed: bool) -> Schema {
    let mut schema = Schema::new();

    let nested = RecordDef::new(
        "Position",
        vec![
            FieldDef::scalar("x", "i32", loc()),
            FieldDef::scalar("y", "i32", loc()),
        ],
        loc(),
    );

    let mut table = TableDef::with_primary("mytable", "t.id");
    table.indexes.push(SecondaryIndexDef {
        kind: IndexKind::U64,
        name: "byscore".into(),
        getter: "t.score".into(),
        setter: "t.score".into(),
    });
    let row = RecordDef::new(
        "MyRow",
        vec![
            FieldDef::scalar("id", "u64", loc()),
            FieldDef::scalar("score", "u64", loc()),
            FieldDef::scalar("pos", "Position", loc()),
        ],
        loc(),
    )
    .with_table(table);

    let variant = VariantDef {
        name: "IdOrName".into(),
        alternatives: vec!["u64".into(), "String".into()],
        loc: loc(),
    };

    let add = action(
        "add",
        vec![
            FieldDef::scalar("id", "u64", loc()),
            FieldDef::slice("memo", "u8", loc()),
        ],
    );
    let clear = action("clear", vec![]);

    if reversed {
        schema.add_action(clear).unwrap();
        schema.add_action(add).unwrap();
        schema.add_variant(variant).unwrap();
        schema.add_record(row).unwrap();
        schema.add_record(nested).unwrap();
    } else {
        schema.add_record(nested).unwrap();
        schema.add_record(row).unwrap();
        schema.add_variant(variant).unwrap();
        schema.add_action(add).unwrap();
        schema.add_action(clear).unwrap();
    }
    schema
}

#[test]
fn test_document_shape() {
    let abi = assemble(&sample_schema(false)).unwrap();

    assert_eq!(abi.version, ABI_VERSION);
    assert!(abi.types.is_empty());
    assert!(abi.ricardian_clauses.is_empty());
    assert!(abi.abi_extensions.is_empty());
    assert!(abi.error_messages.is_empty());

    // Closure records + one struct per action.
    let names: Vec<_> = abi.structs.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["MyRow", "Position", "add", "clear"]);

    let add = abi.structs.iter().find(|s| s.name == "add").unwrap();
    assert_eq!(add.fields[0].type_name, "uint64");
    assert_eq!(add.fields[1].type_name, "bytes");
}

#[test]
fn test_table_entry() {
    let abi = assemble(&sample_schema(false)).unwrap();
    assert_eq!(abi.tables.len(), 1);
    let table = &abi.tables[0];
    assert_eq!(table.name, "mytable");
    assert_eq!(table.type_name, "MyRow");
    assert_eq!(table.index_type, "i64");
    assert!(table.key_names.is_empty());
    assert!(table.key_types.is_empty());
}

#[test]
fn test_variant_entry() {
    let abi = assemble(&sample_schema(false)).unwrap();
    assert_eq!(abi.variants.len(), 1);
    assert_eq!(abi.variants[0].name, "IdOrName");
    assert_eq!(abi.variants[0].types, vec!["uint64", "string"]);
}

#[test]
fn test_json_key_order() {
    let json = assemble(&sample_schema(false)).unwrap().to_json();
    let keys = [
        "\"version\"",
        "\"structs\"",
        "\"types\"",
        "\"actions\"",
        "\"tables\"",
        "\"ricardian_clauses\"",
        "\"variants\"",
        "\"abi_extensions\"",
        "\"error_messages\"",
    ];
    let mut last = 0;
    for key in keys {
        let pos = json.find(key).unwrap_or_else(|| panic!("missing key {key}"));
        assert!(pos > last || last == 0, "key {key} out of order");
        last = pos;
    }
    assert!(json.contains("\"eosio::abi/1.1\""));
}

#[test]
fn test_json_artifact_parses_back() {
    let json = assemble(&sample_schema(false)).unwrap().to_json();
    assert!(!json.is_empty());
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["version"], "eosio::abi/1.1");
    assert_eq!(parsed["tables"][0]["name"], "mytable");
}

#[test]
fn test_declaration_order_does_not_matter() {
    let forward = assemble(&sample_schema(false)).unwrap().to_json();
    let reversed = assemble(&sample_schema(true)).unwrap().to_json();
    assert_eq!(forward, reversed);
}

#[test]
fn test_unresolvable_field_aborts_assembly() {
    let mut schema = Schema::new();
    schema
        .add_record(RecordDef::new(
            "Bad",
            vec![FieldDef::scalar("x", "Mystery", loc())],
            loc(),
        ))
        .unwrap();
    schema
        .add_action(action("use.it", vec![FieldDef::scalar("b", "Bad", loc())]))
        .unwrap();

    let err = assemble(&schema).unwrap_err();
    assert_eq!(err.type_name, "Mystery");
}

#[test]
fn test_ignored_table_left_out() {
    let mut schema = Schema::new();
    let mut table = TableDef::with_primary("hidden", "t.id");
    table.ignore_from_abi = true;
    schema
        .add_record(
            RecordDef::new("Hidden", vec![FieldDef::scalar("id", "u64", loc())], loc())
                .with_table(table),
        )
        .unwrap();

    let abi = assemble(&schema).unwrap();
    assert!(abi.tables.is_empty());
    assert!(abi.structs.is_empty());
}
