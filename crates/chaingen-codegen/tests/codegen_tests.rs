//! Whole-contract emission tests.

use chaingen_codegen::emit_contract;
use chaingen_schema::{
    name, ActionDef, FieldDef, IndexKind, Loc, RecordDef, Schema, SecondaryIndexDef, TableDef,
};

fn loc() -> Loc {
    Loc::new("contract.rs", 1)
}

fn example_schema() -> Schema {
    let mut schema = Schema::new();

    let mut table = TableDef::with_primary("mytable", "t.primary");
    table.indexes.push(SecondaryIndexDef {
        kind: IndexKind::U64,
        name: "bya1".into(),
        getter: "t.a1".into(),
        setter: "t.a1".into(),
    });
    schema
        .add_record(
            RecordDef::new(
                "MyData",
                vec![
                    FieldDef::scalar("primary", "u64", loc()),
                    FieldDef::scalar("a1", "u64", loc()),
                ],
                loc(),
            )
            .with_table(table),
        )
        .unwrap();

    schema
        .add_action(ActionDef {
            name: "update".into(),
            handler: "update".into(),
            receiver: "Contract".into(),
            params: vec![FieldDef::scalar("primary", "u64", loc())],
            notify: false,
            ignore_params: false,
            loc: loc(),
        })
        .unwrap();

    schema
}

#[test]
fn test_contract_emission_covers_tables_and_dispatch() {
    let schema = example_schema();
    let code = emit_contract(&schema).unwrap();

    // Table id derived through the identifier codec, index bits clear.
    let id = name::encode("mytable");
    assert_eq!(id & 0xf, 0);
    assert!(code.contains(&format!("pub const MYDATA_TABLE_ID: u64 = {id:#x};")));

    // Primary-key accessor returns the annotated expression.
    assert!(code.contains("pub fn primary_key(t: &MyData) -> u64 {\n        t.primary\n    }"));

    // Secondary accessor and dispatch arm are both present.
    assert!(code.contains("pub fn idx_bya1(&self)"));
    assert!(code.contains(&format!("{}u64 => {{ // update", name::encode("update"))));
    assert!(code.contains("contract.update(t.primary);"));
}

#[test]
fn test_emission_is_deterministic() {
    let a = emit_contract(&example_schema()).unwrap();
    let b = emit_contract(&example_schema()).unwrap();
    assert_eq!(a, b);
}
