//! Dependency closure over the record graph.

use std::collections::BTreeSet;

use chaingen_schema::Schema;

/// Compute the set of record names that must be emitted into the ABI.
///
/// Seeded with every record referenced as an action parameter type or
/// declared as a table, then closed transitively over field types,
/// wrapper payloads, and variant alternatives. The record graph may be
/// cyclic; the visited set guards against re-entry, which also makes the
/// traversal idempotent and order-independent.
pub fn build_closure(schema: &Schema) -> BTreeSet<String> {
    let mut records = BTreeSet::new();
    let mut variants_seen = BTreeSet::new();

    for action in schema.actions() {
        for param in &action.params {
            add_type(schema, &param.type_name, &mut records, &mut variants_seen);
        }
    }

    for table in schema.tables() {
        add_type(schema, &table.name, &mut records, &mut variants_seen);
    }

    records
}

fn add_type(
    schema: &Schema,
    type_name: &str,
    records: &mut BTreeSet<String>,
    variants_seen: &mut BTreeSet<String>,
) {
    if let Some(wrapper) = schema.wrapper(type_name) {
        add_type(schema, &wrapper.payload.type_name, records, variants_seen);
        return;
    }

    if let Some(variant) = schema.variant(type_name) {
        if !variants_seen.insert(variant.name.clone()) {
            return;
        }
        for alt in &variant.alternatives {
            add_type(schema, alt, records, variants_seen);
        }
        return;
    }

    if let Some(record) = schema.record(type_name) {
        if !records.insert(record.name.clone()) {
            return;
        }
        for field in &record.fields {
            add_type(schema, &field.type_name, records, variants_seen);
        }
    }
    // Primitives and unknown names contribute nothing here; unknowns are
    // reported by resolution during assembly.
}
