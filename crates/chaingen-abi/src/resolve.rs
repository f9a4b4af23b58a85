//! Field-to-ABI-type resolution.

use chaingen_schema::{FieldDef, Schema, WrapperKind};

use crate::error::TypeError;
use crate::primitive::{alias_hint, primitive_abi_type};

/// Resolve a declared field to its ABI type string.
///
/// Resolution order:
/// 1. A slice of `u8` is the primitive `bytes`, not `uint8[]`.
/// 2. A field whose declared type names a registered wrapper is redirected
///    to the wrapper's payload; the wrapper's suffix (`?` or `$`) is
///    appended last.
/// 3. The (possibly redirected) type is looked up in the primitive table,
///    then among declared records and variants; record/variant names pass
///    through verbatim, to be emitted independently.
/// 4. Slice shape appends `[]` before any wrapper suffix.
///
/// Unresolvable types are a fatal [`TypeError`], with a hint when the name
/// looks like a miscased primitive.
pub fn resolve_field(schema: &Schema, field: &FieldDef) -> Result<String, TypeError> {
    if field.is_slice() && field.type_name == "u8" {
        return Ok("bytes".to_string());
    }

    let mut type_name = field.type_name.as_str();
    let mut loc = &field.loc;
    let mut slice = field.is_slice();
    let mut wrapper: Option<WrapperKind> = None;

    if let Some(w) = schema.wrapper(type_name) {
        wrapper = Some(w.kind);
        type_name = &w.payload.type_name;
        loc = &w.payload.loc;
        // The payload's own shape carries into the type string.
        if w.payload.is_slice() {
            if type_name == "u8" {
                let mut abi = "bytes".to_string();
                if slice {
                    abi.push_str("[]");
                }
                abi.push_str(w.kind.suffix());
                return Ok(abi);
            }
            slice = true;
        }
    }

    let mut abi = match primitive_abi_type(type_name) {
        Some(primitive) => primitive.to_string(),
        None if schema.record(type_name).is_some() || schema.variant(type_name).is_some() => {
            type_name.to_string()
        }
        None => {
            return Err(TypeError {
                type_name: type_name.to_string(),
                loc: loc.clone(),
                hint: alias_hint(type_name),
            });
        }
    };

    if slice {
        abi.push_str("[]");
    }
    if let Some(kind) = wrapper {
        abi.push_str(kind.suffix());
    }
    Ok(abi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaingen_schema::{Loc, RecordDef, WrapperDef};

    fn loc() -> Loc {
        Loc::new("test.rs", 1)
    }

    fn schema_with_wrappers() -> Schema {
        let mut schema = Schema::new();
        schema
            .add_record(RecordDef::new(
                "Inner",
                vec![FieldDef::scalar("a", "u64", loc())],
                loc(),
            ))
            .unwrap();
        let ext_fields = vec![
            FieldDef::scalar("", "BinaryExtension", loc()),
            FieldDef::scalar("value", "u32", loc()),
        ];
        schema
            .add_wrapper(WrapperDef::recognize("ExtU32", &ext_fields, loc()).unwrap())
            .unwrap();
        let opt_fields = vec![
            FieldDef::scalar("", "Optional", loc()),
            FieldDef::scalar("value", "Inner", loc()),
        ];
        schema
            .add_wrapper(WrapperDef::recognize("MaybeInner", &opt_fields, loc()).unwrap())
            .unwrap();
        schema
    }

    #[test]
    fn test_primitive_passthrough() {
        let schema = Schema::new();
        let abi = resolve_field(&schema, &FieldDef::scalar("x", "u64", loc())).unwrap();
        assert_eq!(abi, "uint64");
    }

    #[test]
    fn test_byte_slice_is_bytes() {
        let schema = Schema::new();
        let abi = resolve_field(&schema, &FieldDef::slice("data", "u8", loc())).unwrap();
        assert_eq!(abi, "bytes");
    }

    #[test]
    fn test_slice_suffix() {
        let schema = Schema::new();
        let abi = resolve_field(&schema, &FieldDef::slice("xs", "u64", loc())).unwrap();
        assert_eq!(abi, "uint64[]");
    }

    #[test]
    fn test_record_name_verbatim() {
        let schema = schema_with_wrappers();
        let abi = resolve_field(&schema, &FieldDef::scalar("inner", "Inner", loc())).unwrap();
        assert_eq!(abi, "Inner");
    }

    #[test]
    fn test_slice_of_extension_wrapped_primitive() {
        let schema = schema_with_wrappers();
        let abi = resolve_field(&schema, &FieldDef::slice("xs", "ExtU32", loc())).unwrap();
        assert_eq!(abi, "uint32[]$");
    }

    #[test]
    fn test_bytes_wrapper_keeps_outer_slice_suffix() {
        let mut schema = Schema::new();
        let fields = vec![
            FieldDef::scalar("", "BinaryExtension", loc()),
            FieldDef::slice("data", "u8", loc()),
        ];
        schema
            .add_wrapper(WrapperDef::recognize("ExtBlob", &fields, loc()).unwrap())
            .unwrap();

        let abi = resolve_field(&schema, &FieldDef::scalar("b", "ExtBlob", loc())).unwrap();
        assert_eq!(abi, "bytes$");
        // A slice of the wrapper composes both suffixes.
        let abi = resolve_field(&schema, &FieldDef::slice("bs", "ExtBlob", loc())).unwrap();
        assert_eq!(abi, "bytes[]$");
    }

    #[test]
    fn test_optional_wrapped_record() {
        let schema = schema_with_wrappers();
        let abi = resolve_field(&schema, &FieldDef::scalar("m", "MaybeInner", loc())).unwrap();
        assert_eq!(abi, "Inner?");
    }

    #[test]
    fn test_unknown_type_fails_with_hint() {
        let schema = Schema::new();
        let err = resolve_field(&schema, &FieldDef::scalar("x", "asset", loc())).unwrap_err();
        assert_eq!(err.type_name, "asset");
        assert_eq!(err.hint, Some("Asset"));
        assert!(err.to_string().contains("did you mean `Asset`?"));
    }

    #[test]
    fn test_unknown_type_fails_without_hint() {
        let schema = Schema::new();
        let err = resolve_field(&schema, &FieldDef::scalar("x", "Widget", loc())).unwrap_err();
        assert_eq!(err.hint, None);
    }
}
