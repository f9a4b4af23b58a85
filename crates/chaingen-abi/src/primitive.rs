//! The fixed table of primitive ABI types.

/// Declared-name → ABI-name pairs for every primitive the ABI knows.
///
/// The left column is the spelling used in contract declarations, the
/// right column the name emitted into the descriptor document.
const PRIMITIVES: &[(&str, &str)] = &[
    ("bool", "bool"),
    ("i8", "int8"),
    ("u8", "uint8"),
    ("i16", "int16"),
    ("u16", "uint16"),
    ("i32", "int32"),
    ("u32", "uint32"),
    ("i64", "int64"),
    ("u64", "uint64"),
    ("Int128", "int128"),
    ("Uint128", "uint128"),
    ("VarInt32", "varint32"),
    ("VarUint32", "varuint32"),
    ("f32", "float32"),
    ("f64", "float64"),
    ("Float128", "float128"),
    ("TimePoint", "time_point"),
    ("TimePointSec", "time_point_sec"),
    ("BlockTimestamp", "block_timestamp_type"),
    ("Name", "name"),
    ("String", "string"),
    ("Checksum160", "checksum160"),
    ("Checksum256", "checksum256"),
    ("Checksum512", "checksum512"),
    ("PublicKey", "public_key"),
    ("Signature", "signature"),
    ("Symbol", "symbol"),
    ("SymbolCode", "symbol_code"),
    ("Asset", "asset"),
    ("ExtendedAsset", "extended_asset"),
];

/// Look up the ABI primitive name for a declared type, if it is one.
pub fn primitive_abi_type(declared: &str) -> Option<&'static str> {
    PRIMITIVES
        .iter()
        .find(|(name, _)| *name == declared)
        .map(|(_, abi)| *abi)
}

/// A fix suggestion when a failed lookup matches a primitive name in the
/// wrong case (e.g. `asset` for `Asset`, `string` for `String`).
pub fn alias_hint(declared: &str) -> Option<&'static str> {
    let lowered = declared.to_ascii_lowercase();
    PRIMITIVES
        .iter()
        .find(|(name, abi)| {
            *name != declared && (name.eq_ignore_ascii_case(declared) || *abi == lowered)
        })
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_lookup() {
        assert_eq!(primitive_abi_type("u64"), Some("uint64"));
        assert_eq!(primitive_abi_type("BlockTimestamp"), Some("block_timestamp_type"));
        assert_eq!(primitive_abi_type("ExtendedAsset"), Some("extended_asset"));
        assert_eq!(primitive_abi_type("Vec"), None);
    }

    #[test]
    fn test_alias_hint() {
        assert_eq!(alias_hint("asset"), Some("Asset"));
        assert_eq!(alias_hint("name"), Some("Name"));
        assert_eq!(alias_hint("symbol_code"), Some("SymbolCode"));
        assert_eq!(alias_hint("Widget"), None);
        // A correct primitive never hints at itself.
        assert_eq!(alias_hint("Asset"), None);
    }
}
