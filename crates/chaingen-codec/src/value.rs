//! Runtime value model.
//!
//! One [`Value`] variant per ABI primitive, plus the composite forms
//! (records, lists, wrappers, variants). Record values are positional:
//! field order matches the declaration, which is what fixes the wire
//! layout.

/// A runtime value to be packed, or produced by unpacking.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int8(i8),
    Uint8(u8),
    Int16(i16),
    Uint16(u16),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Int128(i128),
    Uint128(u128),
    /// Zigzag + ULEB128 on the wire.
    VarInt32(i32),
    /// ULEB128 on the wire.
    VarUint32(u32),
    Float32(f32),
    Float64(f64),
    /// Raw 16-byte little-endian quad precision payload.
    Float128([u8; 16]),
    /// Microseconds since epoch.
    TimePoint(i64),
    /// Seconds since epoch.
    TimePointSec(u32),
    /// Half-second slots since the block epoch.
    BlockTimestamp(u32),
    /// A base-32 encoded identifier.
    Name(u64),
    Bytes(Vec<u8>),
    String(String),
    Checksum160([u8; 20]),
    Checksum256([u8; 32]),
    Checksum512([u8; 64]),
    PublicKey([u8; 34]),
    Signature([u8; 66]),
    Symbol(u64),
    SymbolCode(u64),
    Asset {
        amount: i64,
        symbol: u64,
    },
    ExtendedAsset {
        amount: i64,
        symbol: u64,
        contract: u64,
    },
    /// Positional field values of a declared record.
    Record(Vec<Value>),
    /// Elements of a slice-shaped field.
    List(Vec<Value>),
    /// Optional wrapper state.
    Optional(Option<Box<Value>>),
    /// BinaryExtension wrapper state.
    Extension(Option<Box<Value>>),
    /// An active variant alternative; `index` selects into the declared
    /// alternatives list and doubles as the discriminant.
    Variant {
        index: u32,
        value: Box<Value>,
    },
}

impl Value {
    /// Short kind label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int8(_) => "int8",
            Value::Uint8(_) => "uint8",
            Value::Int16(_) => "int16",
            Value::Uint16(_) => "uint16",
            Value::Int32(_) => "int32",
            Value::Uint32(_) => "uint32",
            Value::Int64(_) => "int64",
            Value::Uint64(_) => "uint64",
            Value::Int128(_) => "int128",
            Value::Uint128(_) => "uint128",
            Value::VarInt32(_) => "varint32",
            Value::VarUint32(_) => "varuint32",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::Float128(_) => "float128",
            Value::TimePoint(_) => "time_point",
            Value::TimePointSec(_) => "time_point_sec",
            Value::BlockTimestamp(_) => "block_timestamp",
            Value::Name(_) => "name",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::Checksum160(_) => "checksum160",
            Value::Checksum256(_) => "checksum256",
            Value::Checksum512(_) => "checksum512",
            Value::PublicKey(_) => "public_key",
            Value::Signature(_) => "signature",
            Value::Symbol(_) => "symbol",
            Value::SymbolCode(_) => "symbol_code",
            Value::Asset { .. } => "asset",
            Value::ExtendedAsset { .. } => "extended_asset",
            Value::Record(_) => "record",
            Value::List(_) => "list",
            Value::Optional(_) => "optional",
            Value::Extension(_) => "extension",
            Value::Variant { .. } => "variant",
        }
    }

    /// Present Optional wrapper shorthand.
    pub fn some(value: Value) -> Value {
        Value::Optional(Some(Box::new(value)))
    }

    /// Absent Optional wrapper shorthand.
    pub fn none() -> Value {
        Value::Optional(None)
    }

    /// Present BinaryExtension wrapper shorthand.
    pub fn ext(value: Value) -> Value {
        Value::Extension(Some(Box::new(value)))
    }

    /// Absent BinaryExtension wrapper shorthand.
    pub fn no_ext() -> Value {
        Value::Extension(None)
    }
}
