//! The schema-driven Size / Pack / Unpack implementation.

use chaingen_schema::{FieldDef, Schema, WrapperKind};

use crate::cursor::{varuint32_len, Decoder, Encoder};
use crate::error::{CodecError, CodecResult};
use crate::value::Value;

/// Copy an exactly-sized slice into a fixed array.
fn array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

/// Codec over one generation pass's schema.
///
/// All three operations resolve declared type names against the schema on
/// every call; the schema is immutable for the codec's lifetime.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    schema: &'a Schema,
}

impl<'a> Codec<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    // ── Public API ───────────────────────────────────────────────────────

    /// Number of bytes `value` occupies when packed as `type_name`.
    pub fn size_of(&self, type_name: &str, value: &Value) -> CodecResult<usize> {
        self.size_value(type_name, value)
    }

    /// Pack `value` as `type_name` into a buffer pre-sized by
    /// [`Codec::size_of`]. The result length always equals the size.
    pub fn pack(&self, type_name: &str, value: &Value) -> CodecResult<Vec<u8>> {
        let size = self.size_value(type_name, value)?;
        let mut enc = Encoder::new(size);
        self.pack_value(type_name, value, &mut enc)?;
        debug_assert_eq!(enc.len(), size);
        Ok(enc.into_bytes())
    }

    /// Unpack a `type_name` value from `data`.
    ///
    /// Returns the value and the number of bytes consumed, so callers can
    /// compose unpacks in nested contexts.
    pub fn unpack(&self, type_name: &str, data: &[u8]) -> CodecResult<(Value, usize)> {
        let mut dec = Decoder::new(data);
        let value = self.unpack_value(type_name, &mut dec)?;
        Ok((value, dec.pos()))
    }

    /// Unpack one alternative of a variant.
    ///
    /// The wire format carries no discriminant; `index` must come from
    /// context (the caller knows which alternative is active).
    pub fn unpack_variant(
        &self,
        variant_name: &str,
        index: u32,
        data: &[u8],
    ) -> CodecResult<(Value, usize)> {
        let Some(variant) = self.schema.variant(variant_name) else {
            return Err(CodecError::UnknownType(variant_name.to_string()));
        };
        let Some(alt) = variant.alternatives.get(index as usize) else {
            return Err(CodecError::BadDiscriminant {
                variant: variant_name.to_string(),
                index,
            });
        };
        let (inner, consumed) = self.unpack(alt, data)?;
        Ok((
            Value::Variant {
                index,
                value: Box::new(inner),
            },
            consumed,
        ))
    }

    // ── Size ─────────────────────────────────────────────────────────────

    fn size_value(&self, type_name: &str, value: &Value) -> CodecResult<usize> {
        if let Some(width) = fixed_width(type_name) {
            self.check_primitive(type_name, value)?;
            return Ok(width);
        }

        match type_name {
            "VarUint32" => {
                let Value::VarUint32(v) = value else {
                    return Err(self.mismatch(type_name, value));
                };
                return Ok(varuint32_len(*v));
            }
            "VarInt32" => {
                let Value::VarInt32(v) = value else {
                    return Err(self.mismatch(type_name, value));
                };
                return Ok(varuint32_len(zigzag(*v)));
            }
            "String" => {
                let Value::String(s) = value else {
                    return Err(self.mismatch(type_name, value));
                };
                return Ok(varuint32_len(s.len() as u32) + s.len());
            }
            _ => {}
        }

        if let Some(wrapper) = self.schema.wrapper(type_name) {
            return self.size_wrapper(wrapper.kind, &wrapper.payload, value);
        }

        if let Some(variant) = self.schema.variant(type_name) {
            let Value::Variant { index, value: inner } = value else {
                return Err(self.mismatch(type_name, value));
            };
            let alt = variant.alternatives.get(*index as usize).ok_or_else(|| {
                CodecError::BadDiscriminant {
                    variant: variant.name.clone(),
                    index: *index,
                }
            })?;
            return self.size_value(alt, inner);
        }

        if let Some(record) = self.schema.record(type_name) {
            let fields = self.record_fields(record.name.as_str(), &record.fields, value)?;
            let mut size = 0;
            for (field, field_value) in record.fields.iter().zip(fields) {
                size += self.size_field(field, field_value)?;
            }
            return Ok(size);
        }

        Err(CodecError::UnknownType(type_name.to_string()))
    }

    fn size_wrapper(
        &self,
        kind: WrapperKind,
        payload: &FieldDef,
        value: &Value,
    ) -> CodecResult<usize> {
        match (kind, value) {
            (WrapperKind::BinaryExtension, Value::Extension(None)) => Ok(0),
            (WrapperKind::BinaryExtension, Value::Extension(Some(inner))) => {
                self.size_field(payload, inner)
            }
            (WrapperKind::Optional, Value::Optional(None)) => Ok(1),
            (WrapperKind::Optional, Value::Optional(Some(inner))) => {
                Ok(1 + self.size_field(payload, inner)?)
            }
            _ => Err(self.mismatch(&payload.type_name, value)),
        }
    }

    /// Size of a field value, honoring the field's slice shape.
    fn size_field(&self, field: &FieldDef, value: &Value) -> CodecResult<usize> {
        if !field.is_slice() {
            return self.size_value(&field.type_name, value);
        }

        // Byte-slice fast path: raw bytes behind one length prefix.
        if field.type_name == "u8" {
            let Value::Bytes(bytes) = value else {
                return Err(self.mismatch("u8[]", value));
            };
            return Ok(varuint32_len(bytes.len() as u32) + bytes.len());
        }

        let Value::List(items) = value else {
            return Err(self.mismatch(&field.type_name, value));
        };
        let mut size = varuint32_len(items.len() as u32);
        for item in items {
            size += self.size_value(&field.type_name, item)?;
        }
        Ok(size)
    }

    // ── Pack ─────────────────────────────────────────────────────────────

    fn pack_value(&self, type_name: &str, value: &Value, enc: &mut Encoder) -> CodecResult<()> {
        if pack_primitive(type_name, value, enc)? {
            return Ok(());
        }

        if let Some(wrapper) = self.schema.wrapper(type_name) {
            return self.pack_wrapper(wrapper.kind, &wrapper.payload, value, enc);
        }

        if let Some(variant) = self.schema.variant(type_name) {
            let Value::Variant { index, value: inner } = value else {
                return Err(self.mismatch(type_name, value));
            };
            let alt = variant.alternatives.get(*index as usize).ok_or_else(|| {
                CodecError::BadDiscriminant {
                    variant: variant.name.clone(),
                    index: *index,
                }
            })?;
            return self.pack_value(alt, inner, enc);
        }

        if let Some(record) = self.schema.record(type_name) {
            let fields = self.record_fields(record.name.as_str(), &record.fields, value)?;
            for (field, field_value) in record.fields.iter().zip(fields) {
                self.pack_field(field, field_value, enc)?;
            }
            return Ok(());
        }

        Err(CodecError::UnknownType(type_name.to_string()))
    }

    fn pack_wrapper(
        &self,
        kind: WrapperKind,
        payload: &FieldDef,
        value: &Value,
        enc: &mut Encoder,
    ) -> CodecResult<()> {
        match (kind, value) {
            // Absent extension: empty buffer, nothing written.
            (WrapperKind::BinaryExtension, Value::Extension(None)) => Ok(()),
            (WrapperKind::BinaryExtension, Value::Extension(Some(inner))) => {
                self.pack_field(payload, inner, enc)
            }
            (WrapperKind::Optional, Value::Optional(None)) => {
                enc.write_u8(0);
                Ok(())
            }
            (WrapperKind::Optional, Value::Optional(Some(inner))) => {
                enc.write_u8(1);
                self.pack_field(payload, inner, enc)
            }
            _ => Err(self.mismatch(&payload.type_name, value)),
        }
    }

    fn pack_field(&self, field: &FieldDef, value: &Value, enc: &mut Encoder) -> CodecResult<()> {
        if !field.is_slice() {
            return self.pack_value(&field.type_name, value, enc);
        }

        if field.type_name == "u8" {
            let Value::Bytes(bytes) = value else {
                return Err(self.mismatch("u8[]", value));
            };
            enc.write_length(bytes.len() as u32);
            enc.write_bytes(bytes);
            return Ok(());
        }

        let Value::List(items) = value else {
            return Err(self.mismatch(&field.type_name, value));
        };
        enc.write_length(items.len() as u32);
        for item in items {
            self.pack_value(&field.type_name, item, enc)?;
        }
        Ok(())
    }

    // ── Unpack ───────────────────────────────────────────────────────────

    fn unpack_value(&self, type_name: &str, dec: &mut Decoder<'_>) -> CodecResult<Value> {
        if let Some(value) = unpack_primitive(type_name, dec)? {
            return Ok(value);
        }

        if let Some(wrapper) = self.schema.wrapper(type_name) {
            return self.unpack_wrapper(wrapper.kind, &wrapper.payload, dec);
        }

        if self.schema.variant(type_name).is_some() {
            return Err(CodecError::NeedDiscriminant(type_name.to_string()));
        }

        if let Some(record) = self.schema.record(type_name) {
            let mut fields = Vec::with_capacity(record.fields.len());
            for field in &record.fields {
                fields.push(self.unpack_field(field, dec)?);
            }
            return Ok(Value::Record(fields));
        }

        Err(CodecError::UnknownType(type_name.to_string()))
    }

    fn unpack_wrapper(
        &self,
        kind: WrapperKind,
        payload: &FieldDef,
        dec: &mut Decoder<'_>,
    ) -> CodecResult<Value> {
        match kind {
            WrapperKind::BinaryExtension => {
                if dec.remaining() == 0 {
                    return Ok(Value::Extension(None));
                }
                let inner = self.unpack_field(payload, dec)?;
                Ok(Value::Extension(Some(Box::new(inner))))
            }
            WrapperKind::Optional => match dec.read_u8()? {
                0 => Ok(Value::Optional(None)),
                1 => {
                    let inner = self.unpack_field(payload, dec)?;
                    Ok(Value::Optional(Some(Box::new(inner))))
                }
                tag => Err(CodecError::InvalidOptionalTag(tag)),
            },
        }
    }

    fn unpack_field(&self, field: &FieldDef, dec: &mut Decoder<'_>) -> CodecResult<Value> {
        if !field.is_slice() {
            return self.unpack_value(&field.type_name, dec);
        }

        if field.type_name == "u8" {
            let len = dec.read_length()? as usize;
            return Ok(Value::Bytes(dec.read_exact(len)?.to_vec()));
        }

        let len = dec.read_length()? as usize;
        let mut items = Vec::with_capacity(len.min(4096));
        for _ in 0..len {
            items.push(self.unpack_value(&field.type_name, dec)?);
        }
        Ok(Value::List(items))
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn record_fields<'v>(
        &self,
        record_name: &str,
        declared: &[FieldDef],
        value: &'v Value,
    ) -> CodecResult<&'v [Value]> {
        let Value::Record(fields) = value else {
            return Err(self.mismatch(record_name, value));
        };
        if fields.len() != declared.len() {
            return Err(CodecError::FieldCount {
                record: record_name.to_string(),
                expected: declared.len(),
                found: fields.len(),
            });
        }
        Ok(fields)
    }

    fn check_primitive(&self, type_name: &str, value: &Value) -> CodecResult<()> {
        if primitive_matches(type_name, value) {
            Ok(())
        } else {
            Err(self.mismatch(type_name, value))
        }
    }

    fn mismatch(&self, declared: &str, value: &Value) -> CodecError {
        CodecError::TypeMismatch {
            declared: declared.to_string(),
            kind: value.kind(),
        }
    }
}

fn zigzag(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Fixed wire width of a primitive, if it has one.
fn fixed_width(type_name: &str) -> Option<usize> {
    Some(match type_name {
        "bool" | "i8" | "u8" => 1,
        "i16" | "u16" => 2,
        "i32" | "u32" | "f32" | "TimePointSec" | "BlockTimestamp" => 4,
        "i64" | "u64" | "f64" | "TimePoint" | "Name" | "Symbol" | "SymbolCode" => 8,
        "Int128" | "Uint128" | "Float128" | "Asset" => 16,
        "Checksum160" => 20,
        "ExtendedAsset" => 24,
        "Checksum256" => 32,
        "PublicKey" => 34,
        "Checksum512" => 64,
        "Signature" => 66,
        _ => return None,
    })
}

fn primitive_matches(type_name: &str, value: &Value) -> bool {
    matches!(
        (type_name, value),
        ("bool", Value::Bool(_))
            | ("i8", Value::Int8(_))
            | ("u8", Value::Uint8(_))
            | ("i16", Value::Int16(_))
            | ("u16", Value::Uint16(_))
            | ("i32", Value::Int32(_))
            | ("u32", Value::Uint32(_))
            | ("i64", Value::Int64(_))
            | ("u64", Value::Uint64(_))
            | ("Int128", Value::Int128(_))
            | ("Uint128", Value::Uint128(_))
            | ("f32", Value::Float32(_))
            | ("f64", Value::Float64(_))
            | ("Float128", Value::Float128(_))
            | ("TimePoint", Value::TimePoint(_))
            | ("TimePointSec", Value::TimePointSec(_))
            | ("BlockTimestamp", Value::BlockTimestamp(_))
            | ("Name", Value::Name(_))
            | ("Symbol", Value::Symbol(_))
            | ("SymbolCode", Value::SymbolCode(_))
            | ("Asset", Value::Asset { .. })
            | ("ExtendedAsset", Value::ExtendedAsset { .. })
            | ("Checksum160", Value::Checksum160(_))
            | ("Checksum256", Value::Checksum256(_))
            | ("Checksum512", Value::Checksum512(_))
            | ("PublicKey", Value::PublicKey(_))
            | ("Signature", Value::Signature(_))
    )
}

/// Pack a primitive value. Returns `Ok(false)` when `type_name` is not a
/// primitive, leaving composite handling to the caller.
fn pack_primitive(type_name: &str, value: &Value, enc: &mut Encoder) -> CodecResult<bool> {
    let mismatch = || CodecError::TypeMismatch {
        declared: type_name.to_string(),
        kind: value.kind(),
    };
    match type_name {
        "bool" => match value {
            Value::Bool(v) => enc.write_u8(u8::from(*v)),
            _ => return Err(mismatch()),
        },
        "i8" => match value {
            Value::Int8(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "u8" => match value {
            Value::Uint8(v) => enc.write_u8(*v),
            _ => return Err(mismatch()),
        },
        "i16" => match value {
            Value::Int16(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "u16" => match value {
            Value::Uint16(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "i32" => match value {
            Value::Int32(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "u32" => match value {
            Value::Uint32(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "i64" => match value {
            Value::Int64(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "u64" => match value {
            Value::Uint64(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "Int128" => match value {
            Value::Int128(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "Uint128" => match value {
            Value::Uint128(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "VarInt32" => match value {
            Value::VarInt32(v) => enc.write_varint32(*v),
            _ => return Err(mismatch()),
        },
        "VarUint32" => match value {
            Value::VarUint32(v) => enc.write_length(*v),
            _ => return Err(mismatch()),
        },
        "f32" => match value {
            Value::Float32(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "f64" => match value {
            Value::Float64(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "Float128" => match value {
            Value::Float128(v) => enc.write_bytes(v),
            _ => return Err(mismatch()),
        },
        "TimePoint" => match value {
            Value::TimePoint(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "TimePointSec" => match value {
            Value::TimePointSec(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "BlockTimestamp" => match value {
            Value::BlockTimestamp(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "Name" => match value {
            Value::Name(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "Symbol" => match value {
            Value::Symbol(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "SymbolCode" => match value {
            Value::SymbolCode(v) => enc.write_bytes(&v.to_le_bytes()),
            _ => return Err(mismatch()),
        },
        "Asset" => match value {
            Value::Asset { amount, symbol } => {
                enc.write_bytes(&amount.to_le_bytes());
                enc.write_bytes(&symbol.to_le_bytes());
            }
            _ => return Err(mismatch()),
        },
        "ExtendedAsset" => match value {
            Value::ExtendedAsset {
                amount,
                symbol,
                contract,
            } => {
                enc.write_bytes(&amount.to_le_bytes());
                enc.write_bytes(&symbol.to_le_bytes());
                enc.write_bytes(&contract.to_le_bytes());
            }
            _ => return Err(mismatch()),
        },
        "Checksum160" => match value {
            Value::Checksum160(v) => enc.write_bytes(v),
            _ => return Err(mismatch()),
        },
        "Checksum256" => match value {
            Value::Checksum256(v) => enc.write_bytes(v),
            _ => return Err(mismatch()),
        },
        "Checksum512" => match value {
            Value::Checksum512(v) => enc.write_bytes(v),
            _ => return Err(mismatch()),
        },
        "PublicKey" => match value {
            Value::PublicKey(v) => enc.write_bytes(v),
            _ => return Err(mismatch()),
        },
        "Signature" => match value {
            Value::Signature(v) => enc.write_bytes(v),
            _ => return Err(mismatch()),
        },
        "String" => match value {
            Value::String(s) => {
                enc.write_length(s.len() as u32);
                enc.write_bytes(s.as_bytes());
            }
            _ => return Err(mismatch()),
        },
        _ => return Ok(false),
    }
    Ok(true)
}

/// Unpack a primitive value. Returns `Ok(None)` when `type_name` is not a
/// primitive.
fn unpack_primitive(type_name: &str, dec: &mut Decoder<'_>) -> CodecResult<Option<Value>> {
    let value = match type_name {
        "bool" => Value::Bool(dec.read_u8()? != 0),
        "i8" => Value::Int8(dec.read_u8()? as i8),
        "u8" => Value::Uint8(dec.read_u8()?),
        "i16" => Value::Int16(i16::from_le_bytes(array(dec.read_exact(2)?))),
        "u16" => Value::Uint16(u16::from_le_bytes(array(dec.read_exact(2)?))),
        "i32" => Value::Int32(i32::from_le_bytes(array(dec.read_exact(4)?))),
        "u32" => Value::Uint32(u32::from_le_bytes(array(dec.read_exact(4)?))),
        "i64" => Value::Int64(i64::from_le_bytes(array(dec.read_exact(8)?))),
        "u64" => Value::Uint64(u64::from_le_bytes(array(dec.read_exact(8)?))),
        "Int128" => Value::Int128(i128::from_le_bytes(array(dec.read_exact(16)?))),
        "Uint128" => Value::Uint128(u128::from_le_bytes(array(dec.read_exact(16)?))),
        "VarInt32" => Value::VarInt32(dec.read_varint32()?),
        "VarUint32" => Value::VarUint32(dec.read_length()?),
        "f32" => Value::Float32(f32::from_le_bytes(array(dec.read_exact(4)?))),
        "f64" => Value::Float64(f64::from_le_bytes(array(dec.read_exact(8)?))),
        "Float128" => Value::Float128(array(dec.read_exact(16)?)),
        "TimePoint" => Value::TimePoint(i64::from_le_bytes(array(dec.read_exact(8)?))),
        "TimePointSec" => Value::TimePointSec(u32::from_le_bytes(array(dec.read_exact(4)?))),
        "BlockTimestamp" => Value::BlockTimestamp(u32::from_le_bytes(array(dec.read_exact(4)?))),
        "Name" => Value::Name(u64::from_le_bytes(array(dec.read_exact(8)?))),
        "Symbol" => Value::Symbol(u64::from_le_bytes(array(dec.read_exact(8)?))),
        "SymbolCode" => Value::SymbolCode(u64::from_le_bytes(array(dec.read_exact(8)?))),
        "Asset" => {
            let amount = i64::from_le_bytes(array(dec.read_exact(8)?));
            let symbol = u64::from_le_bytes(array(dec.read_exact(8)?));
            Value::Asset { amount, symbol }
        }
        "ExtendedAsset" => {
            let amount = i64::from_le_bytes(array(dec.read_exact(8)?));
            let symbol = u64::from_le_bytes(array(dec.read_exact(8)?));
            let contract = u64::from_le_bytes(array(dec.read_exact(8)?));
            Value::ExtendedAsset {
                amount,
                symbol,
                contract,
            }
        }
        "Checksum160" => Value::Checksum160(array(dec.read_exact(20)?)),
        "Checksum256" => Value::Checksum256(array(dec.read_exact(32)?)),
        "Checksum512" => Value::Checksum512(array(dec.read_exact(64)?)),
        "PublicKey" => Value::PublicKey(array(dec.read_exact(34)?)),
        "Signature" => Value::Signature(array(dec.read_exact(66)?)),
        "String" => {
            let len = dec.read_length()? as usize;
            let start = dec.pos();
            let bytes = dec.read_exact(len)?;
            let s = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8(start))?;
            Value::String(s.to_string())
        }
        _ => return Ok(None),
    };
    Ok(Some(value))
}
