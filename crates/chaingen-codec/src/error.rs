//! Codec error types.

use thiserror::Error;

/// Errors raised while sizing, packing, or unpacking values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The value's runtime kind does not match its declared type.
    #[error("type mismatch: declared `{declared}`, got {kind} value")]
    TypeMismatch {
        declared: String,
        kind: &'static str,
    },

    /// The declared type is not a primitive and names no known record,
    /// variant, or wrapper.
    #[error("unknown type `{0}` in codec")]
    UnknownType(String),

    /// Fewer bytes available than an unpack step needs.
    #[error("buffer too short: need {needed} more byte(s) at offset {offset}")]
    ShortBuffer { needed: usize, offset: usize },

    /// An Optional validity byte other than 0 or 1.
    #[error("invalid optional value {0} (expected 0 or 1)")]
    InvalidOptionalTag(u8),

    /// A varuint32 longer than 5 bytes or overflowing 32 bits.
    #[error("malformed varuint32 at offset {0}")]
    BadVarint(usize),

    /// String payload bytes that are not valid UTF-8.
    #[error("invalid utf-8 in string at offset {0}")]
    InvalidUtf8(usize),

    /// A record value whose field count disagrees with its declaration.
    #[error("record `{record}` expects {expected} field value(s), got {found}")]
    FieldCount {
        record: String,
        expected: usize,
        found: usize,
    },

    /// A variant discriminant outside the declared alternatives.
    #[error("variant `{variant}` has no alternative {index}")]
    BadDiscriminant { variant: String, index: u32 },

    /// Unpacking a variant without knowing the active alternative.
    ///
    /// The wire format carries no discriminant; callers must use
    /// [`crate::Codec::unpack_variant`] with the index known from context.
    #[error("variant `{0}` cannot be unpacked without a discriminant")]
    NeedDiscriminant(String),
}

/// Codec result type alias.
pub type CodecResult<T> = Result<T, CodecError>;
