//! Deterministic binary codec for the chaingen contract generator.
//!
//! Implements the Size / Pack / Unpack triple for every schema-described
//! type, operating directly on the schema model:
//!
//! - fixed-width primitives in their canonical little-endian encoding
//! - variable-width primitives (`string`, `bytes`) with a varuint32
//!   length prefix
//! - slices as a length prefix plus per-element encoding, with a
//!   pass-through fast path for byte slices
//! - records field by field in declaration order
//! - the Optional (`0`/`1` validity byte) and BinaryExtension
//!   (empty-buffer absence) wrapper state machines
//! - variants, delegating to the discriminant-selected alternative
//!
//! Variant *unpack* needs the active discriminant from context — no wire
//! tag exists; see [`Codec::unpack_variant`].

mod codec;
mod cursor;
mod error;
mod value;

pub use codec::Codec;
pub use cursor::{varuint32_len, Decoder, Encoder};
pub use error::{CodecError, CodecResult};
pub use value::Value;
