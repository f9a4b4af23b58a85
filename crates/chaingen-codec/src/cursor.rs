//! Byte-buffer cursors: the write side pre-sized by Size(), the read side
//! tracking how many bytes each unpack consumed.

use crate::{CodecError, CodecResult};

/// Number of bytes a ULEB128-encoded `u32` occupies.
pub fn varuint32_len(mut value: u32) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

// ══════════════════════════════════════════════════════════════════════════════
// Encoder
// ══════════════════════════════════════════════════════════════════════════════

/// Append-only byte buffer writer.
#[derive(Debug)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Create an encoder pre-sized to the value's computed size.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write a ULEB128 length prefix.
    pub fn write_length(&mut self, mut value: u32) {
        loop {
            let mut byte = (value & 0x7f) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            self.buf.push(byte);
            if value == 0 {
                break;
            }
        }
    }

    /// Write a zigzag-mapped ULEB128 signed 32-bit integer.
    pub fn write_varint32(&mut self, value: i32) {
        self.write_length(((value << 1) ^ (value >> 31)) as u32);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Decoder
// ══════════════════════════════════════════════════════════════════════════════

/// Cursor over an input buffer; every read advances `pos`, and the final
/// position is the unpack's byte-count result.
#[derive(Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Bytes left in the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_u8(&mut self) -> CodecResult<u8> {
        Ok(self.read_exact(1)?[0])
    }

    /// Read exactly `n` bytes or fail without consuming anything.
    pub fn read_exact(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(CodecError::ShortBuffer {
                needed: n - self.remaining(),
                offset: self.pos,
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a ULEB128 length prefix.
    pub fn read_length(&mut self) -> CodecResult<u32> {
        let start = self.pos;
        let mut value: u32 = 0;
        let mut shift = 0;
        loop {
            let byte = self.read_u8()?;
            if shift == 28 && byte > 0x0f {
                return Err(CodecError::BadVarint(start));
            }
            value |= u32::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift > 28 {
                return Err(CodecError::BadVarint(start));
            }
        }
    }

    /// Read a zigzag-mapped ULEB128 signed 32-bit integer.
    pub fn read_varint32(&mut self) -> CodecResult<i32> {
        let raw = self.read_length()?;
        Ok(((raw >> 1) as i32) ^ -((raw & 1) as i32))
    }
}
