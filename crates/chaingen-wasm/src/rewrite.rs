//! The module rewrite pass.
//!
//! One pure pass over a binary module held fully in memory:
//!
//! 1. verify the `\0asm` magic and version 1 header
//! 2. strip every custom section
//! 3. rewrite the data section, splitting any segment whose blob exceeds
//!    the platform's per-segment ceiling into consecutive chunks at
//!    shifted offsets (final linear-memory contents are unchanged)
//! 4. re-emit the data-count section with the rewritten segment count
//! 5. copy every other section verbatim
//!
//! The data section is rewritten before re-assembly starts because the
//! data-count section precedes it in the section order.

use wasm_encoder::{ConstExpr, DataCountSection, DataSection, Module, RawSection};
use wasmparser::{DataKind, DataSectionReader, Operator, Parser, Payload};

use crate::error::{ModuleError, ModuleResult};

/// Per-segment size ceiling of the target platform.
pub const MAX_DATA_SEGMENT: usize = 8191;

/// Rewrite a binary module, returning the new module bytes.
pub fn rewrite_module(input: &[u8]) -> ModuleResult<Vec<u8>> {
    check_header(input)?;

    let payloads = Parser::new(0)
        .parse_all(input)
        .collect::<Result<Vec<_>, _>>()?;

    // The data section must be rewritten up front: its new segment count
    // feeds the data-count section emitted earlier in the stream.
    let mut data_section = None;
    for payload in &payloads {
        if let Payload::DataSection(reader) = payload {
            data_section = Some(rewrite_data_section(reader.clone())?);
        }
    }

    let mut module = Module::new();
    for payload in &payloads {
        match payload {
            Payload::Version { .. } | Payload::End(_) => {}
            // Stripped: name/debug payload only adds artifact size.
            Payload::CustomSection(_) => {}
            // Covered by the CodeSectionStart raw copy.
            Payload::CodeSectionEntry(_) => {}
            Payload::DataCountSection { .. } => {
                if let Some((_, count)) = &data_section {
                    module.section(&DataCountSection { count: *count });
                }
            }
            Payload::DataSection(_) => {
                if let Some((section, _)) = &data_section {
                    module.section(section);
                }
            }
            other => {
                if let Some((id, range)) = other.as_section() {
                    module.section(&RawSection {
                        id,
                        data: &input[range],
                    });
                }
            }
        }
    }
    Ok(module.finish())
}

fn check_header(input: &[u8]) -> ModuleResult<()> {
    if input.len() < 4 || &input[..4] != b"\0asm" {
        return Err(ModuleError::BadMagic);
    }
    if input.len() < 8 || input[4..8] != [1, 0, 0, 0] {
        return Err(ModuleError::BadVersion);
    }
    Ok(())
}

/// Rebuild the data section, splitting oversized blobs. Returns the new
/// section and its segment count.
fn rewrite_data_section(reader: DataSectionReader<'_>) -> ModuleResult<(DataSection, u32)> {
    let mut section = DataSection::new();
    let mut count = 0u32;
    for entry in reader {
        let entry = entry?;
        let base = match &entry.kind {
            DataKind::Active {
                memory_index: 0,
                offset_expr,
            } => read_offset(offset_expr)?,
            DataKind::Active { memory_index, .. } => {
                return Err(ModuleError::NonZeroMemoryIndex(*memory_index));
            }
            DataKind::Passive => return Err(ModuleError::PassiveSegment),
        };
        for (i, chunk) in entry.data.chunks(MAX_DATA_SEGMENT).enumerate() {
            let offset = i64::from(base) + (i * MAX_DATA_SEGMENT) as i64;
            let offset = i32::try_from(offset).map_err(|_| ModuleError::OffsetOverflow)?;
            section.active(0, &ConstExpr::i32_const(offset), chunk.iter().copied());
            count += 1;
        }
    }
    Ok((section, count))
}

/// Decode an `i32.const <offset>` / `end` offset expression.
fn read_offset(expr: &wasmparser::ConstExpr<'_>) -> ModuleResult<i32> {
    let mut ops = expr.get_operators_reader();
    let value = match ops.read()? {
        Operator::I32Const { value } => value,
        _ => return Err(ModuleError::BadOffsetExpr),
    };
    match ops.read()? {
        Operator::End => Ok(value),
        _ => Err(ModuleError::BadOffsetExpr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_magic() {
        let err = rewrite_module(b"\x7fELF\x01\x00\x00\x00").unwrap_err();
        assert!(matches!(err, ModuleError::BadMagic));
    }

    #[test]
    fn test_bad_version() {
        let err = rewrite_module(b"\0asm\x02\x00\x00\x00").unwrap_err();
        assert!(matches!(err, ModuleError::BadVersion));
    }

    #[test]
    fn test_truncated_module() {
        let mut bytes = b"\0asm\x01\x00\x00\x00".to_vec();
        // Section id 11 claiming 100 payload bytes that are not there.
        bytes.extend_from_slice(&[11, 100]);
        assert!(matches!(
            rewrite_module(&bytes),
            Err(ModuleError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_module_passes_through() {
        let bytes = Module::new().finish();
        let out = rewrite_module(&bytes).unwrap();
        assert_eq!(out, bytes);
    }
}
