//! Module rewrite error types.

use thiserror::Error;

/// Errors that can occur while rewriting a binary module.
///
/// Any error aborts the rewrite; no partial output is ever produced.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The input does not start with the `\0asm` magic.
    #[error("not a wasm module: bad magic")]
    BadMagic,

    /// The module version is not 1.
    #[error("unsupported wasm version")]
    BadVersion,

    /// The module structure is malformed or truncated.
    #[error("malformed module: {0}")]
    Malformed(#[from] wasmparser::BinaryReaderError),

    /// A data segment targets a memory other than memory 0.
    #[error("data segment targets memory {0}, only memory 0 is supported")]
    NonZeroMemoryIndex(u32),

    /// A passive data segment, which carries no placement offset.
    #[error("passive data segments are not supported")]
    PassiveSegment,

    /// A data segment offset expression that is not `i32.const` + `end`.
    #[error("data segment offset is not a single i32.const expression")]
    BadOffsetExpr,

    /// A split chunk's offset does not fit a 32-bit address.
    #[error("data segment offset overflows 32 bits")]
    OffsetOverflow,
}

/// Module rewrite result type alias.
pub type ModuleResult<T> = Result<T, ModuleError>;
