//! Pipeline error type.

use thiserror::Error;

/// Union of every failure a generation pass can hit.
///
/// A single error aborts the whole pass; no artifact file is written.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A declaration failed schema-level validation.
    #[error(transparent)]
    Schema(#[from] chaingen_schema::SchemaError),

    /// A declared type could not be resolved to an ABI type.
    #[error(transparent)]
    Type(#[from] chaingen_abi::TypeError),

    /// Source emission failed.
    #[error(transparent)]
    Emit(#[from] chaingen_codegen::EmitError),

    /// The binary module rewrite failed.
    #[error(transparent)]
    Module(#[from] chaingen_wasm::ModuleError),

    /// Writing an artifact file failed.
    #[error("writing artifact: {0}")]
    Io(#[from] std::io::Error),
}

/// Pipeline result type alias.
pub type GenerateResult<T> = Result<T, GenerateError>;
