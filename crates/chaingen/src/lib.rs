//! Contract generation pipeline.
//!
//! One invocation is one pure pass: a validated [`Schema`] goes in, the
//! ABI JSON document and the generated support source come out, fully
//! assembled in memory. Artifact files are written only after both
//! succeed, so a failed pass never leaves a partial artifact behind.
//! Module rewriting ([`rewrite_module`]) is an independent pass over a
//! compiled binary with the same all-or-nothing policy.

mod error;

use std::fs;
use std::path::Path;

pub use chaingen_abi::{assemble, AbiDocument};
pub use chaingen_codec::{Codec, Value};
pub use chaingen_codegen::emit_contract;
pub use chaingen_schema::Schema;
pub use chaingen_wasm::rewrite_module;
pub use error::{GenerateError, GenerateResult};

/// Settings for one generation pass.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Names the `.abi` artifact; the fallback artifact name is
    /// `generated`.
    pub contract_name: String,
}

/// The in-memory result of a generation pass.
#[derive(Debug, Clone)]
pub struct Artifacts {
    /// Pretty-printed ABI document.
    pub abi_json: String,
    /// Generated table accessor and dispatch source.
    pub contract_code: String,
}

/// Run a full generation pass over a validated schema.
pub fn generate(schema: &Schema) -> GenerateResult<Artifacts> {
    let abi = assemble(schema)?;
    let contract_code = emit_contract(schema)?;
    Ok(Artifacts {
        abi_json: abi.to_json(),
        contract_code,
    })
}

impl Artifacts {
    /// Write both artifacts into `dir`.
    ///
    /// Called only with a complete in-memory result; an I/O failure on
    /// the first file leaves the second unwritten rather than partial.
    pub fn write_to(&self, dir: &Path, options: &GenerateOptions) -> GenerateResult<()> {
        let stem = if options.contract_name.is_empty() {
            "generated"
        } else {
            options.contract_name.as_str()
        };
        fs::write(dir.join(format!("{stem}.abi")), &self.abi_json)?;
        fs::write(dir.join("generated.rs"), &self.contract_code)?;
        Ok(())
    }
}

/// Rewrite a compiled contract module and write it only on success.
pub fn rewrite_module_file(input: &Path, output: &Path) -> GenerateResult<()> {
    let bytes = fs::read(input)?;
    let rewritten = rewrite_module(&bytes)?;
    fs::write(output, rewritten)?;
    Ok(())
}
