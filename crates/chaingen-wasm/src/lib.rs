//! Binary module rewriter for the chaingen contract generator.
//!
//! Post-processes a compiled contract module for deployment: strips
//! custom sections, and splits data segments larger than the platform's
//! per-segment ceiling ([`MAX_DATA_SEGMENT`]) into consecutive chunks so
//! linear-memory contents are preserved exactly. Everything else is
//! copied verbatim. Any format error aborts the whole rewrite.

mod error;
mod rewrite;

pub use error::{ModuleError, ModuleResult};
pub use rewrite::{rewrite_module, MAX_DATA_SEGMENT};
