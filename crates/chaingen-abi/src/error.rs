//! ABI-level error types.

use chaingen_schema::Loc;
use thiserror::Error;

/// A declared type could not be resolved to a primitive or a known
/// record/variant. Fatal: aborts ABI assembly for the whole pass.
#[derive(Debug, Error)]
#[error("{loc}: type `{type_name}` cannot be converted to an ABI type{}", hint_suffix(.hint))]
pub struct TypeError {
    /// The offending declared type name.
    pub type_name: String,
    /// The declaration site.
    pub loc: Loc,
    /// Set when the name collides with a commonly mistyped primitive alias.
    pub hint: Option<&'static str>,
}

fn hint_suffix(hint: &Option<&'static str>) -> String {
    match hint {
        Some(alias) => format!("\ndid you mean `{alias}`?"),
        None => String::new(),
    }
}

/// ABI result type alias.
pub type AbiResult<T> = Result<T, TypeError>;
