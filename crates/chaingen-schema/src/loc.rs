use std::fmt;

/// Declaration location, carried by every descriptor for error reporting.
///
/// Line numbers are 1-based. The front end that extracts declarations fills
/// these in; generated diagnostics render as `file:line`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Loc {
    pub file: String,
    pub line: u32,
}

impl Loc {
    /// Create a new location.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
