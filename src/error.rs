use thiserror::Error;

/// Input text is not valid JSON.
///
/// The only failure the core can report: everything downstream of a
/// successful decode is total.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid JSON at {path} (line {line}, column {column}): {message}")]
pub struct ParseError {
    /// Decoder diagnostic, without the location suffix.
    pub message: String,
    /// JSON path of the node being decoded when the failure happened (`.` for the root).
    pub path: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub(crate) fn new(path: String, err: &serde_json::Error) -> Self {
        // serde_json appends " at line X column Y" to Display; keep that in the fields instead
        let full = err.to_string();
        let suffix = format!(" at line {} column {}", err.line(), err.column());
        let message = full.strip_suffix(&suffix).unwrap_or(&full).to_string();
        Self { message, path, line: err.line(), column: err.column() }
    }
}
