/// Errors that can occur while decoding the compact wire format
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A required envelope field is absent
    #[error("missing required field at {path}")]
    MissingField {
        /// Path of the missing field (e.g., "table.n")
        path: String,
    },

    /// A field holds the wrong JSON value kind
    #[error("unexpected value kind at {path}: expected {expected}")]
    UnexpectedKind {
        /// Path of the offending field
        path: String,
        /// The value kind that was required
        expected: &'static str,
    },

    /// A reference points past the end of a dedup table
    #[error("index {index} out of range for {table}")]
    IndexOutOfRange {
        /// Which dedup table was addressed
        table: &'static str,
        /// The dangling index
        index: usize,
    },

    /// A column matched neither the literal nor the run-length shape
    #[error("column {index} is neither a literal index array nor a run-length list")]
    Column {
        /// Zero-based column index within the table fragment
        index: usize,
    },

    /// A run record violates `from <= to`
    #[error("invalid run record at {path}: from > to")]
    InvalidRun {
        /// Path of the offending run record
        path: String,
    },

    /// JSON serialization error from serde
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
