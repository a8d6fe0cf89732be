//! Error types shared by the loader and the resolver.

use std::path::PathBuf;

/// Errors that can occur while loading tables or resolving requirements.
///
/// Every error is fatal for the current request: the resolver never
/// returns a partial result alongside one of these.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// A throughput row names a mechanism with no known productivity.
    #[error("mechanism for fabrication is not recognized: {0}")]
    UnknownFacilityKind(String),

    /// An item was requested that the throughput table does not know.
    #[error("unknown item '{0}'")]
    UnknownItem(String),

    /// A recipe references an input missing from the throughput table.
    #[error("missing resource '{input}' required by '{output}' is not in the outputs table")]
    MissingInputDefinition { output: String, input: String },

    /// The desired rate was negative or not a finite number.
    #[error("invalid rate {0}: rates must be finite and non-negative")]
    InvalidRate(f64),

    /// A cycle duration was zero, negative or not finite.
    #[error("invalid cycle duration {duration} for '{item}'")]
    InvalidDuration { item: String, duration: f64 },

    /// A unit output was zero, negative or not finite.
    #[error("invalid unit output {output} for '{item}'")]
    InvalidOutput { item: String, output: f64 },

    /// A recipe cost was negative or not finite.
    #[error("invalid amount {amount} of '{input}' for '{output}'")]
    InvalidAmount {
        output: String,
        input: String,
        amount: f64,
    },

    /// Two resolved entries for different items were merged.
    #[error("type mismatch on merging resource counts: '{expected}' vs '{found}'")]
    ItemMismatch { expected: String, found: String },

    /// The recipe tree is deeper than the configured guard allows.
    #[error("recipe tree for '{item}' exceeds the maximum depth of {max_depth} (possible cycle)")]
    DepthExceeded { item: String, max_depth: usize },

    /// A CSV file could not be parsed.
    #[error("parse error in {file}: {source}")]
    Csv { file: PathBuf, source: csv::Error },

    /// A CSV row parsed but failed validation.
    #[error("invalid row at {file}:{line}: {source}")]
    InvalidRow {
        file: PathBuf,
        /// 1-based line number, the header being line 1
        line: u64,
        source: Box<PlannerError>,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlannerError>;
