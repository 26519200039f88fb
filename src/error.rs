//! Error types for the validation model.
//!
//! The resolvers in this crate never fail: malformed input degrades to an
//! absent result and a log record. Errors only surface from the explicit
//! document-access entry points (object lookup, stream decoding, reading the
//! structure tree root from the catalog).

/// Result type alias for validation model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while materializing the object graph.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)] // "Invalid" prefix is intentional for clarity
pub enum Error {
    /// Referenced object not found in the document
    #[error("Object not found: {0} {1} R")]
    ObjectNotFound(u32, u16),

    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// Invalid PDF structure (generic)
    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    /// Stream decoding error
    #[error("Stream decoding error: {0}")]
    Decode(String),

    /// Unsupported stream filter
    #[error("Unsupported filter: {0}")]
    UnsupportedFilter(String),
}
