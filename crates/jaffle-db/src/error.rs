//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`]. Nothing in this crate
//! retries or recovers; callers translate the variants into responses.

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A single-row lookup matched no rows.
    #[error("not found: {0}")]
    NotFound(String),

    /// A statement failed: malformed SQL, a decode mismatch, or a
    /// storage-engine failure.
    #[error("query error: {0}")]
    Query(#[from] sqlx::Error),

    /// The page number or page size cannot address a page.
    #[error("invalid page: {0}")]
    InvalidPage(String),

    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
