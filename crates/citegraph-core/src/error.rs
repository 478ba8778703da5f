//! Error taxonomy for citation-graph queries and catalog lookups.

use thiserror::Error;

/// Failures surfaced by query building, execution, and enrichment.
///
/// The split between `Query` and `Transport` matters to callers: a `Query`
/// rejection is caller-fixable and must not be retried, while `Transport`
/// failures are candidates for retry/backoff at the call site. The core
/// never retries and never swallows an error; everything propagates to the
/// immediate caller.
#[derive(Error, Debug)]
pub enum Error {
    /// A query builder was invoked without a lookup key.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The index rejected the request as malformed. Carries the most
    /// specific diagnostic the index reported.
    #[error("query rejected: {message}")]
    Query { message: String },

    /// Index or catalog transport failure: timeout, connection refused,
    /// non-2xx status outside the validation class.
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// The catalog has no release under the requested identifier.
    #[error("release not found: {ident}")]
    NotFound { ident: String },

    /// A response from the index or catalog did not decode into the
    /// expected shape. Treat like `Transport` for retry purposes.
    #[error("unparseable response: {message}")]
    Parse { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
