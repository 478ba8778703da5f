//! Refs-index query pipeline: query construction, the search collaborator
//! boundary, the concrete HTTP backend, and execution.

pub mod backend;
pub mod builder;
pub mod es;
pub mod exec;
pub mod query;

pub use backend::{SearchBackend, SearchPage};
pub use builder::{InboundCountQuery, InboundQuery, OutboundQuery, RefSort};
pub use es::EsBackend;
pub use exec::{
    RefIndex, DEFAULT_INBOUND_LIMIT, DEFAULT_OUTBOUND_LIMIT, DEFAULT_REF_INDEX, MAX_LIMIT,
};
pub use query::{Collapse, QueryFilter, RefQuery, SortDirection, SortSpec};
