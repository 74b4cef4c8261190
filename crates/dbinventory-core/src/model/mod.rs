//! Data models
//!
//! Ledger entities (hosts, tags, tag groups) and the provider record shapes
//! that flow through synthesis.

mod host;
mod record;
mod tag;

// Re-exports
pub use host::*;
pub use record::*;
pub use tag::*;
