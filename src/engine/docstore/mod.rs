//! Paraquery Document Backend
//!
//! A directory-backed JSON document store with:
//! - UUID document IDs
//! - Per-collection directories, one file per document
//! - A structured filter language mirroring document-database query syntax
//!   (anchored regexes, OR-lists of regexes, AND of filters, projection)

pub mod collection;
pub mod document;
pub mod error;
pub mod filter;
pub mod store;

pub use collection::Collection;
pub use document::Document;
pub use error::DocStoreError;
pub use filter::{Filter, FilterOp, Query};
pub use store::DocStore;
