//! Paraquery - side-by-side SQL vs document-store query comparison
//!
//! The same flat product catalog lives in two embedded backends: a relational
//! SQLite store and a directory-backed JSON document store. A fixed catalog
//! of paired operations ([`engine::compare`]) issues the equivalent query
//! against both, so the translation between `LIKE` wildcards and anchored
//! regular expressions can be inspected record by record.

pub mod engine;
