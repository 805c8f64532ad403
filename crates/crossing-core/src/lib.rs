//! crossing-core
//!
//! The live record of one crossing inspection: field values, attached
//! photographs, the portable save/open document, and the read-only views
//! (narrative text and report table) derived from it.

pub mod error;
pub mod models;
pub mod projection;
pub mod store;
