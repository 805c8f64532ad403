//! crossing-bedrock
//!
//! Narrative generation for inspection reports via the Bedrock Converse API.

pub mod context;
pub mod converse;
pub mod error;
pub mod narrate;
