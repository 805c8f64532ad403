//! crossing-app library root.
//!
//! The session shell around the inspection store: configuration, file
//! reading, save/open, and report generation. Exposed as a library so
//! integration tests can drive the same operations the CLI runs.

pub mod aws;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;
