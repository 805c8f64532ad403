//! crossing-export
//!
//! DOCX inspection report generation and prompt template rendering.

pub mod docx;
pub mod error;
pub mod render;
pub mod styles;
