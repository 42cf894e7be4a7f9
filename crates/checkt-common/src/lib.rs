//! Common types shared by the checkt crates.
//!
//! This crate provides:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`) and the message table
//! - The `DiagnosticSink` seam through which every phase reports problems

pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, DiagnosticSink, diagnostic_codes,
    format_message, get_diagnostic_message,
};
