//! Common utilities for the Folio layout resolver.
//!
//! This crate provides shared infrastructure used by the layout crates:
//! - **Diagnostics** - stable message identifiers and sinks for non-fatal
//!   layout conditions such as horizontal overflow

pub mod diagnostics;

pub use diagnostics::{Diagnostic, DiagnosticId, DiagnosticSink, LogSink, RecordingSink};
