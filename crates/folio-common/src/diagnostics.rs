//! Layout diagnostics with stable message identifiers.
//!
//! The resolver never formats or localizes messages. It reports a
//! [`DiagnosticId`] together with the arena index of the node concerned and
//! lets the caller decide what to do with it.

use std::collections::HashSet;

use log::warn;
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// Stable identifier of a layout diagnostic.
///
/// The string form (`Display` / `Into<&'static str>`) is part of the public
/// contract and never changes between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum DiagnosticId {
    /// Content does not fit horizontally in the area offered to it and was
    /// placed overflowing instead.
    #[strum(serialize = "element-does-not-fit-area")]
    ElementDoesNotFitArea,
}

/// One diagnostic emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// What happened.
    pub id: DiagnosticId,
    /// Arena index of the node the diagnostic is about.
    pub node: usize,
}

/// Receiver for diagnostics raised during a layout call.
pub trait DiagnosticSink {
    /// Record a single diagnostic.
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Sink that forwards diagnostics to the `log` facade.
///
/// Each distinct `(id, node)` pair is logged once, so re-laying out the same
/// content against a new area does not spam the log.
#[derive(Debug, Default)]
pub struct LogSink {
    seen: HashSet<Diagnostic>,
}

impl LogSink {
    /// Create a sink with no recorded diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every diagnostic seen so far (call when starting a new document).
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if self.seen.insert(diagnostic) {
            warn!(
                target: "folio::diagnostics",
                "[{}] node #{}",
                diagnostic.id,
                diagnostic.node
            );
        }
    }
}

/// Sink that keeps every emission in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    diagnostics: Vec<Diagnostic>,
}

impl RecordingSink {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All diagnostics recorded so far, in emission order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of recorded emissions carrying `id`.
    #[must_use]
    pub fn count(&self, id: DiagnosticId) -> usize {
        self.diagnostics.iter().filter(|d| d.id == id).count()
    }

    /// Drop all recorded diagnostics.
    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn identifiers_are_stable_kebab_case() {
        let id: &'static str = DiagnosticId::ElementDoesNotFitArea.into();
        assert_eq!(id, "element-does-not-fit-area");
        for id in DiagnosticId::iter() {
            let text = id.to_string();
            assert!(
                text.chars().all(|c| c.is_ascii_lowercase() || c == '-'),
                "{text} is not kebab-case"
            );
        }
    }

    #[test]
    fn log_sink_dedups_per_node() {
        let mut sink = LogSink::new();
        let diag = Diagnostic {
            id: DiagnosticId::ElementDoesNotFitArea,
            node: 3,
        };
        sink.emit(diag);
        sink.emit(diag);
        sink.emit(Diagnostic { node: 4, ..diag });
        assert_eq!(sink.seen.len(), 2);

        sink.clear();
        assert!(sink.seen.is_empty());
    }

    #[test]
    fn recording_sink_keeps_order_and_duplicates() {
        let mut sink = RecordingSink::new();
        let diag = Diagnostic {
            id: DiagnosticId::ElementDoesNotFitArea,
            node: 1,
        };
        sink.emit(diag);
        sink.emit(Diagnostic { node: 0, ..diag });
        sink.emit(diag);
        assert_eq!(sink.count(DiagnosticId::ElementDoesNotFitArea), 3);
        assert_eq!(sink.diagnostics()[1].node, 0);
    }
}
