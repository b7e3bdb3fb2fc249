//! Collector for accumulating diagnostics while a stack is resolved.

use log::debug;

use crate::error::Diagnostic;

/// Accumulates diagnostics in the order they are reported.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    ///
    /// Every resource scans the whole metadata store, so the same problem is
    /// typically found once per resource. Repeats are dropped.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if self.diagnostics.contains(&diagnostic) {
            return;
        }
        debug!(
            code:? = diagnostic.code(),
            path:? = diagnostic.path();
            "{}", diagnostic.message()
        );
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection, returning every diagnostic.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_new_finish_empty() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().is_empty());
    }

    #[test]
    fn test_collector_keeps_order() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::warning("first"));
        collector.emit(Diagnostic::error("second"));

        let diagnostics = collector.finish();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message(), "first");
        assert!(diagnostics[1].severity().is_error());
    }

    #[test]
    fn test_collector_drops_repeats() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::error("bad").with_path("/a/b"));
        collector.emit(Diagnostic::error("bad").with_path("/a/b"));
        collector.emit(Diagnostic::error("bad").with_path("/a/c"));

        assert_eq!(collector.finish().len(), 2);
    }
}
