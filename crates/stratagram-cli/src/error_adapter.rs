//! Error adapter for converting Stratagram errors and diagnostics to miette
//! reports.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! Fatal errors come from [`StratagramError`]. Resolution problems never
//! fail a run; each resolver [`Diagnostic`] is rendered on its own, tagged
//! with the stack it was found in.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity as MietteSeverity};

use stratagram::{Diagnostic, ResolvedDiagram, Severity, StratagramError};

/// Adapter for a single resolver diagnostic.
pub struct DiagnosticAdapter<'a> {
    /// Name of the stack the diagnostic was found in
    stack: &'a str,
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(stack: &'a str, diag: &'a Diagnostic) -> Self {
        Self { stack, diag }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("stack", &self.stack)
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stack, self.diag.message())?;
        if let Some(path) = self.diag.path() {
            write!(f, " (at {path})")?;
        }
        Ok(())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// Adapter for [`StratagramError`] variants.
pub struct ErrorAdapter<'a>(pub &'a StratagramError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StratagramError::Io(_) => "stratagram::io",
            StratagramError::Manifest(_) => "stratagram::manifest",
            StratagramError::Config(_) => "stratagram::config",
            StratagramError::Assembly(_) => "stratagram::assembly",
            StratagramError::Export(_) => "stratagram::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            StratagramError::Manifest(_) => "expected the manifest.json of a synthesized CDK app",
            StratagramError::Config(_) => "see the [style] and [icons] sections of config.toml",
            StratagramError::Assembly(_) => {
                "pass a cdk.out directory or its manifest.json, after running `cdk synth`"
            }
            StratagramError::Io(_) | StratagramError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A resolver diagnostic.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A fatal error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`StratagramError`] into a list of reportable errors.
pub fn to_reportables(err: &StratagramError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}

/// Convert the diagnostics of every resolved stack into reportables.
pub fn diagnostic_reportables(diagram: &ResolvedDiagram) -> Vec<Reportable<'_>> {
    diagram
        .diagnostics()
        .map(|(stack, diag)| Reportable::Diagnostic(DiagnosticAdapter::new(stack, diag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use stratagram::{
        DiagramBuilder, ErrorCode, Stack,
        manifest::{AnnotationEntry, Manifest, MetadataStore, StackArtifact},
    };

    use super::*;

    #[test]
    fn test_diagnostic_adapter() {
        let diag = Diagnostic::warning("no classification rule matches")
            .with_code(ErrorCode::E101)
            .with_path("/app/a/b/c/d")
            .with_help("other paths are still tried");

        let adapter = DiagnosticAdapter::new("app", &diag);

        assert_eq!(
            adapter.to_string(),
            "[app] no classification rule matches (at /app/a/b/c/d)"
        );
        assert_eq!(adapter.code().unwrap().to_string(), "E101");
        assert_eq!(adapter.severity(), Some(MietteSeverity::Warning));
        assert_eq!(adapter.help().unwrap().to_string(), "other paths are still tried");
    }

    #[test]
    fn test_error_adapter() {
        let err = StratagramError::Config("bad color".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Configuration error: bad color");
                assert_eq!(e.code().unwrap().to_string(), "stratagram::config");
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_assembly_error_code() {
        let err = StratagramError::Assembly("no manifest".into());

        let adapter = ErrorAdapter(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "stratagram::assembly");
        assert_eq!(adapter.to_string(), "Cloud assembly error: no manifest");
        assert!(adapter.help().is_some());
    }

    #[test]
    fn test_diagnostic_reportables() {
        let metadata = MetadataStore::new().with_path(
            "/app/queue/Resource",
            vec![AnnotationEntry::new("aws:cdk:logicalId", 7)],
        );
        let manifest = Manifest::new().with_artifact("app", StackArtifact::new(metadata));
        let stacks = vec![
            Stack::new("app").with_resource("Queue1", "AWS::SQS::Queue"),
            Stack::new("ghost").with_resource("Topic1", "AWS::SNS::Topic"),
        ];

        let diagram = DiagramBuilder::default().resolve(&manifest, stacks);
        let reportables = diagnostic_reportables(&diagram);

        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].code().unwrap().to_string(), "E100");
        assert!(reportables[0].to_string().starts_with("[app] "));
        assert_eq!(reportables[1].code().unwrap().to_string(), "E103");
        assert!(reportables[1].to_string().starts_with("[ghost] "));
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let diag = Diagnostic::warning("odd path").with_code(ErrorCode::E101);
        let reportable = Reportable::Diagnostic(DiagnosticAdapter::new("app", &diag));

        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &reportable)
            .unwrap();

        assert!(out.contains("odd path"));
        assert!(out.contains("E101"));
    }
}
