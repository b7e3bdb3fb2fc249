//! The core diagnostic type for resolution problems.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, the metadata path it concerns, and help text.

use std::fmt;

use stratagram_core::manifest::AnnotationError;

use crate::error::{ErrorCode, Severity};

/// A diagnostic message about one place in the manifest.
///
/// ```text
/// warning[E101]: no classification rule matches the path of `Rule0A1B2C3D`
///   at /app/web/Listener/Rule
///   = help: the resource is left out of the diagram
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    path: Option<String>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Build the diagnostic for an annotation whose data could not be read.
    pub fn invalid_annotation(err: &AnnotationError, path: &str) -> Self {
        Self::warning(err.to_string())
            .with_code(ErrorCode::E100)
            .with_path(path)
            .with_help("the entry is ignored; annotation data must be a string")
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the metadata path this diagnostic refers to, if any.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the metadata path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            path: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[E101]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Warning, "test warning");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.message(), "test warning");
        assert!(diag.code().is_none());
        assert!(diag.path().is_none());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_display_with_code() {
        let diag = Diagnostic::error("bad data").with_code(ErrorCode::E100);
        assert_eq!(diag.to_string(), "error[E100]: bad data");
    }

    #[test]
    fn test_display_without_code() {
        let diag = Diagnostic::warning("odd path");
        assert_eq!(diag.to_string(), "warning: odd path");
    }

    #[test]
    fn test_invalid_annotation() {
        let err = AnnotationError::InvalidAnnotation {
            kind: "Show".to_string(),
            found: "a boolean",
        };
        let diag = Diagnostic::invalid_annotation(&err, "/app/web");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.path(), Some("/app/web"));
        assert_eq!(
            diag.message(),
            "invalid `Show` annotation: expected a string, found a boolean"
        );
    }
}
