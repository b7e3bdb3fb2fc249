//! Diagnostics reported while resolving a stack.
//!
//! Resolution never fails as a whole. Problems with individual annotations
//! or paths are recorded as [`Diagnostic`]s and the offending entry is
//! skipped, so one bad entry cannot hide the rest of the manifest.
//!
//! # Example
//!
//! ```
//! # use stratagram_resolver::error::{Diagnostic, ErrorCode};
//!
//! let diag = Diagnostic::warning("no classification rule matches path")
//!     .with_code(ErrorCode::E101)
//!     .with_path("/app/web/Listener/Rule")
//!     .with_help("the resource is left out of the diagram");
//!
//! assert_eq!(
//!     diag.to_string(),
//!     "warning[E101]: no classification rule matches path"
//! );
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use severity::Severity;
