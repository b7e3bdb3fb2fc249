//! Export functionality for Stratagram diagrams.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing a [`DiagramGraph`] in an output format. It is the final stage in
//! the Stratagram pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Cloud Assembly Manifest + Stack Resources
//!     ↓ resolve
//! Resolved Stacks
//!     ↓ structure
//! Diagram Graph
//!     ↓ export (this module)
//! Output
//! ```
//!
//! # Available Backends
//!
//! - [`d2`]: D2 source via [`d2::D2Exporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`StratagramError::Export`] at the crate boundary.
//!
//! [`StratagramError::Export`]: crate::StratagramError::Export

/// D2 export backend.
pub mod d2;

use crate::structure::DiagramGraph;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Exports every node and edge of `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing the output fails.
    fn export_graph(&mut self, graph: &DiagramGraph) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A node that cannot be expressed in the target format.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
