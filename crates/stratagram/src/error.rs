//! Error types for Stratagram operations.
//!
//! This module provides the main error type [`StratagramError`] which wraps
//! the fatal error conditions of diagram generation. Problems with single
//! annotations are not errors; they are reported as resolver diagnostics.

use std::io;

use thiserror::Error;

/// The main error type for Stratagram operations.
#[derive(Debug, Error)]
pub enum StratagramError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid cloud assembly manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cloud assembly error: {0}")]
    Assembly(Box<dyn std::error::Error>),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for StratagramError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
