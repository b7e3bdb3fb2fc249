//! # Stratagram Resolver
//!
//! Resolves the resources of a cloud assembly stack against the metadata
//! the CDK wrote into the manifest. For every resource this yields a
//! construct id, a visibility flag, a qualified diagram id and the diagram
//! ids of the peers it connects to.
//!
//! ## Usage
//!
//! ```
//! use stratagram_core::manifest::{AnnotationEntry, Manifest, MetadataStore, StackArtifact};
//! use stratagram_resolver::Stack;
//!
//! let metadata = MetadataStore::new()
//!     .with_path("/app/queue", vec![AnnotationEntry::show("true")])
//!     .with_path("/app/queue/Resource", vec![AnnotationEntry::logical_id("Queue1")]);
//! let manifest = Manifest::new().with_artifact("app", StackArtifact::new(metadata));
//!
//! let mut stack = Stack::new("app").with_resource("Queue1", "AWS::SQS::Queue");
//! stack.resolve(&manifest);
//!
//! assert!(stack.resource("Queue1").unwrap().is_visible());
//! assert!(stack.diagnostics().is_empty());
//! ```

pub mod classify;
pub mod error;
pub mod stack;

mod connection;
mod container;
mod identity;
mod visibility;

pub use classify::{Classification, ResolvedIdentity, classify};
pub use error::{Diagnostic, ErrorCode, Severity};
pub use stack::Stack;
