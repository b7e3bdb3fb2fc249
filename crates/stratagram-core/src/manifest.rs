//! The cloud assembly manifest and its per-stack metadata store.
//!
//! A cloud assembly `manifest.json` lists artifacts by name. Stack artifacts
//! carry a `metadata` object mapping construct paths to annotation lists:
//!
//! ```json
//! "/cloudair/monolithSG": [
//!   { "type": "aws:cdk:logicalId", "data": "monolithSG1A2B3C" },
//!   { "type": "Show", "data": "true" },
//!   { "type": "Container", "data": "MonolithVPC" }
//! ]
//! ```
//!
//! Everything here is plain data, read-only once loaded.

use std::collections::{BTreeMap, btree_map};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::path::ManifestPath;

/// Artifact type of a CloudFormation stack in the cloud assembly.
pub const STACK_ARTIFACT_TYPE: &str = "aws:cloudformation:stack";

/// Errors raised while reading annotation values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// The annotation data is not the scalar its kind requires.
    #[error("invalid `{kind}` annotation: expected a string, found {found}")]
    InvalidAnnotation { kind: String, found: &'static str },
}

/// The deserialized `manifest.json` of a cloud assembly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    version: Option<String>,

    #[serde(default)]
    artifacts: BTreeMap<String, StackArtifact>,
}

impl Manifest {
    /// Creates an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the artifact named `name`.
    pub fn with_artifact(mut self, name: impl Into<String>, artifact: StackArtifact) -> Self {
        self.artifacts.insert(name.into(), artifact);
        self
    }

    /// Cloud assembly schema version, if the manifest declares one.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Looks up the artifact of the stack `name`.
    pub fn artifact(&self, name: &str) -> Option<&StackArtifact> {
        self.artifacts.get(name)
    }

    /// Iterates over all artifacts in name order.
    pub fn artifacts(&self) -> impl Iterator<Item = (&str, &StackArtifact)> {
        self.artifacts
            .iter()
            .map(|(name, artifact)| (name.as_str(), artifact))
    }

    /// Iterates over the CloudFormation stack artifacts in name order.
    pub fn stacks(&self) -> impl Iterator<Item = (&str, &StackArtifact)> {
        self.artifacts()
            .filter(|(_, artifact)| artifact.is_stack())
    }
}

/// One artifact of the cloud assembly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StackArtifact {
    #[serde(rename = "type", default)]
    kind: String,

    #[serde(default)]
    properties: ArtifactProperties,

    #[serde(default)]
    metadata: MetadataStore,
}

impl StackArtifact {
    /// Creates a stack artifact holding `metadata`.
    pub fn new(metadata: MetadataStore) -> Self {
        Self {
            kind: STACK_ARTIFACT_TYPE.to_string(),
            properties: ArtifactProperties::default(),
            metadata,
        }
    }

    /// The artifact type, e.g. `aws:cloudformation:stack`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn is_stack(&self) -> bool {
        self.kind == STACK_ARTIFACT_TYPE
    }

    /// Template file name relative to the assembly directory.
    pub fn template_file(&self) -> Option<&str> {
        self.properties.template_file.as_deref()
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactProperties {
    #[serde(default)]
    template_file: Option<String>,
}

/// Mapping from construct path to its ordered annotation entries.
///
/// Paths are kept sorted, so every scan over the store visits them in the
/// same lexicographic order no matter how the store was populated. Entry
/// order within a single path is preserved.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MetadataStore {
    entries: BTreeMap<String, Vec<AnnotationEntry>>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entries` to the list stored under `path`.
    pub fn insert(&mut self, path: impl Into<String>, entries: Vec<AnnotationEntry>) {
        self.entries.entry(path.into()).or_default().extend(entries);
    }

    /// Builder-style [`MetadataStore::insert`].
    pub fn with_path(mut self, path: impl Into<String>, entries: Vec<AnnotationEntry>) -> Self {
        self.insert(path, entries);
        self
    }

    pub fn get(&self, path: &str) -> Option<&[AnnotationEntry]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over every path and its entries in lexicographic path order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Iterates over the paths of `stack` whose final segment is `last`.
    ///
    /// This is the scope in which `Container` and `Connection` annotations
    /// apply to a construct.
    pub fn scoped<'a>(
        &'a self,
        stack: &'a str,
        last: &'a str,
    ) -> impl Iterator<Item = (ManifestPath<'a>, &'a [AnnotationEntry])> + 'a {
        self.iter()
            .filter(move |(path, _)| path.is_scoped_to(stack) && path.last() == last)
    }
}

impl<P: Into<String>> FromIterator<(P, Vec<AnnotationEntry>)> for MetadataStore {
    fn from_iter<I: IntoIterator<Item = (P, Vec<AnnotationEntry>)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (path, entries) in iter {
            store.insert(path, entries);
        }
        store
    }
}

/// Iterator over the paths of a [`MetadataStore`].
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, Vec<AnnotationEntry>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (ManifestPath<'a>, &'a [AnnotationEntry]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(path, entries)| (ManifestPath::new(path), entries.as_slice()))
    }
}

/// The annotation kinds the resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// `aws:cdk:logicalId`: the logical id of the resource at this path.
    LogicalId,
    /// `Show`: the construct at this path is drawn when the value is `true`.
    Show,
    /// `Container`: the construct id of the group this construct is drawn in.
    Container,
    /// `Connection`: the construct id of a peer this construct points at.
    Connection,
    /// Anything else; ignored.
    Other,
}

impl AnnotationKind {
    /// Maps a metadata `type` string to its kind.
    pub fn from_type(kind: &str) -> Self {
        match kind {
            "aws:cdk:logicalId" => Self::LogicalId,
            "Show" => Self::Show,
            "Container" => Self::Container,
            "Connection" => Self::Connection,
            _ => Self::Other,
        }
    }
}

/// A single typed metadata entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnotationEntry {
    #[serde(rename = "type")]
    kind: String,

    #[serde(default)]
    data: Value,
}

impl AnnotationEntry {
    pub fn new(kind: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            data: data.into(),
        }
    }

    /// An `aws:cdk:logicalId` entry.
    pub fn logical_id(logical_id: &str) -> Self {
        Self::new("aws:cdk:logicalId", logical_id)
    }

    /// A `Show` entry.
    pub fn show(value: &str) -> Self {
        Self::new("Show", value)
    }

    /// A `Container` entry.
    pub fn container(construct_id: &str) -> Self {
        Self::new("Container", construct_id)
    }

    /// A `Connection` entry.
    pub fn connection(construct_id: &str) -> Self {
        Self::new("Connection", construct_id)
    }

    /// The raw `type` string.
    pub fn kind_str(&self) -> &str {
        &self.kind
    }

    pub fn kind(&self) -> AnnotationKind {
        AnnotationKind::from_type(&self.kind)
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Reads the entry's data as a string.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotationError::InvalidAnnotation`] when the data is not a
    /// JSON string.
    pub fn text(&self) -> Result<&str, AnnotationError> {
        self.data
            .as_str()
            .ok_or_else(|| AnnotationError::InvalidAnnotation {
                kind: self.kind.clone(),
                found: json_type_name(&self.data),
            })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
