//! The stack orchestrator.
//!
//! A [`Stack`] owns its resources and every lookup built while resolving
//! them. Resolution runs in two passes over the resources in their fixed
//! order:
//!
//! 1. construct ids and visibility, filling the construct id → logical id
//!    lookup;
//! 2. qualified diagram ids, filling the logical id → diagram id lookup.
//!
//! Connections are resolved last, once both lookups are complete, so a
//! resource may reference any other resource of the stack regardless of
//! where it sits in the order.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, info, warn};

use stratagram_core::{
    identifier::Id,
    manifest::{Manifest, MetadataStore},
    resource::{Resource, ResourceType},
};

use crate::{
    connection, container,
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    identity, visibility,
};

/// A named stack and its resources.
///
/// # Examples
///
/// ```
/// use stratagram_core::manifest::{AnnotationEntry, Manifest, MetadataStore, StackArtifact};
/// use stratagram_resolver::Stack;
///
/// let metadata = MetadataStore::new()
///     .with_path("/appStack/baseVPC", vec![
///         AnnotationEntry::show("true"),
///         AnnotationEntry::container("VPCGroup"),
///     ])
///     .with_path("/appStack/baseVPC/Resource", vec![AnnotationEntry::logical_id("R1")]);
/// let manifest = Manifest::new().with_artifact("appStack", StackArtifact::new(metadata));
///
/// let mut stack = Stack::new("appStack").with_resource("R1", "AWS::EC2::VPC");
/// stack.resolve(&manifest);
///
/// let vpc = stack.resource("R1").unwrap();
/// assert!(vpc.is_visible());
/// assert_eq!(vpc.diagram_id(), "VPCGroup.R1");
/// ```
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    resources: IndexMap<Id, Resource>,
    logical_ids: HashMap<Id, Id>,
    diagram_ids: HashMap<Id, Id>,
    connections: HashMap<Id, Vec<Id>>,
    diagnostics: Vec<Diagnostic>,
}

impl Stack {
    /// Creates an empty stack named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: IndexMap::new(),
            logical_ids: HashMap::new(),
            diagram_ids: HashMap::new(),
            connections: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Appends a resource. Insertion order is resolution and emission order.
    ///
    /// Adding a logical id twice replaces the earlier resource in place.
    pub fn add_resource(&mut self, logical_id: &str, resource_type: impl Into<ResourceType>) {
        let logical_id = Id::new(logical_id);
        self.resources
            .insert(logical_id, Resource::new(logical_id, resource_type.into()));
    }

    /// Builder-style [`Stack::add_resource`].
    pub fn with_resource(mut self, logical_id: &str, resource_type: impl Into<ResourceType>) -> Self {
        self.add_resource(logical_id, resource_type);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterates over the resources in stack order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(&Id::new(logical_id))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// The logical id resolved for `construct_id`, short or nested-qualified.
    pub fn logical_id_of(&self, construct_id: Id) -> Option<Id> {
        self.logical_ids.get(&construct_id).copied()
    }

    /// The qualified diagram id of the resource `logical_id`.
    pub fn diagram_id_of(&self, logical_id: Id) -> Option<Id> {
        self.diagram_ids.get(&logical_id).copied()
    }

    /// Diagram ids of the peers the visible resource `logical_id` connects to.
    pub fn connections(&self, logical_id: Id) -> &[Id] {
        self.connections
            .get(&logical_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Problems found by the last [`Stack::resolve`].
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Resolves every resource of this stack against `manifest`.
    ///
    /// Results of an earlier run are discarded first, so resolving again
    /// against the same manifest yields the same state.
    pub fn resolve(&mut self, manifest: &Manifest) {
        self.reset();
        let mut diagnostics = DiagnosticCollector::new();

        info!(stack = self.name, resources = self.resources.len(); "Resolving stack");

        match manifest.artifact(&self.name) {
            Some(artifact) => {
                let store = artifact.metadata();
                self.resolve_identities(store, &mut diagnostics);
                self.resolve_diagram_ids(store, &mut diagnostics);
                self.resolve_connections(store, &mut diagnostics);
            }
            None => {
                warn!(stack = self.name; "No artifact for stack in manifest");
                diagnostics.emit(
                    Diagnostic::warning(format!("manifest has no artifact for stack `{}`", self.name))
                        .with_code(ErrorCode::E103)
                        .with_help("none of the stack's resources can be shown"),
                );
            }
        }

        self.diagnostics = diagnostics.finish();

        debug!(
            stack = self.name,
            resolved = self.resources().filter(|r| r.is_resolved()).count(),
            visible = self.resources().filter(|r| r.is_visible()).count(),
            diagnostics = self.diagnostics.len();
            "Stack resolved"
        );
    }

    fn reset(&mut self) {
        for resource in self.resources.values_mut() {
            resource.clear_resolution();
        }
        self.logical_ids.clear();
        self.diagram_ids.clear();
        self.connections.clear();
        self.diagnostics.clear();
    }

    /// Pass 1: construct ids, refined types and visibility.
    fn resolve_identities(&mut self, store: &MetadataStore, diagnostics: &mut DiagnosticCollector) {
        for resource in self.resources.values_mut() {
            let Some(classification) = identity::resolve_identity(store, resource, diagnostics)
            else {
                continue;
            };

            let (identity, refined_type) = classification.into_parts();
            if let Some(refined_type) = refined_type {
                resource.set_resource_type(refined_type);
            }

            let construct_id = identity.construct_id();
            resource.set_construct_id(construct_id);
            resource.set_visible(visibility::is_visible(store, construct_id, diagnostics));

            let logical_id = resource.logical_id();
            self.logical_ids.insert(construct_id, logical_id);
            if let Some(extended) = identity.extended_construct_id() {
                self.logical_ids.insert(extended, logical_id);
            }
        }
    }

    /// Pass 2: qualified diagram ids. Needs pass 1 complete for every resource.
    fn resolve_diagram_ids(&mut self, store: &MetadataStore, diagnostics: &mut DiagnosticCollector) {
        for resource in self.resources.values_mut() {
            let Some(construct_id) = resource.construct_id() else {
                continue;
            };

            let diagram_id = container::qualified_diagram_id(
                store,
                &self.name,
                construct_id,
                resource.logical_id(),
                diagnostics,
            );
            resource.set_diagram_id(diagram_id);
            self.diagram_ids.insert(resource.logical_id(), diagram_id);
        }
    }

    fn resolve_connections(&mut self, store: &MetadataStore, diagnostics: &mut DiagnosticCollector) {
        for resource in self.resources.values().filter(|r| r.is_visible()) {
            let Some(construct_id) = resource.construct_id() else {
                continue;
            };

            let targets = connection::resolve_connections(
                store,
                &self.name,
                construct_id,
                &self.logical_ids,
                &self.diagram_ids,
                diagnostics,
            );
            if !targets.is_empty() {
                self.connections.insert(resource.logical_id(), targets);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use stratagram_core::manifest::{AnnotationEntry, StackArtifact};

    use super::*;

    fn manifest(stack: &str, metadata: MetadataStore) -> Manifest {
        Manifest::new().with_artifact(stack, StackArtifact::new(metadata))
    }

    #[test]
    fn test_missing_artifact() {
        let mut stack = Stack::new("ghost").with_resource("R1", "AWS::EC2::VPC");
        stack.resolve(&Manifest::new());

        let resource = stack.resource("R1").unwrap();
        assert!(!resource.is_resolved());
        assert!(!resource.is_visible());
        assert_eq!(resource.diagram_id(), "R1");
        assert_eq!(stack.diagnostics().len(), 1);
        assert_eq!(stack.diagnostics()[0].code(), Some(ErrorCode::E103));
    }

    #[test]
    fn test_subnet_type_is_refined() {
        let metadata = MetadataStore::new().with_path(
            "/appStack/netConstruct/privateSubnet1/Subnet",
            vec![AnnotationEntry::logical_id("R2")],
        );
        let mut stack = Stack::new("appStack").with_resource("R2", ResourceType::SUBNET);
        stack.resolve(&manifest("appStack", metadata));

        let subnet = stack.resource("R2").unwrap();
        assert_eq!(
            subnet.construct_id(),
            Some(Id::new("netConstruct/privateSubnet1"))
        );
        assert_eq!(subnet.resource_type().as_str(), ResourceType::PRIVATE_SUBNET);
        assert_eq!(subnet.declared_type().as_str(), ResourceType::SUBNET);
    }

    #[test]
    fn test_reverse_lookups() {
        let metadata = MetadataStore::new()
            .with_path(
                "/app/Db.NestedStack/Cluster/Resource",
                vec![AnnotationEntry::logical_id("Cluster1")],
            )
            .with_path("/app/Cluster", vec![AnnotationEntry::container("Data")]);
        let mut stack = Stack::new("app").with_resource("Cluster1", "AWS::RDS::DBCluster");
        stack.resolve(&manifest("app", metadata));

        let logical_id = Id::new("Cluster1");
        assert_eq!(stack.logical_id_of(Id::new("Cluster")), Some(logical_id));
        assert_eq!(
            stack.logical_id_of(Id::new("Db.NestedStack/Cluster/Resource")),
            Some(logical_id)
        );
        assert_eq!(stack.diagram_id_of(logical_id), Some(Id::new("Data.Cluster1")));
    }

    #[test]
    fn test_connection_to_later_resource() {
        let metadata = MetadataStore::new()
            .with_path(
                "/app/web",
                vec![AnnotationEntry::show("true"), AnnotationEntry::connection("db")],
            )
            .with_path("/app/web/Resource", vec![AnnotationEntry::logical_id("Web1")])
            .with_path(
                "/app/db",
                vec![AnnotationEntry::show("true"), AnnotationEntry::container("Data")],
            )
            .with_path("/app/db/Resource", vec![AnnotationEntry::logical_id("Db1")]);

        // `Web1` comes first but connects to `Db1`, resolved after it.
        let mut stack = Stack::new("app")
            .with_resource("Web1", "AWS::EC2::Instance")
            .with_resource("Db1", "AWS::RDS::DBInstance");
        stack.resolve(&manifest("app", metadata));

        assert_eq!(stack.connections(Id::new("Web1")), &[Id::new("Data.Db1")]);
        assert!(stack.connections(Id::new("Db1")).is_empty());
    }

    #[test]
    fn test_connection_to_missing_thing() {
        let metadata = MetadataStore::new()
            .with_path(
                "/app/web",
                vec![
                    AnnotationEntry::show("true"),
                    AnnotationEntry::connection("missingThing"),
                ],
            )
            .with_path("/app/web/Resource", vec![AnnotationEntry::logical_id("Web1")]);
        let mut stack = Stack::new("app").with_resource("Web1", "AWS::EC2::Instance");
        stack.resolve(&manifest("app", metadata));

        assert!(stack.connections(Id::new("Web1")).is_empty());
        assert!(stack.diagnostics().is_empty());
    }

    #[test]
    fn test_invisible_resources_have_no_connections() {
        let metadata = MetadataStore::new()
            .with_path("/app/web", vec![AnnotationEntry::connection("db")])
            .with_path("/app/web/Resource", vec![AnnotationEntry::logical_id("Web1")])
            .with_path("/app/db/Resource", vec![AnnotationEntry::logical_id("Db1")]);
        let mut stack = Stack::new("app")
            .with_resource("Web1", "AWS::EC2::Instance")
            .with_resource("Db1", "AWS::RDS::DBInstance");
        stack.resolve(&manifest("app", metadata));

        assert!(!stack.resource("Web1").unwrap().is_visible());
        assert!(stack.connections(Id::new("Web1")).is_empty());
    }

    #[test]
    fn test_unannotated_resource_stays_unresolved() {
        let metadata = MetadataStore::new()
            .with_path("/app/web/Resource", vec![AnnotationEntry::logical_id("Web1")]);
        let mut stack = Stack::new("app")
            .with_resource("Web1", "AWS::EC2::Instance")
            .with_resource("Policy1", "AWS::IAM::Policy");
        stack.resolve(&manifest("app", metadata));

        assert!(stack.resource("Web1").unwrap().is_resolved());
        let policy = stack.resource("Policy1").unwrap();
        assert!(!policy.is_resolved());
        assert_eq!(stack.diagram_id_of(policy.logical_id()), None);
    }

    #[test]
    fn test_order_is_insertion_order() {
        let stack = Stack::new("app")
            .with_resource("Zeta", "AWS::SQS::Queue")
            .with_resource("Alpha", "AWS::SQS::Queue");

        let order: Vec<_> = stack.resources().map(|r| r.logical_id().to_string()).collect();
        assert_eq!(order, vec!["Zeta", "Alpha"]);
    }
}
