//! The diagram graph assembled from resolved stacks.
//!
//! Every visible resource becomes one [`DiagramNode`] and every resolved
//! connection one edge. Nodes and edges keep insertion order, which is the
//! emission order of the exporters.

use std::collections::HashMap;

use log::{debug, trace};
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use stratagram_core::{color::Color, icon::IconTable, identifier::Id};
use stratagram_resolver::Stack;

/// What a node stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A visible resource, drawn with a label, an icon and a fill color.
    Resource {
        label: String,
        icon: String,
        fill: Color,
    },

    /// The endpoint of a connection to a resource that is not drawn itself.
    Reference,
}

/// A node of the diagram, keyed by its qualified diagram id.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramNode {
    id: Id,
    kind: NodeKind,
}

impl DiagramNode {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_resource(&self) -> bool {
        matches!(self.kind, NodeKind::Resource { .. })
    }
}

/// Directed graph of diagram nodes and connections.
#[derive(Debug, Default)]
pub struct DiagramGraph {
    graph: DiGraph<DiagramNode, ()>,
    node_id_map: HashMap<Id, NodeIndex>,
}

impl DiagramGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph of `stacks`: first the nodes of every stack in
    /// resource order, then their connections.
    pub fn from_stacks(stacks: &[Stack], icons: &IconTable, fill: &Color) -> Self {
        let mut graph = Self::new();

        for stack in stacks {
            for resource in stack.resources().filter(|r| r.is_visible()) {
                let Some(construct_id) = resource.construct_id() else {
                    continue;
                };
                graph.add_resource(
                    resource.diagram_id(),
                    construct_id.to_string(),
                    icons.lookup(resource.resource_type()),
                    fill.clone(),
                );
            }
        }

        for stack in stacks {
            for resource in stack.resources().filter(|r| r.is_visible()) {
                let source = resource.diagram_id();
                for &target in stack.connections(resource.logical_id()) {
                    graph.connect(source, target);
                }
            }
        }

        debug!(
            nodes = graph.resource_count(),
            edges = graph.edge_count();
            "Diagram graph built"
        );
        graph
    }

    /// Adds a resource node.
    ///
    /// Connections to `id` made afterwards point at this node. A reference
    /// node created earlier for the same id is turned into this resource.
    pub fn add_resource(&mut self, id: Id, label: String, icon: String, fill: Color) -> NodeIndex {
        let kind = NodeKind::Resource { label, icon, fill };

        if let Some(&index) = self.node_id_map.get(&id) {
            let node = &mut self.graph[index];
            if !node.is_resource() {
                node.kind = kind;
                return index;
            }
        }

        let index = self.graph.add_node(DiagramNode { id, kind });
        self.node_id_map.insert(id, index);
        index
    }

    /// Adds an edge from `source` to `target`. Returns `false` without
    /// adding anything when either id is empty.
    pub fn connect(&mut self, source: Id, target: Id) -> bool {
        if source.is_empty() || target.is_empty() {
            trace!(source:% = source, target:% = target; "Skipping connection with an empty side");
            return false;
        }

        let source = self.node_or_reference(source);
        let target = self.node_or_reference(target);
        self.graph.add_edge(source, target, ());
        true
    }

    fn node_or_reference(&mut self, id: Id) -> NodeIndex {
        if let Some(&index) = self.node_id_map.get(&id) {
            return index;
        }
        let index = self.graph.add_node(DiagramNode {
            id,
            kind: NodeKind::Reference,
        });
        self.node_id_map.insert(id, index);
        index
    }

    /// Iterates over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &DiagramNode> {
        self.graph.node_weights()
    }

    /// Iterates over the edges in insertion order as `(source, target)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&DiagramNode, &DiagramNode)> {
        self.graph
            .edge_references()
            .map(|edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }

    pub fn node(&self, id: Id) -> Option<&DiagramNode> {
        self.node_id_map.get(&id).map(|&index| &self.graph[index])
    }

    /// Number of resource nodes.
    pub fn resource_count(&self) -> usize {
        self.nodes().filter(|node| node.is_resource()).count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(graph: &mut DiagramGraph, id: &str) -> NodeIndex {
        graph.add_resource(
            Id::new(id),
            id.to_string(),
            "icon.svg".to_string(),
            Color::default(),
        )
    }

    #[test]
    fn test_nodes_keep_insertion_order() {
        let mut graph = DiagramGraph::new();
        resource(&mut graph, "zeta");
        resource(&mut graph, "alpha");

        let ids: Vec<_> = graph.nodes().map(|node| node.id().to_string()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_connect_to_undrawn_target_adds_reference() {
        let mut graph = DiagramGraph::new();
        resource(&mut graph, "Web1");

        assert!(graph.connect(Id::new("Web1"), Id::new("Hidden1")));

        assert_eq!(graph.resource_count(), 1);
        assert_eq!(graph.edge_count(), 1);
        let target = graph.node(Id::new("Hidden1")).unwrap();
        assert_eq!(target.kind(), &NodeKind::Reference);
    }

    #[test]
    fn test_reference_upgraded_to_resource() {
        let mut graph = DiagramGraph::new();
        graph.connect(Id::new("Web1"), Id::new("Db1"));
        resource(&mut graph, "Db1");

        assert!(graph.node(Id::new("Db1")).unwrap().is_resource());
        assert_eq!(graph.nodes().count(), 2);
    }

    #[test]
    fn test_empty_side_is_skipped() {
        let mut graph = DiagramGraph::new();
        resource(&mut graph, "Web1");

        assert!(!graph.connect(Id::new("Web1"), Id::new("")));
        assert!(!graph.connect(Id::new(""), Id::new("Web1")));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_edges_in_insertion_order() {
        let mut graph = DiagramGraph::new();
        resource(&mut graph, "a");
        resource(&mut graph, "b");
        resource(&mut graph, "c");
        graph.connect(Id::new("c"), Id::new("a"));
        graph.connect(Id::new("a"), Id::new("b"));

        let edges: Vec<_> = graph
            .edges()
            .map(|(source, target)| format!("{}->{}", source.id(), target.id()))
            .collect();
        assert_eq!(edges, vec!["c->a", "a->b"]);
    }
}
