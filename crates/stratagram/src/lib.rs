//! Stratagram - architecture diagrams from CDK cloud assemblies.
//!
//! Resolves the resources of CloudFormation stacks against the construct
//! metadata a CDK synthesis writes into `manifest.json`, and renders the
//! visible resources with their containers and connections as D2 source.

pub mod config;

mod error;
mod export;
mod structure;

pub use stratagram_core::{color, icon, identifier, manifest, resource};
pub use stratagram_resolver::{Diagnostic, ErrorCode, Severity, Stack};

pub use error::StratagramError;
pub use structure::{DiagramGraph, DiagramNode, NodeKind};

use std::io;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, d2::D2Exporter};
use manifest::Manifest;

/// Stacks resolved against one manifest.
#[derive(Debug, Clone)]
pub struct ResolvedDiagram {
    stacks: Vec<Stack>,
}

impl ResolvedDiagram {
    /// The resolved stacks, in the order they were given.
    pub fn stacks(&self) -> &[Stack] {
        &self.stacks
    }

    /// Every diagnostic with the name of the stack it was found in.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&str, &Diagnostic)> {
        self.stacks.iter().flat_map(|stack| {
            stack
                .diagnostics()
                .iter()
                .map(move |diag| (stack.name(), diag))
        })
    }

    /// Returns `true` if no stack reported a diagnostic.
    pub fn is_clean(&self) -> bool {
        self.diagnostics().next().is_none()
    }
}

/// Builder for resolving and rendering Stratagram diagrams.
///
/// # Examples
///
/// ```
/// use stratagram::{DiagramBuilder, Stack};
///
/// let manifest_json = r#"{
///     "version": "36.0.0",
///     "artifacts": {
///         "app": {
///             "type": "aws:cloudformation:stack",
///             "metadata": {
///                 "/app/queue": [{ "type": "Show", "data": "true" }],
///                 "/app/queue/Resource": [{ "type": "aws:cdk:logicalId", "data": "Queue1" }]
///             }
///         }
///     }
/// }"#;
///
/// let builder = DiagramBuilder::default();
/// let manifest = builder.parse_manifest(manifest_json).unwrap();
/// let stack = Stack::new("app").with_resource("Queue1", "AWS::SQS::Queue");
///
/// let diagram = builder.resolve(&manifest, vec![stack]);
/// let d2 = builder.render_d2(&diagram).unwrap();
/// assert!(d2.starts_with("Queue1: queue{\n"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse the JSON text of a cloud assembly `manifest.json`.
    ///
    /// # Errors
    ///
    /// Returns [`StratagramError::Manifest`] if the text is not a valid
    /// manifest.
    pub fn parse_manifest(&self, source: &str) -> Result<Manifest, StratagramError> {
        info!("Parsing cloud assembly manifest");

        let manifest: Manifest = serde_json::from_str(source)?;

        debug!(
            version:? = manifest.version(),
            artifacts = manifest.artifacts().count();
            "Manifest parsed successfully"
        );
        Ok(manifest)
    }

    /// Resolve every stack against `manifest`.
    ///
    /// Stacks are resolved independently; per-resource problems end up as
    /// diagnostics on the stack instead of failing the call.
    pub fn resolve(&self, manifest: &Manifest, mut stacks: Vec<Stack>) -> ResolvedDiagram {
        info!(stacks = stacks.len(); "Resolving stacks");

        for stack in &mut stacks {
            stack.resolve(manifest);
        }

        let diagram = ResolvedDiagram { stacks };
        debug!(diagnostics = diagram.diagnostics().count(); "Stacks resolved");
        diagram
    }

    /// Build the diagram graph of a resolved diagram.
    ///
    /// # Errors
    ///
    /// Returns [`StratagramError::Config`] if the configured fill color is
    /// invalid.
    pub fn build_graph(&self, diagram: &ResolvedDiagram) -> Result<DiagramGraph, StratagramError> {
        let fill = self
            .config
            .style()
            .fill_color()
            .map_err(StratagramError::Config)?;
        let icons = self.config.icons().icon_table();

        let graph = DiagramGraph::from_stacks(diagram.stacks(), &icons, &fill);
        trace!(graph:?; "Built diagram graph");
        Ok(graph)
    }

    /// Render a resolved diagram to a D2 source string.
    ///
    /// # Errors
    ///
    /// Returns [`StratagramError`] for configuration or export errors.
    pub fn render_d2(&self, diagram: &ResolvedDiagram) -> Result<String, StratagramError> {
        let mut buffer = Vec::new();
        self.write_d2(diagram, &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| StratagramError::Export(Box::new(err)))
    }

    /// Render a resolved diagram as D2 source into `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`StratagramError`] for configuration errors or when writing
    /// fails.
    pub fn write_d2<W: io::Write>(
        &self,
        diagram: &ResolvedDiagram,
        writer: W,
    ) -> Result<(), StratagramError> {
        let graph = self.build_graph(diagram)?;

        info!(
            nodes = graph.resource_count(),
            edges = graph.edge_count();
            "Rendering D2"
        );
        let mut exporter = D2Exporter::new(writer);
        exporter.export_graph(&graph)?;

        info!("D2 rendered successfully");
        Ok(())
    }
}
