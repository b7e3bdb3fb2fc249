//! D2 source output.
//!
//! Each resource node becomes a block statement
//!
//! ```text
//! <qualifiedId>: <label>{
//!  icon: <icon>
//!  style.fill:"<color>"
//! }
//! ```
//!
//! and each edge a `<source> -> <target>` line. All node statements come
//! first, then all edges. Reference nodes only show up as edge endpoints.

use std::io::Write;

use log::{debug, trace};

use crate::{
    export::{Error, Exporter},
    structure::{DiagramGraph, NodeKind},
};

/// Writes D2 statements to any [`Write`] sink.
#[derive(Debug)]
pub struct D2Exporter<W: Write> {
    writer: W,
}

impl<W: Write> D2Exporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for D2Exporter<W> {
    fn export_graph(&mut self, graph: &DiagramGraph) -> Result<(), Error> {
        for node in graph.nodes() {
            let NodeKind::Resource { label, icon, fill } = node.kind() else {
                continue;
            };
            let id = node.id().to_string();
            let fill = fill.to_string();
            for text in [&id, label, icon, &fill] {
                ensure_single_line(text)?;
            }

            trace!(id; "Writing node");
            write!(
                self.writer,
                "{id}: {label}{{\n icon: {icon}\n style.fill:\"{fill}\"\n}}\n"
            )?;
        }

        for (source, target) in graph.edges() {
            writeln!(self.writer, "{} -> {}", source.id(), target.id())?;
        }

        self.writer.flush()?;
        debug!(
            nodes = graph.resource_count(),
            edges = graph.edge_count();
            "D2 exported"
        );
        Ok(())
    }
}

fn ensure_single_line(text: &str) -> Result<(), Error> {
    if text.contains(['\n', '\r']) {
        return Err(Error::Render(format!(
            "`{}` spans several lines and cannot be written as a D2 statement",
            text.escape_debug()
        )));
    }
    Ok(())
}
