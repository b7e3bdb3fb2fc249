//! Container composition: qualified diagram ids from `Container` annotations.

use log::trace;

use stratagram_core::{identifier::Id, manifest::{AnnotationKind, MetadataStore}};

use crate::error::{Diagnostic, DiagnosticCollector};

/// Computes the qualified diagram id of a resource.
///
/// The first `Container` entry on a path of `stack` ending in
/// `construct_id` names the enclosing construct, and the result is
/// `container.logical_id`. Without one the logical id is returned as is.
pub(crate) fn qualified_diagram_id(
    store: &MetadataStore,
    stack: &str,
    construct_id: Id,
    logical_id: Id,
    diagnostics: &mut DiagnosticCollector,
) -> Id {
    let construct_id = construct_id.to_string();

    for (path, entries) in store.scoped(stack, &construct_id) {
        for entry in entries
            .iter()
            .filter(|entry| entry.kind() == AnnotationKind::Container)
        {
            match entry.text() {
                Ok(container) => {
                    let diagram_id = logical_id.qualify(Id::new(container));
                    trace!(
                        diagram_id:% = diagram_id,
                        path = path.as_str();
                        "Composed qualified diagram id"
                    );
                    return diagram_id;
                }
                Err(err) => diagnostics.emit(Diagnostic::invalid_annotation(&err, path.as_str())),
            }
        }
    }

    logical_id
}
