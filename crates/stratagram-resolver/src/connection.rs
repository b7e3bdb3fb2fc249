//! Connection resolution from `Connection` annotations.

use std::collections::HashMap;

use log::debug;

use stratagram_core::{
    identifier::Id,
    manifest::{AnnotationKind, MetadataStore},
};

use crate::error::{Diagnostic, DiagnosticCollector};

/// Resolves the outgoing connections of the construct `construct_id`.
///
/// Each `Connection` entry on a path of `stack` ending in `construct_id`
/// names a target construct. The target is looked up in `logical_ids`
/// (construct id → logical id) and then in `diagram_ids` (logical id →
/// qualified diagram id). Targets missing from either map are skipped: they
/// are out of scope, or not part of the diagram at all.
pub(crate) fn resolve_connections(
    store: &MetadataStore,
    stack: &str,
    construct_id: Id,
    logical_ids: &HashMap<Id, Id>,
    diagram_ids: &HashMap<Id, Id>,
    diagnostics: &mut DiagnosticCollector,
) -> Vec<Id> {
    let construct_id = construct_id.to_string();
    let mut targets = Vec::new();

    for (path, entries) in store.scoped(stack, &construct_id) {
        for entry in entries
            .iter()
            .filter(|entry| entry.kind() == AnnotationKind::Connection)
        {
            let target = match entry.text() {
                Ok(target) => Id::new(target),
                Err(err) => {
                    diagnostics.emit(Diagnostic::invalid_annotation(&err, path.as_str()));
                    continue;
                }
            };

            let Some(target_logical_id) = logical_ids.get(&target) else {
                debug!(source = construct_id, target:% = target; "Connection target not resolved, skipping");
                continue;
            };

            match diagram_ids.get(target_logical_id) {
                Some(diagram_id) if !diagram_id.is_empty() => targets.push(*diagram_id),
                _ => {
                    debug!(source = construct_id, target:% = target; "Connection target has no diagram id, skipping");
                }
            }
        }
    }

    targets
}
