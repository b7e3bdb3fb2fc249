//! Visibility resolution from `Show` annotations.

use stratagram_core::{
    identifier::Id,
    manifest::{AnnotationEntry, AnnotationKind, MetadataStore},
    path::{ManifestPath, NESTED_STACK_SUFFIX},
};

use crate::error::{Diagnostic, DiagnosticCollector};

/// Returns `true` if some path with a truthy `Show` entry ends in the
/// construct `construct_id`.
///
/// The final segment and the construct id may also differ by a
/// `.NestedStack` suffix on either side, so a `Show` placed on a nested
/// stack construct applies to the stack resource and vice versa.
pub(crate) fn is_visible(
    store: &MetadataStore,
    construct_id: Id,
    diagnostics: &mut DiagnosticCollector,
) -> bool {
    let construct_id = construct_id.to_string();

    // Every `Show` entry is read so malformed ones are reported wherever
    // they sort.
    let mut visible = false;
    for (path, entries) in store.iter() {
        if is_shown(&path, entries, diagnostics) {
            visible |= names_construct(path.last(), &construct_id);
        }
    }
    visible
}

fn is_shown(
    path: &ManifestPath<'_>,
    entries: &[AnnotationEntry],
    diagnostics: &mut DiagnosticCollector,
) -> bool {
    let mut shown = false;
    for entry in entries.iter().filter(|entry| entry.kind() == AnnotationKind::Show) {
        match entry.text() {
            Ok(value) => shown |= value.eq_ignore_ascii_case("true"),
            Err(err) => diagnostics.emit(Diagnostic::invalid_annotation(&err, path.as_str())),
        }
    }
    shown
}

fn names_construct(segment: &str, construct_id: &str) -> bool {
    segment == construct_id
        || segment.strip_suffix(NESTED_STACK_SUFFIX) == Some(construct_id)
        || construct_id.strip_suffix(NESTED_STACK_SUFFIX) == Some(segment)
}
