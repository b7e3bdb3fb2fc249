//! Identifier resolution: logical id → construct id.

use log::{debug, warn};

use stratagram_core::{
    identifier::Id,
    manifest::{AnnotationEntry, AnnotationKind, MetadataStore},
    path::ManifestPath,
    resource::Resource,
};

use crate::{
    classify::{Classification, classify},
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
};

/// Resolves the construct identity of `resource` from the metadata store.
///
/// Every path carrying an `aws:cdk:logicalId` entry equal to the resource's
/// logical id is classified, in path order. The first successful
/// classification wins. Carrying paths that match no rule are reported as
/// [`ErrorCode::E101`], and more than one carrying path as
/// [`ErrorCode::E102`].
pub(crate) fn resolve_identity(
    store: &MetadataStore,
    resource: &Resource,
    diagnostics: &mut DiagnosticCollector,
) -> Option<Classification> {
    let logical_id = resource.logical_id();

    let mut carrying: Vec<&str> = Vec::new();
    let mut classified: Vec<(ManifestPath<'_>, Classification)> = Vec::new();
    for (path, entries) in store.iter() {
        if !carries_logical_id(&path, entries, logical_id, diagnostics) {
            continue;
        }
        carrying.push(path.as_str());

        match classify(&path, resource.resource_type()) {
            Some(classification) => classified.push((path, classification)),
            None => diagnostics.emit(
                Diagnostic::warning(format!(
                    "no classification rule matches the path of `{logical_id}`"
                ))
                .with_code(ErrorCode::E101)
                .with_path(path.as_str())
                .with_help("other paths carrying the same logical id are still tried"),
            ),
        }
    }

    if carrying.len() > 1 {
        let paths = carrying;
        warn!(logical_id:% = logical_id, paths:? = paths; "Logical id found on several paths");
        diagnostics.emit(
            Diagnostic::warning(format!(
                "logical id `{logical_id}` is carried by {} paths: {}",
                paths.len(),
                paths.join(", ")
            ))
            .with_code(ErrorCode::E102)
            .with_path(paths[0])
            .with_help("the first classifiable path in lexicographic order is used"),
        );
    }

    let (path, classification) = classified.into_iter().next()?;
    debug!(
        logical_id:% = logical_id,
        construct_id:% = classification.identity().construct_id(),
        path = path.as_str();
        "Resolved construct id"
    );
    Some(classification)
}

/// Returns `true` if one of `entries` is a logical id annotation for
/// `logical_id`. Entries with unreadable data are reported and skipped.
fn carries_logical_id(
    path: &ManifestPath<'_>,
    entries: &[AnnotationEntry],
    logical_id: Id,
    diagnostics: &mut DiagnosticCollector,
) -> bool {
    let mut found = false;
    for entry in entries
        .iter()
        .filter(|entry| entry.kind() == AnnotationKind::LogicalId)
    {
        match entry.text() {
            Ok(value) => found |= logical_id == value,
            Err(err) => diagnostics.emit(Diagnostic::invalid_annotation(&err, path.as_str())),
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use stratagram_core::{manifest::AnnotationEntry, resource::ResourceType};

    use super::*;

    fn resource(logical_id: &str, resource_type: &str) -> Resource {
        Resource::new(Id::new(logical_id), ResourceType::new(resource_type))
    }

    #[test]
    fn test_resolves_first_classifiable_path() {
        let store = MetadataStore::new()
            .with_path("/app/baseVPC/Resource", vec![AnnotationEntry::logical_id("R1")])
            .with_path("/app/other/Resource", vec![AnnotationEntry::logical_id("R9")]);
        let mut diagnostics = DiagnosticCollector::new();

        let classification =
            resolve_identity(&store, &resource("R1", "AWS::EC2::VPC"), &mut diagnostics).unwrap();

        assert_eq!(classification.identity().construct_id(), "baseVPC");
        assert!(diagnostics.finish().is_empty());
    }

    #[test]
    fn test_unknown_logical_id() {
        let store = MetadataStore::new()
            .with_path("/app/baseVPC/Resource", vec![AnnotationEntry::logical_id("R1")]);
        let mut diagnostics = DiagnosticCollector::new();

        let result = resolve_identity(&store, &resource("R2", "AWS::EC2::VPC"), &mut diagnostics);

        assert!(result.is_none());
        assert!(diagnostics.finish().is_empty());
    }

    #[test]
    fn test_unresolvable_path_is_reported_and_skipped() {
        let store = MetadataStore::new()
            .with_path("/app/a/b/c/d/e", vec![AnnotationEntry::logical_id("R1")])
            .with_path("/app/web/Resource", vec![AnnotationEntry::logical_id("R1")]);
        let mut diagnostics = DiagnosticCollector::new();

        let classification =
            resolve_identity(&store, &resource("R1", "AWS::EC2::Instance"), &mut diagnostics)
                .unwrap();

        assert_eq!(classification.identity().construct_id(), "web");
        let diagnostics = diagnostics.finish();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::E101));
        assert_eq!(diagnostics[0].path(), Some("/app/a/b/c/d/e"));
        assert_eq!(diagnostics[1].code(), Some(ErrorCode::E102));
    }

    #[test]
    fn test_unclassifiable_duplicate_is_ambiguous() {
        let store = MetadataStore::new()
            .with_path("/app/a/b/c/d/e", vec![AnnotationEntry::logical_id("A1")])
            .with_path("/app/web/Resource", vec![AnnotationEntry::logical_id("A1")]);
        let mut diagnostics = DiagnosticCollector::new();

        resolve_identity(&store, &resource("A1", "AWS::EC2::Instance"), &mut diagnostics);

        let diagnostics = diagnostics.finish();
        let ambiguous: Vec<_> = diagnostics
            .iter()
            .filter(|diag| diag.code() == Some(ErrorCode::E102))
            .collect();
        assert_eq!(ambiguous.len(), 1);
        assert!(ambiguous[0].message().contains("/app/a/b/c/d/e"));
        assert!(ambiguous[0].message().contains("/app/web/Resource"));
    }

    #[test]
    fn test_ambiguous_logical_id_uses_first_path() {
        let store = MetadataStore::new()
            .with_path("/app/zeta/Resource", vec![AnnotationEntry::logical_id("R1")])
            .with_path("/app/alpha/Resource", vec![AnnotationEntry::logical_id("R1")]);
        let mut diagnostics = DiagnosticCollector::new();

        let classification =
            resolve_identity(&store, &resource("R1", "AWS::SQS::Queue"), &mut diagnostics)
                .unwrap();

        assert_eq!(classification.identity().construct_id(), "alpha");
        let diagnostics = diagnostics.finish();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::E102));
    }

    #[test]
    fn test_invalid_logical_id_annotation() {
        let store = MetadataStore::new()
            .with_path(
                "/app/broken/Resource",
                vec![AnnotationEntry::new("aws:cdk:logicalId", json!(42))],
            )
            .with_path("/app/ok/Resource", vec![AnnotationEntry::logical_id("R1")]);
        let mut diagnostics = DiagnosticCollector::new();

        let classification =
            resolve_identity(&store, &resource("R1", "AWS::SNS::Topic"), &mut diagnostics)
                .unwrap();

        assert_eq!(classification.identity().construct_id(), "ok");
        let diagnostics = diagnostics.finish();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(ErrorCode::E100));
        assert_eq!(diagnostics[0].path(), Some("/app/broken/Resource"));
    }
}
