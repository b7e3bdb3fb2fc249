//! Integration tests for the DiagramBuilder API

use stratagram::{
    DiagramBuilder, ErrorCode, Stack, StratagramError,
    config::{AppConfig, IconConfig, StyleConfig},
};

const MANIFEST: &str = r#"{
    "version": "36.0.0",
    "artifacts": {
        "Tree": {
            "type": "cdk:tree",
            "properties": { "file": "tree.json" }
        },
        "appStack": {
            "type": "aws:cloudformation:stack",
            "properties": { "templateFile": "appStack.template.json" },
            "metadata": {
                "/appStack/baseVPC": [
                    { "type": "Show", "data": "true" },
                    { "type": "Container", "data": "VPCGroup" }
                ],
                "/appStack/baseVPC/Resource": [
                    { "type": "aws:cdk:logicalId", "data": "R1" }
                ],
                "/appStack/web": [
                    { "type": "Show", "data": "true" },
                    { "type": "Connection", "data": "database" },
                    { "type": "Connection", "data": "missingThing" }
                ],
                "/appStack/web/Resource": [
                    { "type": "aws:cdk:logicalId", "data": "Web1" }
                ],
                "/appStack/database": [
                    { "type": "Show", "data": "true" },
                    { "type": "Container", "data": "VPCGroup" }
                ],
                "/appStack/database/Resource": [
                    { "type": "aws:cdk:logicalId", "data": "Db1" }
                ],
                "/appStack/role/Resource": [
                    { "type": "aws:cdk:logicalId", "data": "Role1" }
                ]
            }
        }
    }
}"#;

fn app_stack() -> Stack {
    Stack::new("appStack")
        .with_resource("Db1", "AWS::RDS::DBInstance")
        .with_resource("R1", "AWS::EC2::VPC")
        .with_resource("Role1", "AWS::IAM::Role")
        .with_resource("Web1", "AWS::EC2::Instance")
}

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_parse_manifest() {
    let builder = DiagramBuilder::default();
    let manifest = builder.parse_manifest(MANIFEST).expect("Failed to parse manifest");

    assert_eq!(manifest.version(), Some("36.0.0"));
    let stacks: Vec<_> = manifest.stacks().map(|(name, _)| name).collect();
    assert_eq!(stacks, vec!["appStack"]);
}

#[test]
fn test_parse_invalid_manifest_returns_error() {
    let builder = DiagramBuilder::default();
    let result = builder.parse_manifest("{ not json");
    assert!(matches!(result, Err(StratagramError::Manifest(_))));
}

#[test]
fn test_render_d2() {
    let builder = DiagramBuilder::default();
    let manifest = builder.parse_manifest(MANIFEST).unwrap();
    let diagram = builder.resolve(&manifest, vec![app_stack()]);
    assert!(diagram.is_clean());

    let d2 = builder.render_d2(&diagram).expect("Failed to render");

    let nodes: Vec<_> = d2
        .lines()
        .filter(|line| line.ends_with('{'))
        .collect();
    assert_eq!(
        nodes,
        vec!["VPCGroup.Db1: database{", "VPCGroup.R1: baseVPC{", "Web1: web{"]
    );
    assert!(d2.contains(" style.fill:\"lightgreen\"\n"));
    assert!(d2.ends_with("}\nWeb1 -> VPCGroup.Db1\n"));
    assert!(!d2.contains("Role1"));
    assert!(!d2.contains("missingThing"));
}

#[test]
fn test_render_with_config() {
    let config = AppConfig::new(
        StyleConfig::default().with_fill_color("#ffcc00"),
        IconConfig::default().with_override("AWS::EC2::Instance", "server.svg"),
    );
    let builder = DiagramBuilder::new(config);
    let manifest = builder.parse_manifest(MANIFEST).unwrap();
    let diagram = builder.resolve(&manifest, vec![app_stack()]);

    let d2 = builder.render_d2(&diagram).unwrap();

    assert!(d2.contains("Web1: web{\n icon: server.svg\n style.fill:\"#ffcc00\"\n}\n"));
}

#[test]
fn test_invalid_fill_color_is_config_error() {
    let config = AppConfig::new(
        StyleConfig::default().with_fill_color("definitely-not-a-color"),
        IconConfig::default(),
    );
    let builder = DiagramBuilder::new(config);
    let manifest = builder.parse_manifest(MANIFEST).unwrap();
    let diagram = builder.resolve(&manifest, vec![app_stack()]);

    let result = builder.render_d2(&diagram);
    assert!(matches!(result, Err(StratagramError::Config(_))));
}

#[test]
fn test_missing_stack_reports_diagnostic() {
    let builder = DiagramBuilder::default();
    let manifest = builder.parse_manifest(MANIFEST).unwrap();
    let ghost = Stack::new("ghostStack").with_resource("R1", "AWS::EC2::VPC");

    let diagram = builder.resolve(&manifest, vec![app_stack(), ghost]);

    let diagnostics: Vec<_> = diagram.diagnostics().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].0, "ghostStack");
    assert_eq!(diagnostics[0].1.code(), Some(ErrorCode::E103));

    // The resolvable stack still renders.
    let d2 = builder.render_d2(&diagram).unwrap();
    assert!(d2.contains("VPCGroup.R1: baseVPC{"));
}

#[test]
fn test_write_d2_matches_render_d2() {
    let builder = DiagramBuilder::default();
    let manifest = builder.parse_manifest(MANIFEST).unwrap();
    let diagram = builder.resolve(&manifest, vec![app_stack()]);

    let mut buffer = Vec::new();
    builder.write_d2(&diagram, &mut buffer).unwrap();

    assert_eq!(String::from_utf8(buffer).unwrap(), builder.render_d2(&diagram).unwrap());
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();
    let manifest = builder.parse_manifest(MANIFEST).unwrap();

    let first = builder.render_d2(&builder.resolve(&manifest, vec![app_stack()])).unwrap();
    let second = builder.render_d2(&builder.resolve(&manifest, vec![app_stack()])).unwrap();

    assert_eq!(first, second);
}
