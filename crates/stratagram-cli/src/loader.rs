//! Cloud assembly loading.
//!
//! Reads `manifest.json` from a synthesized cloud assembly and, for each
//! CloudFormation stack artifact, the resources of its template.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use stratagram::{DiagramBuilder, Stack, StratagramError, manifest::Manifest};

const MANIFEST_FILE: &str = "manifest.json";

/// Errors raised while reading the cloud assembly.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No manifest.json in cloud assembly directory {0}")]
    MissingManifest(PathBuf),

    #[error("Template {path} of stack `{stack}` not found")]
    MissingTemplate { stack: String, path: PathBuf },

    #[error("Invalid template {path}: {source}")]
    InvalidTemplate {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Stack `{0}` is not a CloudFormation stack artifact of the assembly")]
    UnknownStack(String),
}

impl From<LoadError> for StratagramError {
    fn from(err: LoadError) -> Self {
        StratagramError::Assembly(Box::new(err))
    }
}

/// The part of a CloudFormation template this tool reads.
#[derive(Debug, Deserialize)]
struct Template {
    #[serde(rename = "Resources", default)]
    resources: BTreeMap<String, TemplateResource>,
}

#[derive(Debug, Deserialize)]
struct TemplateResource {
    #[serde(rename = "Type")]
    resource_type: String,
}

/// A loaded cloud assembly: its manifest and one [`Stack`] per selected
/// stack artifact, in artifact name order.
#[derive(Debug)]
pub struct CloudAssembly {
    pub manifest: Manifest,
    pub stacks: Vec<Stack>,
}

/// Load the cloud assembly at `input`, a `cdk.out` directory or the path of
/// its `manifest.json`.
///
/// With a non-empty `selected`, only the named stacks are loaded.
///
/// # Errors
///
/// Returns an error if the manifest or a selected stack's template cannot be
/// read or parsed, or if a selected stack does not exist.
pub fn load(
    input: &Path,
    builder: &DiagramBuilder,
    selected: &[String],
) -> Result<CloudAssembly, StratagramError> {
    let (assembly_dir, manifest_path) = locate(input)?;
    info!(manifest = manifest_path.display().to_string(); "Loading cloud assembly");

    let source = fs::read_to_string(&manifest_path)?;
    let manifest = builder.parse_manifest(&source)?;

    if let Some(unknown) = selected
        .iter()
        .find(|name| manifest.stacks().all(|(stack, _)| stack != name.as_str()))
    {
        return Err(LoadError::UnknownStack(unknown.clone()).into());
    }

    let mut stacks = Vec::new();
    for (name, artifact) in manifest.stacks() {
        if !selected.is_empty() && !selected.iter().any(|s| s == name) {
            debug!(stack = name; "Stack not selected, skipping");
            continue;
        }

        let template_file = artifact
            .template_file()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{name}.template.json"));
        let stack = load_stack(name, &assembly_dir.join(template_file))?;

        info!(stack = name, resources = stack.len(); "Loaded stack");
        stacks.push(stack);
    }

    Ok(CloudAssembly { manifest, stacks })
}

fn locate(input: &Path) -> Result<(PathBuf, PathBuf), LoadError> {
    if input.is_dir() {
        let manifest_path = input.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(LoadError::MissingManifest(input.to_path_buf()));
        }
        return Ok((input.to_path_buf(), manifest_path));
    }

    let assembly_dir = input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok((assembly_dir, input.to_path_buf()))
}

/// Builds a stack from a template. Resources are added in logical id order.
fn load_stack(name: &str, template_path: &Path) -> Result<Stack, LoadError> {
    let content = fs::read_to_string(template_path).map_err(|_| LoadError::MissingTemplate {
        stack: name.to_string(),
        path: template_path.to_path_buf(),
    })?;

    let template: Template =
        serde_json::from_str(&content).map_err(|source| LoadError::InvalidTemplate {
            path: template_path.to_path_buf(),
            source,
        })?;

    Ok(template
        .resources
        .into_iter()
        .fold(Stack::new(name), |stack, (logical_id, resource)| {
            stack.with_resource(&logical_id, resource.resource_type.as_str())
        }))
}
