//! Path classification.
//!
//! A metadata path that carries a resource's logical id has one of a few
//! well-known shapes. Each shape is a [`Rule`] pairing a predicate with an
//! extractor, and [`RULES`] lists them in priority order: the first rule
//! whose predicate holds decides the construct id.
//!
//! | rule | shape | construct id |
//! |---|---|---|
//! | `stack_level` | `/stack/id` | `id` |
//! | `resource_suffix` | `/stack/.../id/Resource` | `id` (+ nested stack tail) |
//! | `auto_scaling_group` | `/stack/id/ASG` on an ASG | `id` |
//! | `subnet` | `/stack/vpc/name/Subnet` on a subnet | `vpc/name` (+ refined type) |

use log::trace;

use stratagram_core::{identifier::Id, path::ManifestPath, resource::ResourceType};

/// Construct identity extracted from a metadata path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedIdentity {
    construct_id: Id,
    extended_construct_id: Option<Id>,
}

impl ResolvedIdentity {
    pub fn new(construct_id: Id, extended_construct_id: Option<Id>) -> Self {
        Self {
            construct_id,
            extended_construct_id,
        }
    }

    pub fn construct_id(&self) -> Id {
        self.construct_id
    }

    /// The nested-stack qualified form of the construct id, when the path
    /// runs through a nested stack.
    pub fn extended_construct_id(&self) -> Option<Id> {
        self.extended_construct_id
    }
}

/// The outcome of a successful classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    identity: ResolvedIdentity,
    refined_type: Option<ResourceType>,
}

impl Classification {
    fn new(construct_id: &str) -> Self {
        Self {
            identity: ResolvedIdentity::new(Id::new(construct_id), None),
            refined_type: None,
        }
    }

    fn with_extended(mut self, extended: Option<String>) -> Self {
        self.identity.extended_construct_id = extended.map(|tail| Id::new(&tail));
        self
    }

    fn with_refined_type(mut self, refined_type: ResourceType) -> Self {
        self.refined_type = Some(refined_type);
        self
    }

    pub fn identity(&self) -> ResolvedIdentity {
        self.identity
    }

    /// The type tag implied by the path, if it differs from the declared one.
    pub fn refined_type(&self) -> Option<&ResourceType> {
        self.refined_type.as_ref()
    }

    pub fn into_parts(self) -> (ResolvedIdentity, Option<ResourceType>) {
        (self.identity, self.refined_type)
    }
}

/// One path shape.
pub struct Rule {
    name: &'static str,
    matches: fn(&ManifestPath<'_>, &ResourceType) -> bool,
    extract: fn(&ManifestPath<'_>, &ResourceType) -> Classification,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Applies this rule alone.
    pub fn apply(&self, path: &ManifestPath<'_>, resource_type: &ResourceType) -> Option<Classification> {
        if !(self.matches)(path, resource_type) {
            return None;
        }
        let classification = (self.extract)(path, resource_type);
        if classification.identity.construct_id.is_empty() {
            return None;
        }
        Some(classification)
    }
}

/// The classification rules, highest priority first.
pub static RULES: [Rule; 4] = [
    Rule {
        name: "stack_level",
        matches: is_stack_level,
        extract: last_segment,
    },
    Rule {
        name: "resource_suffix",
        matches: has_resource_suffix,
        extract: resource_parent,
    },
    Rule {
        name: "auto_scaling_group",
        matches: is_auto_scaling_group,
        extract: third_segment,
    },
    Rule {
        name: "subnet",
        matches: is_subnet,
        extract: subnet_construct,
    },
];

fn is_stack_level(path: &ManifestPath<'_>, _: &ResourceType) -> bool {
    path.len() == 3
}

fn has_resource_suffix(path: &ManifestPath<'_>, _: &ResourceType) -> bool {
    path.len() >= 3 && path.last().ends_with("Resource")
}

fn is_auto_scaling_group(path: &ManifestPath<'_>, resource_type: &ResourceType) -> bool {
    path.len() == 4 && resource_type.is_auto_scaling_group() && path.last() == "ASG"
}

fn is_subnet(path: &ManifestPath<'_>, resource_type: &ResourceType) -> bool {
    path.len() == 5 && path.last() == "Subnet" && resource_type.is_subnet()
}

fn last_segment(path: &ManifestPath<'_>, _: &ResourceType) -> Classification {
    Classification::new(path.last())
}

fn third_segment(path: &ManifestPath<'_>, _: &ResourceType) -> Classification {
    Classification::new(path.segment(2).unwrap_or_default())
}

fn resource_parent(path: &ManifestPath<'_>, _: &ResourceType) -> Classification {
    let construct_id = path.segment(path.len() - 2).unwrap_or_default();
    Classification::new(construct_id).with_extended(path.nested_stack_tail())
}

fn subnet_construct(path: &ManifestPath<'_>, resource_type: &ResourceType) -> Classification {
    let construct_id = format!(
        "{}/{}",
        path.segment(2).unwrap_or_default(),
        path.segment(3).unwrap_or_default()
    );
    let refined = resource_type.refine_subnet(&construct_id);
    let classification = Classification::new(&construct_id);
    if &refined == resource_type {
        classification
    } else {
        classification.with_refined_type(refined)
    }
}

/// Classifies `path` for a resource of `resource_type`.
///
/// Returns `None` when no rule matches.
///
/// # Examples
///
/// ```
/// use stratagram_core::{path::ManifestPath, resource::ResourceType};
/// use stratagram_resolver::classify::classify;
///
/// let path = ManifestPath::new("/appStack/baseVPC/Resource");
/// let classification = classify(&path, &ResourceType::new("AWS::EC2::VPC")).unwrap();
///
/// assert_eq!(classification.identity().construct_id(), "baseVPC");
/// assert_eq!(classification.identity().extended_construct_id(), None);
/// ```
pub fn classify(path: &ManifestPath<'_>, resource_type: &ResourceType) -> Option<Classification> {
    RULES.iter().find_map(|rule| {
        let classification = rule.apply(path, resource_type)?;
        trace!(rule = rule.name(), path = path.as_str(); "Path classified");
        Some(classification)
    })
}
