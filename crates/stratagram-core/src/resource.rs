//! Stack resources and their CloudFormation type tags.

use std::fmt;

use serde::Deserialize;

use crate::identifier::Id;

/// A CloudFormation resource type tag such as `AWS::EC2::VPC`.
///
/// Subnets are refined during classification into the synthetic
/// [`ResourceType::PRIVATE_SUBNET`] and [`ResourceType::PUBLIC_SUBNET`] tags
/// so they can get their own icons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ResourceType(String);

impl ResourceType {
    pub const AUTO_SCALING_GROUP: &'static str = "AWS::AutoScaling::AutoScalingGroup";
    pub const SUBNET: &'static str = "AWS::EC2::Subnet";
    pub const PRIVATE_SUBNET: &'static str = "AWS::EC2::Subnet::Private";
    pub const PUBLIC_SUBNET: &'static str = "AWS::EC2::Subnet::Public";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_auto_scaling_group(&self) -> bool {
        self.0 == Self::AUTO_SCALING_GROUP
    }

    /// Returns `true` for the plain subnet tag and its refined variants.
    pub fn is_subnet(&self) -> bool {
        matches!(
            self.0.as_str(),
            Self::SUBNET | Self::PRIVATE_SUBNET | Self::PUBLIC_SUBNET
        )
    }

    /// Derives the subnet variant implied by a subnet's construct id.
    ///
    /// A lower-cased construct id containing `priv` yields the private tag,
    /// one containing `pub` the public tag. Both checks apply in that order,
    /// so an id containing both ends up public. Ids matching neither keep
    /// the current tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratagram_core::resource::ResourceType;
    ///
    /// let subnet = ResourceType::new(ResourceType::SUBNET);
    /// let refined = subnet.refine_subnet("netConstruct/privateSubnet1");
    /// assert_eq!(refined.as_str(), ResourceType::PRIVATE_SUBNET);
    /// ```
    pub fn refine_subnet(&self, construct_id: &str) -> Self {
        let lower = construct_id.to_lowercase();
        let mut refined = self.clone();
        if lower.contains("priv") {
            refined = Self::new(Self::PRIVATE_SUBNET);
        }
        if lower.contains("pub") {
            refined = Self::new(Self::PUBLIC_SUBNET);
        }
        refined
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// A resource of one stack, together with what resolution found out about it.
///
/// A fresh resource only knows its logical id and declared type. Resolution
/// fills in the construct id, visibility and the qualified diagram id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    logical_id: Id,
    declared_type: ResourceType,
    resource_type: ResourceType,
    construct_id: Option<Id>,
    visible: bool,
    diagram_id: Option<Id>,
}

impl Resource {
    pub fn new(logical_id: Id, resource_type: ResourceType) -> Self {
        Self {
            logical_id,
            declared_type: resource_type.clone(),
            resource_type,
            construct_id: None,
            visible: false,
            diagram_id: None,
        }
    }

    pub fn logical_id(&self) -> Id {
        self.logical_id
    }

    /// The type tag, refined for subnets once resolved.
    pub fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    /// The type tag as declared in the template.
    pub fn declared_type(&self) -> &ResourceType {
        &self.declared_type
    }

    pub fn construct_id(&self) -> Option<Id> {
        self.construct_id
    }

    pub fn is_resolved(&self) -> bool {
        self.construct_id.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The id of this resource's diagram node.
    ///
    /// Falls back to the logical id when no container qualified it.
    pub fn diagram_id(&self) -> Id {
        self.diagram_id.unwrap_or(self.logical_id)
    }

    pub fn set_resource_type(&mut self, resource_type: ResourceType) {
        self.resource_type = resource_type;
    }

    pub fn set_construct_id(&mut self, construct_id: Id) {
        self.construct_id = Some(construct_id);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_diagram_id(&mut self, diagram_id: Id) {
        self.diagram_id = Some(diagram_id);
    }

    /// Forgets everything resolution assigned, restoring the declared type.
    pub fn clear_resolution(&mut self) {
        self.resource_type = self.declared_type.clone();
        self.construct_id = None;
        self.visible = false;
        self.diagram_id = None;
    }
}
