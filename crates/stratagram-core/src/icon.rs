//! Icon lookup for resource type tags.
//!
//! Icons are URLs from the terrastruct icon set that D2 renders natively.
//! The lookup is total: unknown type tags get [`DEFAULT_ICON`].

use std::collections::HashMap;

use log::trace;

use crate::resource::ResourceType;

const ICON_BASE: &str = "https://icons.terrastruct.com/";

/// Icon used for type tags without a dedicated entry.
pub const DEFAULT_ICON: &str =
    "https://icons.terrastruct.com/aws%2F_General%2FAWS-Cloud-alt_light-bg.svg";

const BUILTIN_ICONS: &[(&str, &str)] = &[
    (
        "AWS::EC2::VPC",
        "aws%2FNetworking%20&%20Content%20Delivery%2FAmazon-VPC.svg",
    ),
    (
        ResourceType::SUBNET,
        "aws%2F_Group%20Icons%2FVPC-subnet-private_light-bg.svg",
    ),
    (
        ResourceType::PRIVATE_SUBNET,
        "aws%2F_Group%20Icons%2FVPC-subnet-private_light-bg.svg",
    ),
    (
        ResourceType::PUBLIC_SUBNET,
        "aws%2F_Group%20Icons%2FVPC-subnet-public_light-bg.svg",
    ),
    (
        "AWS::EC2::SecurityGroup",
        "aws%2FSecurity%2C%20Identity%2C%20&%20Compliance%2FAWS-Firewall-Manager.svg",
    ),
    ("AWS::EC2::Instance", "aws%2FCompute%2FAmazon-EC2.svg"),
    (
        "AWS::EC2::NatGateway",
        "aws%2FNetworking%20&%20Content%20Delivery%2FAmazon-VPC_NAT-gateway_light-bg.svg",
    ),
    (
        "AWS::EC2::InternetGateway",
        "aws%2FNetworking%20&%20Content%20Delivery%2FAmazon-VPC_Internet-gateway_light-bg.svg",
    ),
    (
        ResourceType::AUTO_SCALING_GROUP,
        "aws%2FCompute%2FAmazon-EC2-Auto-Scaling.svg",
    ),
    (
        "AWS::ElasticLoadBalancingV2::LoadBalancer",
        "aws%2FNetworking%20&%20Content%20Delivery%2FElastic-Load-Balancing.svg",
    ),
    ("AWS::Lambda::Function", "aws%2FCompute%2FAWS-Lambda.svg"),
    ("AWS::S3::Bucket", "aws%2FStorage%2FAmazon-Simple-Storage-Service-S3.svg"),
    ("AWS::DynamoDB::Table", "aws%2FDatabase%2FAmazon-DynamoDB.svg"),
    ("AWS::RDS::DBInstance", "aws%2FDatabase%2FAmazon-RDS.svg"),
    ("AWS::RDS::DBCluster", "aws%2FDatabase%2FAmazon-Aurora.svg"),
    (
        "AWS::SNS::Topic",
        "aws%2FApplication%20Integration%2FAmazon-Simple-Notification-Service-SNS.svg",
    ),
    (
        "AWS::SQS::Queue",
        "aws%2FApplication%20Integration%2FAmazon-Simple-Queue-Service-SQS.svg",
    ),
    (
        "AWS::ApiGateway::RestApi",
        "aws%2FNetworking%20&%20Content%20Delivery%2FAmazon-API-Gateway.svg",
    ),
    (
        "AWS::ApiGatewayV2::Api",
        "aws%2FNetworking%20&%20Content%20Delivery%2FAmazon-API-Gateway.svg",
    ),
    (
        "AWS::ECS::Cluster",
        "aws%2FCompute%2FAmazon-Elastic-Container-Service.svg",
    ),
    (
        "AWS::ECS::Service",
        "aws%2FCompute%2FAmazon-Elastic-Container-Service_Service_light-bg.svg",
    ),
    (
        "AWS::CloudFormation::Stack",
        "aws%2FManagement%20&%20Governance%2FAWS-CloudFormation_Stack_light-bg.svg",
    ),
    (
        "AWS::IAM::Role",
        "aws%2FSecurity%2C%20Identity%2C%20&%20Compliance%2FAWS-Identity-and-Access-Management_Role_light-bg.svg",
    ),
];

/// Returns the built-in icon for `resource_type`.
///
/// # Examples
///
/// ```
/// use stratagram_core::{icon, resource::ResourceType};
///
/// let vpc = icon::builtin(&ResourceType::new("AWS::EC2::VPC"));
/// assert!(vpc.ends_with("Amazon-VPC.svg"));
///
/// let unknown = icon::builtin(&ResourceType::new("Custom::Thing"));
/// assert_eq!(unknown, icon::DEFAULT_ICON);
/// ```
pub fn builtin(resource_type: &ResourceType) -> String {
    BUILTIN_ICONS
        .iter()
        .find(|(tag, _)| *tag == resource_type.as_str())
        .map(|(_, path)| format!("{ICON_BASE}{path}"))
        .unwrap_or_else(|| DEFAULT_ICON.to_string())
}

/// Built-in icons plus user overrides.
#[derive(Debug, Clone, Default)]
pub struct IconTable {
    overrides: HashMap<String, String>,
    default: Option<String>,
}

impl IconTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `icon` for `resource_type` instead of the built-in entry.
    pub fn with_override(mut self, resource_type: impl Into<String>, icon: impl Into<String>) -> Self {
        self.overrides.insert(resource_type.into(), icon.into());
        self
    }

    /// Uses `icon` for type tags with neither an override nor a built-in entry.
    pub fn with_default(mut self, icon: impl Into<String>) -> Self {
        self.default = Some(icon.into());
        self
    }

    /// Looks up the icon for `resource_type`. Always succeeds.
    pub fn lookup(&self, resource_type: &ResourceType) -> String {
        if let Some(icon) = self.overrides.get(resource_type.as_str()) {
            return icon.clone();
        }

        let icon = builtin(resource_type);
        if icon == DEFAULT_ICON {
            trace!(resource_type = resource_type.as_str(); "No dedicated icon, using default");
        }
        match &self.default {
            Some(default) if icon == DEFAULT_ICON => default.clone(),
            _ => icon,
        }
    }
}
