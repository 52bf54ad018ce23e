use std::collections::BTreeMap;

use super::{EnvVar, SecurityContext, VolumeMount};

/// Compute resource requirements for a container
///
/// Always serialized, so an unconstrained container renders as
/// `resources: {}` the way kubernetes prints it.
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct ResourceRequirements {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub requests: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub limits: BTreeMap<String, String>,
}

/// Port exposed by an application container
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct ContainerPort {
    pub containerPort: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// A single container in a pod template
///
/// Covers the subset of the kubernetes container shape that injection
/// produces or needs to carry through. Fields a caller set that we do not
/// model are kept verbatim in `extra` so they survive re-serialization.
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct Container {
    pub name: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagePullPolicy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ContainerPort>,
    pub resources: ResourceRequirements,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub securityContext: Option<SecurityContext>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumeMounts: Vec<VolumeMount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminationMessagePath: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminationMessagePolicy: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}
