use std::collections::BTreeMap;

use super::{Container, Volume};

/// Metadata attached to a pod template
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct ObjectMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// The specification half of a pod template
///
/// Injection appends to the three collections and never removes or reorders
/// existing entries. Caller supplied fields we do not model ride along in
/// `extra`.
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct PodSpec {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<Container>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub initContainers: Vec<Container>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A pod template as produced by the surrounding generation pipeline
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct PodTemplateSpec {
    pub metadata: ObjectMeta,
    pub spec: PodSpec,
}

impl PodTemplateSpec {
    /// Append a container after the existing ones
    pub fn append_container(&mut self, container: Container) {
        self.spec.containers.push(container);
    }

    /// Append an init container after the existing ones
    pub fn append_init_container(&mut self, container: Container) {
        self.spec.initContainers.push(container);
    }

    /// Append a volume after the existing ones
    pub fn append_volume(&mut self, volume: Volume) {
        self.spec.volumes.push(volume);
    }

    /// Set an annotation on the template metadata, overwriting any old value
    pub fn annotate<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.metadata.annotations.insert(key.into(), value.into());
    }
}
