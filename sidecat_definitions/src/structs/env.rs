/// Environment variable in a container
///
/// Carries either a literal `value` or a `valueFrom` downward api reference.
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct EnvVar {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valueFrom: Option<EnvVarSource>,
}

/// Source for an environment variable's value
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct EnvVarSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fieldRef: Option<ObjectFieldSelector>,
}

/// Selects a field of the owning pod
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct ObjectFieldSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apiVersion: Option<String>,
    pub fieldPath: String,
}

impl EnvVar {
    /// Downward api reference to a field of the owning pod
    pub fn from_field(name: &str, field_path: &str) -> EnvVar {
        EnvVar {
            name: name.into(),
            value: None,
            valueFrom: Some(EnvVarSource {
                fieldRef: Some(ObjectFieldSelector {
                    apiVersion: None,
                    fieldPath: field_path.into(),
                }),
            }),
        }
    }
}
