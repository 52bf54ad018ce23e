fn is_false(b: &bool) -> bool {
    !b
}

/// Mount of a named volume into a container
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct VolumeMount {
    pub name: String,
    pub mountPath: String,
    #[serde(skip_serializing_if = "is_false")]
    pub readOnly: bool,
}

/// Memory or disk backed scratch volume, discarded with the pod
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct EmptyDirVolumeSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizeLimit: Option<String>,
}

/// Volume populated from a kubernetes secret at pod start
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct SecretVolumeSource {
    pub secretName: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaultMode: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

/// Named volume in a pod template
///
/// Exactly one source is expected to be set.
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(default)]
pub struct Volume {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emptyDir: Option<EmptyDirVolumeSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<SecretVolumeSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_volume_serializes_all_fields() {
        let vol = Volume {
            name: "istio-certs".into(),
            emptyDir: None,
            secret: Some(SecretVolumeSource {
                secretName: "istio.default".into(),
                defaultMode: Some(420),
                optional: Some(true),
            }),
        };
        let yaml = serde_yaml::to_string(&vol).unwrap();
        assert!(yaml.contains("secretName: istio.default"));
        assert!(yaml.contains("defaultMode: 420"));
        assert!(yaml.contains("optional: true"));
        assert!(!yaml.contains("emptyDir"));
    }

    #[test]
    fn empty_dir_omits_unset_size_limit() {
        let vol = Volume {
            name: "istio-envoy".into(),
            emptyDir: Some(EmptyDirVolumeSource {
                medium: Some("Memory".into()),
                sizeLimit: None,
            }),
            secret: None,
        };
        let yaml = serde_yaml::to_string(&vol).unwrap();
        assert!(yaml.contains("medium: Memory"));
        assert!(!yaml.contains("sizeLimit"));
    }

    #[test]
    fn read_only_mounts_only_serialize_when_set() {
        let rw = VolumeMount {
            name: "istio-envoy".into(),
            mountPath: "/etc/istio/proxy".into(),
            readOnly: false,
        };
        let ro = VolumeMount {
            name: "istio-certs".into(),
            mountPath: "/etc/certs".into(),
            readOnly: true,
        };
        assert!(!serde_yaml::to_string(&rw).unwrap().contains("readOnly"));
        assert!(serde_yaml::to_string(&ro).unwrap().contains("readOnly: true"));
    }
}
