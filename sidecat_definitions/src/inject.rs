use crate::config::{ConfigKey, InjectionConfig};
use crate::structs::{
    Capabilities, Container, EmptyDirVolumeSource, EnvVar, PodTemplateSpec, ResourceRequirements,
    SecretVolumeSource, SecurityContext, Volume, VolumeMount,
};

/// Annotation key stamped on enriched pod templates
pub const STATUS_ANNOTATION: &str = "sidecar.istio.io/status";

/// Status literal identifying the injected proxy version
pub const STATUS_VALUE: &str =
    "injected-version-releng@0d29a2c0d15f-0.2.12-998e0e00d375688bcb2af042fc81a60ce5264009";

const TERMINATION_MESSAGE_PATH: &str = "/dev/termination-log";
const TERMINATION_MESSAGE_POLICY: &str = "File";

/// The uid the istio proxy runs as
const PROXY_UID: i64 = 1337;

/// Whether injection is switched on at all
///
/// Only a case insensitive "yes" enables it; anything else is off.
pub fn should_inject(conf: &InjectionConfig) -> bool {
    conf.get(ConfigKey::Enabled).eq_ignore_ascii_case("yes")
}

/// Sidecar argument list from the configured comma separated proxy args
///
/// The split is verbatim; embedded commas cannot be escaped and stray
/// commas yield empty tokens.
pub fn sidecar_args(conf: &InjectionConfig) -> Vec<String> {
    let mut args: Vec<String> = conf
        .get(ConfigKey::ProxyArgs)
        .split(',')
        .map(String::from)
        .collect();
    args.push("--passthrough".into());
    args.push("8080".into());
    args
}

/// The three downward api identity variables the proxy needs
pub fn proxy_env_vars() -> Vec<EnvVar> {
    vec![
        EnvVar::from_field("POD_NAME", "metadata.name"),
        EnvVar::from_field("POD_NAMESPACE", "metadata.namespace"),
        EnvVar::from_field("POD_IP", "status.podIP"),
    ]
}

/// Mounts the sidecar needs for proxy config and certs
pub fn istio_volume_mounts() -> Vec<VolumeMount> {
    vec![
        VolumeMount {
            name: "istio-envoy".into(),
            mountPath: "/etc/istio/proxy".into(),
            readOnly: false,
        },
        VolumeMount {
            name: "istio-certs".into(),
            mountPath: "/etc/certs".into(),
            readOnly: true,
        },
    ]
}

/// Volumes backing the sidecar mounts
pub fn istio_volumes() -> Vec<Volume> {
    vec![
        Volume {
            name: "istio-envoy".into(),
            emptyDir: Some(EmptyDirVolumeSource {
                medium: Some("Memory".into()),
                sizeLimit: None,
            }),
            secret: None,
        },
        Volume {
            name: "istio-certs".into(),
            emptyDir: None,
            secret: Some(SecretVolumeSource {
                secretName: "istio.default".into(),
                defaultMode: Some(420),
                optional: Some(true),
            }),
        },
    ]
}

/// The istio proxy container itself
pub fn sidecar_container(
    conf: &InjectionConfig,
    args: Vec<String>,
    env: Vec<EnvVar>,
    mounts: Vec<VolumeMount>,
) -> Container {
    Container {
        name: conf.get(ConfigKey::ProxyName).into(),
        image: conf.get(ConfigKey::ProxyImage).into(),
        imagePullPolicy: Some(conf.get(ConfigKey::ImagePullPolicy).into()),
        args,
        env,
        resources: ResourceRequirements::default(),
        securityContext: Some(SecurityContext {
            runAsUser: Some(PROXY_UID),
            privileged: Some(true),
            readOnlyRootFilesystem: Some(false),
            capabilities: None,
        }),
        volumeMounts: mounts,
        terminationMessagePath: Some(TERMINATION_MESSAGE_PATH.into()),
        terminationMessagePolicy: Some(TERMINATION_MESSAGE_POLICY.into()),
        ..Container::default()
    }
}

/// Init container that redirects pod traffic through the proxy
pub fn istio_init_container(conf: &InjectionConfig) -> Container {
    Container {
        name: "istio-init".into(),
        image: conf.get(ConfigKey::InitImage).into(),
        imagePullPolicy: Some("IfNotPresent".into()),
        args: vec!["-p".into(), "15001".into(), "-u".into(), "1337".into()],
        securityContext: Some(SecurityContext {
            privileged: Some(true),
            capabilities: Some(Capabilities {
                add: vec!["NET_ADMIN".into()],
            }),
            ..SecurityContext::default()
        }),
        terminationMessagePath: Some(TERMINATION_MESSAGE_PATH.into()),
        terminationMessagePolicy: Some(TERMINATION_MESSAGE_POLICY.into()),
        ..Container::default()
    }
}

/// Init container that widens core dump limits for the proxy
pub fn core_dump_container(conf: &InjectionConfig) -> Container {
    Container {
        name: "enable-core-dump".into(),
        image: conf.get(ConfigKey::CoreDumpImage).into(),
        imagePullPolicy: Some("IfNotPresent".into()),
        command: Some(vec!["/bin/sh".into()]),
        // the leading hyphen before sysctl is part of the argument
        args: vec![
            "-c".into(),
            "-sysctl -w kernel.core_pattern=/etc/istio/proxy/core.%e.%p.%t && ulimit -c unlimited"
                .into(),
        ],
        securityContext: Some(SecurityContext {
            privileged: Some(true),
            ..SecurityContext::default()
        }),
        terminationMessagePath: Some(TERMINATION_MESSAGE_PATH.into()),
        terminationMessagePolicy: Some(TERMINATION_MESSAGE_POLICY.into()),
        ..Container::default()
    }
}

// TODO: check whether an istio proxy sidecar is already present before
// appending; repeated injection currently duplicates containers and volumes.

/// Apply istio sidecar injection to a pod template in place
///
/// Appends the proxy container, both init containers and both volumes, and
/// stamps the status annotation on the template metadata. Strictly nothing
/// happens when injection is disabled.
pub fn inject(tpl: &mut PodTemplateSpec, conf: &InjectionConfig) {
    if !should_inject(conf) {
        debug!("istio injection disabled; leaving pod template untouched");
        return;
    }
    info!("Adding Istio proxy");
    let sidecar = sidecar_container(
        conf,
        sidecar_args(conf),
        proxy_env_vars(),
        istio_volume_mounts(),
    );
    tpl.append_container(sidecar);
    tpl.append_init_container(istio_init_container(conf));
    tpl.append_init_container(core_dump_container(conf));
    for volume in istio_volumes() {
        tpl.append_volume(volume);
    }
    tpl.annotate(STATUS_ANNOTATION, STATUS_VALUE);
}
