/// Containers and their resource envelope
mod container;
pub use self::container::{Container, ContainerPort, ResourceRequirements};

/// Environment variables with downward api references
mod env;
pub use self::env::{EnvVar, EnvVarSource, ObjectFieldSelector};

/// Security context for privileged sidecars
mod security;
pub use self::security::{Capabilities, SecurityContext};

/// Volumes and mounts backing the proxy
mod volume;
pub use self::volume::{EmptyDirVolumeSource, SecretVolumeSource, Volume, VolumeMount};

/// The pod template itself
mod pod;
pub use self::pod::{ObjectMeta, PodSpec, PodTemplateSpec};
