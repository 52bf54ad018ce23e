use std::collections::BTreeMap;

use crate::{ErrorKind, Result};

/// Istio proxy command line used when `proxyArgs` is not overridden
///
/// Comma separated; the double quotes around 15000 are part of the value.
const DEFAULT_PROXY_ARGS: &str = "proxy,sidecar,-v,2,--configPath,/etc/istio/proxy,--binaryPath,/usr/local/bin/envoy,--serviceCluster,helloworld,--drainDuration,45s,--parentShutdownDuration,1m0s,--discoveryAddress,istio-pilot.istio-system:8080,--discoveryRefreshDelay,1s,--zipkinAddress,zipkin.istio-system:9411,--connectTimeout,10s,--statsdUdpAddress,istio-mixer.istio-system:9125,--proxyAdminPort,\"15000\"";

/// Names of the injection tunables
///
/// Every key carries a default so lookups always resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigKey {
    Enabled,
    ProxyName,
    ProxyImage,
    InitImage,
    CoreDumpImage,
    ProxyArgs,
    ImagePullPolicy,
}

impl ConfigKey {
    /// Wire name of the key as the host tool spells it
    pub fn key(self) -> &'static str {
        match self {
            ConfigKey::Enabled => "enabled",
            ConfigKey::ProxyName => "proxyName",
            ConfigKey::ProxyImage => "proxyImage",
            ConfigKey::InitImage => "initImage",
            ConfigKey::CoreDumpImage => "coreDumpImage",
            ConfigKey::ProxyArgs => "proxyArgs",
            ConfigKey::ImagePullPolicy => "imagePullPolicy",
        }
    }

    /// Value used when the host supplies no override
    pub fn default_value(self) -> &'static str {
        match self {
            ConfigKey::Enabled => "yes",
            ConfigKey::ProxyName => "istio-proxy",
            ConfigKey::ProxyImage => "docker.io/istio/proxy_debug:0.2.12",
            ConfigKey::InitImage => "docker.io/istio/proxy_init:0.2.12",
            ConfigKey::CoreDumpImage => "alpine",
            ConfigKey::ProxyArgs => DEFAULT_PROXY_ARGS,
            ConfigKey::ImagePullPolicy => "IfNotPresent",
        }
    }

    /// All keys, in declaration order
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::Enabled,
            ConfigKey::ProxyName,
            ConfigKey::ProxyImage,
            ConfigKey::InitImage,
            ConfigKey::CoreDumpImage,
            ConfigKey::ProxyArgs,
            ConfigKey::ImagePullPolicy,
        ]
    }
}

/// Host supplied overrides on top of the built in defaults
///
/// Deserializes from a flat string map, so an overrides file is just:
///
/// ```yaml
/// enabled: "yes"
/// proxyName: istio-proxy
/// ```
#[derive(Deserialize, Clone, Default, Debug)]
#[serde(default)]
pub struct InjectionConfig {
    #[serde(flatten)]
    overrides: BTreeMap<String, String>,
}

impl InjectionConfig {
    /// Resolve a key against the overrides, falling back to its default
    pub fn get(&self, key: ConfigKey) -> &str {
        self.overrides
            .get(key.key())
            .map(|v| v.as_str())
            .unwrap_or_else(|| key.default_value())
    }

    /// Set a single override
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.overrides.insert(key.into(), value.into());
    }

    /// The fully resolved key/value view, for display
    pub fn resolved(&self) -> BTreeMap<&'static str, &str> {
        ConfigKey::all().iter().map(|k| (k.key(), self.get(*k))).collect()
    }

    /// Check overrides for values injection cannot work with
    ///
    /// Unknown keys are ignored by resolution, so they only warn here.
    pub fn verify(&self) -> Result<()> {
        for key in self.overrides.keys() {
            if !ConfigKey::all().iter().any(|k| k.key() == key) {
                warn!("ignoring unknown injection config key '{}'", key);
            }
        }
        let named = [
            ConfigKey::ProxyName,
            ConfigKey::ProxyImage,
            ConfigKey::InitImage,
            ConfigKey::CoreDumpImage,
        ];
        for k in &named {
            if self.get(*k).is_empty() {
                bail!(ErrorKind::InvalidInjectionConfig(k.key().into()));
            }
        }
        match self.get(ConfigKey::ImagePullPolicy) {
            "Always" | "IfNotPresent" | "Never" => {}
            _ => bail!(ErrorKind::InvalidInjectionConfig(
                ConfigKey::ImagePullPolicy.key().into()
            )),
        }
        Ok(())
    }
}
