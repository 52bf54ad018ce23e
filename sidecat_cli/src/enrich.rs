use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};

use sidecat_definitions::structs::PodTemplateSpec;
use sidecat_definitions::{inject, InjectionConfig};

use crate::{Result, ResultExt};

/// Rendering formats for enriched templates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn from_flag(flag: &str) -> Result<OutputFormat> {
        match flag {
            "yaml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => bail!("unsupported output format '{}'", flag),
        }
    }
}

/// Read a pod template from a file, or stdin when no path is given
pub fn load_template(path: Option<&str>) -> Result<PodTemplateSpec> {
    let mut data = String::new();
    match path {
        Some(p) => {
            debug!("reading pod template from {}", p);
            File::open(p)
                .chain_err(|| format!("failed to open pod template {}", p))?
                .read_to_string(&mut data)?;
        }
        None => {
            debug!("reading pod template from stdin");
            io::stdin().read_to_string(&mut data)?;
        }
    }
    let tpl = serde_yaml::from_str(&data)?;
    Ok(tpl)
}

/// Build the injection config from an optional overrides file plus --set pairs
///
/// --set pairs win over the file; a later pair wins over an earlier one.
pub fn load_config(path: Option<&str>, sets: &[String]) -> Result<InjectionConfig> {
    let mut conf = match path {
        Some(p) => {
            let mut data = String::new();
            File::open(p)
                .chain_err(|| format!("failed to open injection config {}", p))?
                .read_to_string(&mut data)?;
            serde_yaml::from_str(&data)?
        }
        None => InjectionConfig::default(),
    };
    for (k, v) in parse_set_overrides(sets)? {
        conf.set(k, v);
    }
    Ok(conf)
}

/// Split key=value override pairs from the command line
pub fn parse_set_overrides(sets: &[String]) -> Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for pair in sets {
        let mut kv = pair.splitn(2, '=');
        match (kv.next(), kv.next()) {
            (Some(k), Some(v)) if !k.is_empty() => {
                out.insert(k.to_string(), v.to_string());
            }
            _ => bail!("--set expects key=value, got '{}'", pair),
        }
    }
    Ok(out)
}

/// Inject into a loaded template and render the result
pub fn enrich(
    tpl: &mut PodTemplateSpec,
    conf: &InjectionConfig,
    format: OutputFormat,
) -> Result<String> {
    inject(tpl, conf);
    render(tpl, format)
}

/// Serialize a template in the requested format
pub fn render(tpl: &PodTemplateSpec, format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Yaml => serde_yaml::to_string(tpl)?,
        OutputFormat::Json => serde_json::to_string_pretty(tpl)?,
    };
    Ok(out)
}

/// Render the effective config for the defaults subcommand
pub fn show_config(conf: &InjectionConfig) -> Result<String> {
    Ok(serde_yaml::to_string(&conf.resolved())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidecat_definitions::inject::STATUS_ANNOTATION;

    fn demo_template() -> PodTemplateSpec {
        serde_yaml::from_str(
            "
metadata:
  name: helloworld
spec:
  containers:
  - name: helloworld
    image: istio/examples-helloworld-v1
    ports:
    - containerPort: 5000
      protocol: TCP
  dnsPolicy: ClusterFirst
  restartPolicy: Always
",
        )
        .unwrap()
    }

    #[test]
    fn set_overrides_parse() {
        let sets = vec!["enabled=no".to_string(), "proxyName=mesh-proxy".to_string()];
        let parsed = parse_set_overrides(&sets).unwrap();
        assert_eq!(parsed["enabled"], "no");
        assert_eq!(parsed["proxyName"], "mesh-proxy");
    }

    #[test]
    fn set_overrides_allow_equals_in_value() {
        let sets = vec!["proxyArgs=a,b,--flag=1".to_string()];
        let parsed = parse_set_overrides(&sets).unwrap();
        assert_eq!(parsed["proxyArgs"], "a,b,--flag=1");
    }

    #[test]
    fn set_overrides_reject_missing_equals() {
        assert!(parse_set_overrides(&["enabled".to_string()]).is_err());
        assert!(parse_set_overrides(&["=yes".to_string()]).is_err());
    }

    #[test]
    fn enrich_keeps_existing_containers_and_unmodeled_fields() {
        let mut tpl = demo_template();
        let out = enrich(&mut tpl, &InjectionConfig::default(), OutputFormat::Yaml).unwrap();
        assert_eq!(tpl.spec.containers.len(), 2);
        assert_eq!(tpl.spec.containers[0].name, "helloworld");
        assert!(out.contains("istio-proxy"));
        assert!(out.contains(STATUS_ANNOTATION));
        // fields outside the modeled subset ride along
        assert!(out.contains("dnsPolicy: ClusterFirst"));
        assert!(out.contains("restartPolicy: Always"));
    }

    #[test]
    fn enrich_is_a_no_op_when_disabled() {
        let mut tpl = demo_template();
        let before = tpl.clone();
        let mut conf = InjectionConfig::default();
        conf.set("enabled", "No");
        enrich(&mut tpl, &conf, OutputFormat::Yaml).unwrap();
        assert_eq!(tpl, before);
    }

    #[test]
    fn render_json() {
        let mut tpl = demo_template();
        let out = enrich(&mut tpl, &InjectionConfig::default(), OutputFormat::Json).unwrap();
        assert!(out.contains("\"istio-proxy\""));
        assert!(out.contains("\"sidecar.istio.io/status\""));
    }

    #[test]
    fn show_config_renders_every_key() {
        let out = show_config(&InjectionConfig::default()).unwrap();
        assert!(out.contains("proxyName: istio-proxy"));
        assert!(out.contains("coreDumpImage: alpine"));
        assert!(out.contains("imagePullPolicy: IfNotPresent"));
    }
}
