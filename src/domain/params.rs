use anyhow::{Context, Result};
use serde::Deserialize;

/// Parameters of the `exterminate-containers` action, as printed by
/// `action-get --format=yaml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ExterminateParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub only_stopped: bool,
    #[serde(default)]
    pub dry: bool,
}

impl ExterminateParams {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(raw).context("decodificando parâmetros da action")
    }

    /// Name filter, where an empty string means every container.
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

pub const DEFAULT_IMAGE_ALIAS: &str = "termserver";

/// Parameters of the `import-image` action.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ImportImageParams {
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub limited: bool,
}

impl ImportImageParams {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(raw).context("decodificando parâmetros da action")
    }

    pub fn alias(&self) -> &str {
        self.alias
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_IMAGE_ALIAS)
    }
}

/// LXD quota settings taken from the charm configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct QuotaConfig {
    #[serde(rename = "lxc-quota-cpu-cores")]
    pub cpu_cores: u32,
    #[serde(rename = "lxc-quota-cpu-allowance")]
    pub cpu_allowance: String,
    #[serde(rename = "lxc-quota-ram")]
    pub ram: String,
    #[serde(rename = "lxc-quota-processes")]
    pub processes: u32,
}

impl QuotaConfig {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yml::from_str(raw).context("decodificando configuração de quotas do charm")
    }

    /// Profile keys in the order they are applied.
    pub fn limits(&self) -> [(&'static str, String); 4] {
        [
            ("limits.cpu", self.cpu_cores.to_string()),
            ("limits.cpu.allowance", self.cpu_allowance.clone()),
            ("limits.memory", self.ram.clone()),
            ("limits.processes", self.processes.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_from_action_get() {
        let params = ExterminateParams::from_yaml("dry: true\nname: c-bad\nonly-stopped: false\n")
            .unwrap();
        assert_eq!(params.name_filter(), Some("c-bad"));
        assert!(params.dry);
        assert!(!params.only_stopped);
    }

    #[test]
    fn test_empty_name_matches_all() {
        let params = ExterminateParams::from_yaml("name: \"\"\nonly-stopped: true\n").unwrap();
        assert_eq!(params.name_filter(), None);
        assert!(params.only_stopped);
        assert!(!params.dry);
    }

    #[test]
    fn test_name_is_not_trimmed() {
        let params = ExterminateParams::from_yaml("name: \" c1 \"\n").unwrap();
        assert_eq!(params.name_filter(), Some(" c1 "));
    }

    #[test]
    fn test_no_params() {
        assert_eq!(
            ExterminateParams::from_yaml("\n").unwrap(),
            ExterminateParams::default()
        );
    }

    #[test]
    fn test_invalid_flag_type() {
        assert!(ExterminateParams::from_yaml("dry: maybe\n").is_err());
    }

    #[test]
    fn test_import_params_defaults() {
        let params = ImportImageParams::from_yaml("alias: \"\"\nlimited: true\n").unwrap();
        assert_eq!(params.alias(), "termserver");
        assert!(params.limited);
        assert_eq!(ImportImageParams::from_yaml("alias: shell\n").unwrap().alias(), "shell");
    }

    #[test]
    fn test_quota_config_ignores_other_keys() {
        let cfg = QuotaConfig::from_yaml(
            "log-level: info\nlxc-quota-cpu-cores: 1\nlxc-quota-cpu-allowance: 100%\nlxc-quota-ram: 256MB\nlxc-quota-processes: 100\nport: 4247\n",
        )
        .unwrap();
        assert_eq!(
            cfg.limits(),
            [
                ("limits.cpu", "1".to_string()),
                ("limits.cpu.allowance", "100%".to_string()),
                ("limits.memory", "256MB".to_string()),
                ("limits.processes", "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_quota_config_missing_key() {
        assert!(QuotaConfig::from_yaml("lxc-quota-cpu-cores: 1\n").is_err());
    }
}
