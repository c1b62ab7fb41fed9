use crate::domain::{Container, ContainerRuntime, Image, Instance, Network};
use crate::infra::command::{call, call_in};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_LXC: &str = "/snap/bin/lxc";
pub const DEFAULT_LXD: &str = "/snap/bin/lxd";
pub const BRIDGE_NETWORK: &str = "jujushellbr0";
pub const WAIT_READY_TIMEOUT_SECS: u32 = 300;

/// Drives LXD through the `lxc` command line client, and the `lxd` binary
/// for daemon-level tasks.
#[derive(Debug, Clone)]
pub struct LxcAdapter {
    binary: String,
    lxd: String,
}

impl LxcAdapter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            lxd: DEFAULT_LXD.to_string(),
        }
    }

    pub fn with_lxd(mut self, lxd: impl Into<String>) -> Self {
        self.lxd = lxd.into();
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn lxc(&self, args: &[&str], context: &str) -> Result<String> {
        call(&self.binary, args).with_context(|| context.to_string())
    }

    // The snap refuses to run from directories it cannot see.
    fn lxd(&self, args: &[&str], context: &str) -> Result<String> {
        call_in(Path::new("/"), &self.lxd, args).with_context(|| context.to_string())
    }
}

impl Default for LxcAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_LXC)
    }
}

impl ContainerRuntime for LxcAdapter {
    fn list_containers(&self) -> Result<Vec<Container>> {
        let raw = self.lxc(
            &["list", "type=container", "--format", "yaml"],
            "listando containers",
        )?;
        let containers = parse_instances(&raw)?;
        debug!("{} container(s) encontrados", containers.len());
        Ok(containers)
    }

    fn stop_container(&self, name: &str) -> Result<()> {
        self.lxc(&["stop", name], &format!("parando container {name}"))
            .map(|_| ())
    }

    fn delete_container(&self, name: &str) -> Result<()> {
        self.lxc(&["delete", name], &format!("removendo container {name}"))
            .map(|_| ())
    }

    fn set_profile_key(&self, profile: &str, key: &str, value: &str) -> Result<()> {
        self.lxc(
            &["profile", "set", profile, key, value],
            &format!("atualizando {key} no profile {profile}"),
        )
        .map(|_| ())
    }

    fn list_networks(&self) -> Result<Vec<String>> {
        let raw = self.lxc(&["network", "list", "--format", "yaml"], "listando redes")?;
        let networks: Vec<Network> = parse_list(&raw, "lxc network list")?;
        Ok(networks.into_iter().map(|n| n.name).collect())
    }

    fn init(&self) -> Result<()> {
        self.lxd(&["init", "--auto"], "inicializando LXD")?;
        self.lxc(
            &[
                "network",
                "create",
                BRIDGE_NETWORK,
                "ipv4.nat=true",
                "ipv6.address=none",
            ],
            &format!("criando rede {BRIDGE_NETWORK}"),
        )?;
        self.lxc(
            &["network", "attach-profile", BRIDGE_NETWORK, "default", "eth0"],
            &format!("associando rede {BRIDGE_NETWORK} ao profile default"),
        )
        .map(|_| ())
    }

    fn wait_ready(&self) -> Result<()> {
        let timeout = format!("--timeout={WAIT_READY_TIMEOUT_SECS}");
        self.lxd(&["waitready", timeout.as_str()], "aguardando LXD")
            .map(|_| ())
    }

    fn list_images(&self) -> Result<Vec<Image>> {
        let raw = self.lxc(&["image", "list", "--format", "yaml"], "listando imagens")?;
        parse_list(&raw, "lxc image list")
    }

    fn import_image(&self, path: &Path) -> Result<()> {
        let path = path.to_string_lossy();
        self.lxc(&["image", "import", &*path], &format!("importando imagem {path}"))
            .map(|_| ())
    }

    fn add_image_alias(&self, alias: &str, fingerprint: &str) -> Result<()> {
        self.lxc(
            &["image", "alias", "create", alias, fingerprint],
            &format!("criando alias {alias}"),
        )
        .map(|_| ())
    }

    fn delete_image_alias(&self, alias: &str) -> Result<()> {
        self.lxc(
            &["image", "alias", "delete", alias],
            &format!("removendo alias {alias}"),
        )
        .map(|_| ())
    }
}

fn parse_list<T: DeserializeOwned>(raw: &str, source: &str) -> Result<Vec<T>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yml::from_str(raw).with_context(|| format!("decodificando saída de {source}"))
}

/// Decode the output of `lxc list --format yaml`, keeping containers only.
pub fn parse_instances(raw: &str) -> Result<Vec<Container>> {
    let instances: Vec<Instance> = parse_list(raw, "lxc list")?;
    Ok(instances
        .into_iter()
        .filter(|instance| {
            let keep = instance.is_container();
            if !keep {
                debug!("{} ignorado ({})", instance.name, instance.kind);
            }
            keep
        })
        .map(Container::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContainerState;

    #[test]
    fn test_parse_instances_keeps_order() {
        let raw = r#"
- architecture: x86_64
  name: term-alice
  status: Running
  status_code: 103
  type: container
- architecture: x86_64
  name: term-bob
  status: Stopped
  status_code: 102
  type: container
"#;
        let containers = parse_instances(raw).unwrap();
        assert_eq!(
            containers,
            vec![
                Container::new("term-alice", ContainerState::Running),
                Container::new("term-bob", ContainerState::Stopped),
            ]
        );
    }

    #[test]
    fn test_parse_instances_skips_virtual_machines() {
        let raw = "- name: term-alice\n  status: Stopped\n  type: container\n- name: build-vm\n  status: Stopped\n  type: virtual-machine\n";
        let names: Vec<String> = parse_instances(raw)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["term-alice"]);
    }

    #[test]
    fn test_parse_instances_without_type() {
        let containers = parse_instances("- name: old\n  status: Stopped\n").unwrap();
        assert_eq!(containers, vec![Container::new("old", ContainerState::Stopped)]);
    }

    #[test]
    fn test_parse_no_instances() {
        assert!(parse_instances("[]\n").unwrap().is_empty());
        assert!(parse_instances("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_instances("not: [a list").is_err());
    }

    #[test]
    fn test_parse_images() {
        let raw = r#"
- aliases:
  - name: termserver
    description: ""
  architecture: x86_64
  fingerprint: 1d65bf29403e4fb1767522a107c827b8884d16640cf0e3b18c4c1dd107e0d49d
- aliases: []
  fingerprint: 2d65bf29403e4fb1767522a107c827b8884d16640cf0e3b18c4c1dd107e0d49d
"#;
        let images: Vec<Image> = parse_list(raw, "lxc image list").unwrap();
        assert_eq!(images.len(), 2);
        assert!(images[0].has_alias("termserver"));
        assert!(!images[1].has_alias("termserver"));
    }

    #[test]
    fn test_missing_binary_is_reported() {
        let adapter = LxcAdapter::new("/no/such/lxc");
        let err = adapter.list_containers().unwrap_err();
        assert_eq!(err.to_string(), "listando containers");
        assert!(format!("{err:#}").contains("not found"));
    }
}
