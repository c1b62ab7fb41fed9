use crate::domain::{Container, ContainerRuntime, ContainerState, HookEnvironment, Image};
use anyhow::{Result, bail};
use std::path::Path;
use std::sync::RwLock;

/// In-memory LXD stand-in that records every call as `"op:arg"`.
#[derive(Debug)]
pub struct MockRuntime {
    containers: RwLock<Vec<Container>>,
    networks: RwLock<Vec<String>>,
    images: RwLock<Vec<Image>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            containers: RwLock::new(Vec::new()),
            networks: RwLock::new(Vec::new()),
            images: RwLock::new(Vec::new()),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
        }
    }

    /// Build a runtime from `(name, running)` pairs, keeping their order.
    pub fn with_containers(containers: &[(&str, bool)]) -> Self {
        let mock = Self::new();
        for (name, running) in containers {
            let state = if *running {
                ContainerState::Running
            } else {
                ContainerState::Stopped
            };
            mock.add_container(name, state);
        }
        mock
    }

    pub fn add_container(&self, name: &str, state: ContainerState) {
        self.containers
            .write()
            .unwrap()
            .push(Container::new(name, state));
    }

    pub fn add_network(&self, name: &str) {
        self.networks.write().unwrap().push(name.to_string());
    }

    pub fn add_image(&self, image: Image) {
        self.images.write().unwrap().push(image);
    }

    pub fn images(&self) -> Vec<Image> {
        self.images.read().unwrap().clone()
    }

    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    /// Names of the containers that still exist
    pub fn container_names(&self) -> Vec<String> {
        self.containers
            .read()
            .unwrap()
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn get_state(&self, name: &str) -> Option<ContainerState> {
        self.containers
            .read()
            .unwrap()
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.state.clone())
    }

    /// Whether an operation such as `"stop"` was issued for the container
    pub fn was_called(&self, operation: &str, name: &str) -> bool {
        let expected = format!("{operation}:{name}");
        self.commands.read().unwrap().iter().any(|c| *c == expected)
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                bail!("Mock failure on: {}", operation);
            }
        }
        Ok(())
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for MockRuntime {
    fn list_containers(&self) -> Result<Vec<Container>> {
        self.record_command("list");
        self.check_fail("list")?;
        Ok(self.containers.read().unwrap().clone())
    }

    fn stop_container(&self, name: &str) -> Result<()> {
        self.record_command(&format!("stop:{}", name));
        self.check_fail("stop")?;

        let mut containers = self.containers.write().unwrap();
        match containers.iter_mut().find(|c| c.name == name) {
            Some(container) => {
                container.state = ContainerState::Stopped;
                Ok(())
            }
            None => bail!("container {} não existe", name),
        }
    }

    fn delete_container(&self, name: &str) -> Result<()> {
        self.record_command(&format!("delete:{}", name));
        self.check_fail("delete")?;

        let mut containers = self.containers.write().unwrap();
        let Some(pos) = containers.iter().position(|c| c.name == name) else {
            bail!("container {} não existe", name);
        };
        if containers[pos].needs_stop() {
            bail!("container {} não está parado", name);
        }
        containers.remove(pos);
        Ok(())
    }

    fn set_profile_key(&self, profile: &str, key: &str, value: &str) -> Result<()> {
        self.record_command(&format!("profile:{}:{}={}", profile, key, value));
        self.check_fail("profile")?;
        Ok(())
    }

    fn list_networks(&self) -> Result<Vec<String>> {
        self.record_command("networks");
        self.check_fail("networks")?;
        Ok(self.networks.read().unwrap().clone())
    }

    fn init(&self) -> Result<()> {
        self.record_command("init");
        self.check_fail("init")?;
        self.add_network("jujushellbr0");
        Ok(())
    }

    fn wait_ready(&self) -> Result<()> {
        self.record_command("wait_ready");
        self.check_fail("wait_ready")
    }

    fn list_images(&self) -> Result<Vec<Image>> {
        self.record_command("images");
        self.check_fail("images")?;
        Ok(self.images())
    }

    fn import_image(&self, path: &Path) -> Result<()> {
        self.record_command(&format!("image_import:{}", path.display()));
        self.check_fail("image_import")
    }

    fn add_image_alias(&self, alias: &str, fingerprint: &str) -> Result<()> {
        self.record_command(&format!("alias_add:{}:{}", alias, fingerprint));
        self.check_fail("alias_add")?;
        let mut images = self.images.write().unwrap();
        match images.iter_mut().find(|i| i.fingerprint == fingerprint) {
            Some(image) => image.aliases.extend(Image::new("", &[alias]).aliases),
            None => images.push(Image::new(fingerprint, &[alias])),
        }
        Ok(())
    }

    fn delete_image_alias(&self, alias: &str) -> Result<()> {
        self.record_command(&format!("alias_delete:{}", alias));
        self.check_fail("alias_delete")?;
        for image in self.images.write().unwrap().iter_mut() {
            image.aliases.retain(|a| a.name != alias);
        }
        Ok(())
    }
}

/// Hook tools stand-in holding canned parameters/config and capturing results.
#[derive(Debug, Default)]
pub struct MockHookEnv {
    params: RwLock<String>,
    config: RwLock<String>,
    results: RwLock<Vec<(String, String)>>,
    failures: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
}

impl MockHookEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: &str) -> Self {
        let env = Self::new();
        *env.params.write().unwrap() = params.to_string();
        env
    }

    pub fn set_config(&self, config: &str) {
        *self.config.write().unwrap() = config.to_string();
    }

    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn results(&self) -> Vec<(String, String)> {
        self.results.read().unwrap().clone()
    }

    pub fn result(&self, key: &str) -> Option<String> {
        self.results
            .read()
            .unwrap()
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.read().unwrap().clone()
    }

    fn check_fail(&self, operation: &str) -> Result<()> {
        if let Some(ref fail_on) = *self.fail_on.read().unwrap() {
            if fail_on == operation {
                bail!("Mock failure on: {}", operation);
            }
        }
        Ok(())
    }
}

impl HookEnvironment for MockHookEnv {
    fn action_params(&self) -> Result<String> {
        self.check_fail("action-get")?;
        Ok(self.params.read().unwrap().clone())
    }

    fn action_set(&self, key: &str, value: &str) -> Result<()> {
        self.check_fail("action-set")?;
        self.results
            .write()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn action_fail(&self, message: &str) -> Result<()> {
        self.failures.write().unwrap().push(message.to_string());
        Ok(())
    }

    fn config(&self) -> Result<String> {
        self.check_fail("config-get")?;
        Ok(self.config.read().unwrap().clone())
    }
}
