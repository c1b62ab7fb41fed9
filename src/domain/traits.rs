use super::{Container, Image};
use anyhow::Result;
use std::fmt::Debug;
use std::path::Path;

/// Trait for container runtime operations
pub trait ContainerRuntime: Send + Sync + Debug {
    /// List every container, in the order the runtime reports them
    fn list_containers(&self) -> Result<Vec<Container>>;

    /// Stop a container, waiting until it is stopped
    fn stop_container(&self, name: &str) -> Result<()>;

    /// Delete a stopped container
    fn delete_container(&self, name: &str) -> Result<()>;

    /// Set a key on a runtime profile
    fn set_profile_key(&self, profile: &str, key: &str, value: &str) -> Result<()>;

    /// Names of the configured networks
    fn list_networks(&self) -> Result<Vec<String>>;

    /// First-time initialization, including the bridge network
    fn init(&self) -> Result<()>;

    /// Block until the daemon accepts requests
    fn wait_ready(&self) -> Result<()>;

    /// List the local images
    fn list_images(&self) -> Result<Vec<Image>>;

    /// Import an image tarball
    fn import_image(&self, path: &Path) -> Result<()>;

    /// Point an alias at the image with the given fingerprint
    fn add_image_alias(&self, alias: &str, fingerprint: &str) -> Result<()>;

    /// Remove an image alias
    fn delete_image_alias(&self, alias: &str) -> Result<()>;
}

/// Access to the hook tools of a running action
pub trait HookEnvironment: Send + Sync + Debug {
    /// Raw YAML of the action parameters
    fn action_params(&self) -> Result<String>;

    /// Record a result value for the running action
    fn action_set(&self, key: &str, value: &str) -> Result<()>;

    /// Mark the running action as failed
    fn action_fail(&self, message: &str) -> Result<()>;

    /// Raw YAML of the charm configuration
    fn config(&self) -> Result<String>;
}
