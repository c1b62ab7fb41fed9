use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    Running,
    Stopped,
    /// Any other LXD status (Frozen, Error, ...), kept verbatim
    Other(String),
}

impl ContainerState {
    pub fn from_status(status: &str) -> Self {
        match status {
            "Running" => Self::Running,
            "Stopped" => Self::Stopped,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// LXD only deletes instances that are fully stopped.
    pub fn needs_stop(&self) -> bool {
        !matches!(self, Self::Stopped)
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Stopped => write!(f, "Stopped"),
            Self::Other(status) => write!(f, "{status}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub state: ContainerState,
}

impl Container {
    pub fn new(name: impl Into<String>, state: ContainerState) -> Self {
        Self {
            name: name.into(),
            state,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn needs_stop(&self) -> bool {
        self.state.needs_stop()
    }
}

pub const INSTANCE_TYPE_CONTAINER: &str = "container";

/// One entry of `lxc list --format yaml`. Only the fields we act on are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct Instance {
    pub name: String,
    #[serde(default)]
    pub status: String,
    /// `container` or `virtual-machine`; absent on LXD releases without VMs
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Instance {
    pub fn is_container(&self) -> bool {
        self.kind.is_empty() || self.kind == INSTANCE_TYPE_CONTAINER
    }
}

impl From<Instance> for Container {
    fn from(instance: Instance) -> Self {
        Container::new(instance.name, ContainerState::from_status(&instance.status))
    }
}
