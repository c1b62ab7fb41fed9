use crate::domain::{ContainerRuntime, ExterminateParams};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Which containers to remove and whether to actually remove them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExterminateOptions {
    /// Exact container name; `None` matches every container
    pub name: Option<String>,
    /// Leave running containers alone
    pub only_stopped: bool,
    /// Report what would be removed without touching anything
    pub dry: bool,
}

impl ExterminateOptions {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn only_stopped(mut self) -> Self {
        self.only_stopped = true;
        self
    }

    pub fn dry(mut self) -> Self {
        self.dry = true;
        self
    }
}

impl From<&ExterminateParams> for ExterminateOptions {
    fn from(params: &ExterminateParams) -> Self {
        Self {
            name: params.name_filter().map(str::to_string),
            only_stopped: params.only_stopped,
            dry: params.dry,
        }
    }
}

pub struct Exterminator {
    runtime: Arc<dyn ContainerRuntime>,
}

impl Exterminator {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    /// Stops and deletes the matching containers, returning their names in
    /// the order the runtime listed them.
    ///
    /// The first failing stop or delete aborts the run; containers handled
    /// before it stay removed.
    pub fn exterminate(&self, options: &ExterminateOptions) -> Result<Vec<String>> {
        let mut removed = Vec::new();

        for container in self.runtime.list_containers()? {
            if let Some(name) = &options.name {
                if &container.name != name {
                    continue;
                }
            }

            if options.only_stopped && container.is_running() {
                debug!("{} está rodando, ignorado", container.name);
                continue;
            }

            if options.dry {
                info!(" [dry] {} seria removido ({})", container.name, container.state);
            } else {
                if container.needs_stop() {
                    info!(" Parando {} ({})...", container.name, container.state);
                    self.runtime.stop_container(&container.name)?;
                }
                info!(" Removendo {}...", container.name);
                self.runtime.delete_container(&container.name)?;
            }

            removed.push(container.name);
        }

        Ok(removed)
    }
}
