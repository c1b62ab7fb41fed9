use crate::domain::{ContainerRuntime, QuotaConfig};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub const PROFILE_TERMSERVER: &str = "termserver";

/// Keeps the LXD profile limits in line with the charm configuration
pub struct QuotaService {
    runtime: Arc<dyn ContainerRuntime>,
    profile: String,
}

impl QuotaService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, profile: impl Into<String>) -> Self {
        Self {
            runtime,
            profile: profile.into(),
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn update_lxc_quotas(&self, config: &QuotaConfig) -> Result<()> {
        info!(" Atualizando quotas do profile {}", self.profile);
        for (key, value) in config.limits() {
            self.runtime.set_profile_key(&self.profile, key, &value)?;
        }
        Ok(())
    }
}
