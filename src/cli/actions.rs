use crate::domain::{
    ContainerRuntime, ExterminateParams, HookEnvironment, ImportImageParams, QuotaConfig,
    ServiceConfig, termserver_path,
};
use crate::services::{ExterminateOptions, Exterminator, LxdSetup, QuotaService};
use anyhow::Result;
use clap::Subcommand;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

pub const RESULT_REMOVED: &str = "removed";
pub const RESULT_PROFILE: &str = "profile";
pub const RESULT_IMAGE: &str = "image";
pub const RESULT_URL: &str = "url";
pub const RESULT_PORTS: &str = "ports";

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ActionCommand {
    /// Remove LXD containers (params: name, only-stopped, dry)
    ExterminateContainers,
    /// Apply the lxc-quota-* charm options to the LXD profile
    UpdateLxcQuotas,
    /// Initialize LXD if needed and wait for it
    SetupLxd,
    /// Import the termserver image (params: alias, limited)
    ImportImage,
    /// Report the metrics URL and the ports to open
    ServiceInfo,
}

/// Everything an action needs to talk to Juju and LXD
pub struct ActionContext {
    pub env: Arc<dyn HookEnvironment>,
    pub runtime: Arc<dyn ContainerRuntime>,
    pub profile: String,
}

/// Runs the action and reports a failure back through `action-fail`.
pub fn run(command: &ActionCommand, ctx: &ActionContext) -> Result<()> {
    let result = match command {
        ActionCommand::ExterminateContainers => {
            exterminate_containers(ctx.env.as_ref(), ctx.runtime.clone()).map(|_| ())
        }
        ActionCommand::UpdateLxcQuotas => {
            update_lxc_quotas(ctx.env.as_ref(), ctx.runtime.clone(), &ctx.profile)
        }
        ActionCommand::SetupLxd => LxdSetup::new(ctx.runtime.clone()).setup_lxd(),
        ActionCommand::ImportImage => import_image(ctx.env.as_ref(), ctx.runtime.clone()),
        ActionCommand::ServiceInfo => service_info(ctx.env.as_ref()),
    };

    if let Err(e) = &result {
        error!("action falhou: {e:#}");
        if let Err(fail_err) = ctx.env.action_fail(&format!("{e:#}")) {
            error!("não foi possível reportar a falha: {fail_err:#}");
        }
    }

    result
}

pub fn join_removed(removed: &[String]) -> String {
    removed.join(", ")
}

pub fn exterminate_containers(
    env: &dyn HookEnvironment,
    runtime: Arc<dyn ContainerRuntime>,
) -> Result<Vec<String>> {
    let params = ExterminateParams::from_yaml(&env.action_params()?)?;
    let options = ExterminateOptions::from(&params);
    info!(
        " Exterminando containers (nome: {}, apenas parados: {}, dry: {})",
        options.name.as_deref().unwrap_or("*"),
        options.only_stopped,
        options.dry
    );

    let removed = Exterminator::new(runtime).exterminate(&options)?;
    env.action_set(RESULT_REMOVED, &join_removed(&removed))?;

    info!(" {} container(s) removidos", removed.len());
    Ok(removed)
}

pub fn update_lxc_quotas(
    env: &dyn HookEnvironment,
    runtime: Arc<dyn ContainerRuntime>,
    profile: &str,
) -> Result<()> {
    let config = QuotaConfig::from_yaml(&env.config()?)?;
    let service = QuotaService::new(runtime, profile);
    service.update_lxc_quotas(&config)?;
    env.action_set(RESULT_PROFILE, service.profile())
}

pub fn import_image(env: &dyn HookEnvironment, runtime: Arc<dyn ContainerRuntime>) -> Result<()> {
    let params = ImportImageParams::from_yaml(&env.action_params()?)?;
    let path = termserver_path(params.limited);
    LxdSetup::new(runtime).import_lxd_image(params.alias(), Path::new(path))?;
    env.action_set(RESULT_IMAGE, params.alias())
}

pub fn service_info(env: &dyn HookEnvironment) -> Result<()> {
    let config = ServiceConfig::from_yaml(&env.config()?)?;
    let ports: Vec<String> = config.ports().iter().map(u16::to_string).collect();
    env.action_set(RESULT_URL, &config.service_url())?;
    env.action_set(RESULT_PORTS, &ports.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_removed() {
        let removed = vec!["c1".to_string(), "c2".to_string()];
        assert_eq!(join_removed(&removed), "c1, c2");
        assert_eq!(join_removed(&[]), "");
    }
}
