pub mod cli;
pub mod domain;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{
    Container, ContainerRuntime, ContainerState, ExterminateParams, HookEnvironment, QuotaConfig,
    ServiceConfig,
};
pub use infra::{JujuHookEnv, LxcAdapter};
pub use services::{ExterminateOptions, Exterminator, LxdSetup, QuotaService};
