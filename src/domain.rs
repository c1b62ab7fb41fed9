pub mod charm_config;
mod container;
mod image;
pub mod params;
pub mod traits;

pub use charm_config::{ServiceConfig, termserver_path};
pub use container::{Container, ContainerState, INSTANCE_TYPE_CONTAINER, Instance};
pub use image::{Image, ImageAlias, Network};
pub use params::{ExterminateParams, ImportImageParams, QuotaConfig};
pub use traits::{ContainerRuntime, HookEnvironment};
