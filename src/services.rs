mod exterminator;
mod lxd_setup;
mod quota_service;

pub use exterminator::{ExterminateOptions, Exterminator};
pub use lxd_setup::{LxdSetup, fingerprint};
pub use quota_service::{PROFILE_TERMSERVER, QuotaService};
