pub mod command;
pub mod hookenv;
pub mod lxc_adapter;

pub use hookenv::JujuHookEnv;
pub use lxc_adapter::LxcAdapter;
