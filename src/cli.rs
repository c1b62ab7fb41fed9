pub mod actions;

pub use actions::{ActionCommand, ActionContext};
