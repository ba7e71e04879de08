pub mod defaults;
mod loader;
mod types;

pub use loader::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, ENV_PREFIX};
pub use types::*;
