pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{document::InMemoryDocument, web3forms::Web3FormsClient};
pub use config::toml_config::TomlConfig;
pub use crate::core::controller::FormController;
pub use utils::error::{FormError, Result};
