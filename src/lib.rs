pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::CliArgs, credentials::DialoguerPrompt};

pub use adapters::{git::GitFetcher, http::HttpProbe, scanner::NucleiValidator};
pub use config::{credentials::CredentialProvider, toml_config::HarvestConfig, HarvestSettings};
pub use core::harvester::Harvester;
pub use utils::error::{HarvestError, Result};
