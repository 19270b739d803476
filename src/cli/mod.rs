mod commands;
mod docs;
mod file;
mod state;
mod token;

pub use commands::{ConfiguredArgs, DocKind, FileCommands, StateArgs, TokenCommands};
pub use docs::run_docs;
pub use file::{run_file_create, run_file_delete, run_file_import, run_file_read, run_file_update};
pub use token::{run_token_create, run_token_delete, run_token_import, run_token_read};

use std::path::Path;

use crate::client::HttpClient;
use crate::config::ProviderConfig;
use crate::provider::Provider;

/// Build the API client from a provider file, or from the environment alone
pub fn connect(provider_config: Option<&Path>) -> anyhow::Result<HttpClient> {
    let config = match provider_config {
        Some(path) => ProviderConfig::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {e}", path.display()))?,
        None => ProviderConfig::from_env(),
    };
    Provider::default().configure(&config).map_err(Into::into)
}
